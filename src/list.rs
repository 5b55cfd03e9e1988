use std::any::type_name;
use std::ptr;
use std::{fmt, slice};

use crate::{ArrayListBuilder, CursorMut, Error, RawBuffer, Result};

/// The capacity a list starts with when none is configured, and the capacity
/// [`clear()`][ArrayList::clear] resets to.
pub const DEFAULT_CAPACITY: usize = 10;

/// An equality predicate injected at construction time.
///
/// When present, lookup operations compare items through it instead of the
/// item type's own [`PartialEq`]. This is how a list of pointer-like items
/// can compare by pointed-to content rather than by address.
pub type EqualityFn<T> = fn(&T, &T) -> bool;

/// A release callback injected at construction time.
///
/// The callback is invoked once with the whole list during teardown of an
/// [owning][ArrayList#ownership-of-pointed-to-data] list, and is expected to
/// walk the live items and free any externally owned data they point to.
///
/// The type is an `unsafe fn` pointer so that callbacks with preconditions,
/// such as [`ArrayList::free_boxed`], can be carried. Safe callbacks coerce
/// into it and are registered through the safe
/// [`release()`][ArrayListBuilder::release] builder method.
pub type ReleaseFn<T> = unsafe fn(&mut ArrayList<T>);

/// A generic, growable, index-addressable sequence container with injectable
/// equality and release behavior for pointer-like items.
///
/// Items live in one contiguous buffer that grows by a 1.5x factor whenever
/// an insertion finds it full. Lookups and removals are bounds checked and
/// report [`Error::IndexOutOfBounds`] instead of clamping; a growth that
/// cannot obtain memory reports [`Error::AllocationFailed`] and leaves the
/// list untouched.
///
/// # Ownership of pointed-to data
///
/// When the item type is a handle to externally owned data (typically a raw
/// pointer), the list can release that data at teardown: register a
/// [release callback][ReleaseFn] through the [builder][ArrayListBuilder] and
/// it runs once, with the whole list, when the list is dropped or cleared.
///
/// A [`clone()`][Clone::clone] copies the handles but not the data behind
/// them, so only the originally constructed list remains the *owner* of the
/// dataset: clones never run the release callback. This prevents a double
/// release when an original and its clone go out of scope, while both lists
/// remain free to mutate their own item sequences independently.
///
/// # Thread safety
///
/// The list performs no internal synchronization and is meant for
/// single-threaded use.
///
/// # Example
///
/// ```
/// use array_list::ArrayList;
///
/// let mut list = ArrayList::new();
///
/// list.push(1)?;
/// list.push(2)?;
/// list.push(3)?;
///
/// assert_eq!(list.to_string(), "[1, 2, 3]");
///
/// assert_eq!(list.remove_at(1)?, 2);
/// assert_eq!(list.to_string(), "[1, 3]");
///
/// list.insert(1, 5)?;
/// assert_eq!(list.to_string(), "[1, 5, 3]");
///
/// assert_eq!(list.index_of(&5), Some(1));
/// assert!(!list.contains(&9));
/// # Ok::<(), array_list::Error>(())
/// ```
pub struct ArrayList<T> {
    buf: RawBuffer<T>,

    /// Number of live items, stored at offsets `[0, len)` of the buffer.
    /// Invariant: `len <= buf.capacity()`.
    len: usize,

    equality: Option<EqualityFn<T>>,

    release: Option<ReleaseFn<T>>,

    /// True for an originally constructed list, false for any clone.
    /// Only an owning list runs `release` during teardown.
    owns_dataset: bool,
}

impl<T> ArrayList<T> {
    /// Creates a new [`ArrayList`] with the default configuration: capacity
    /// for [`DEFAULT_CAPACITY`] items, no equality callback, no release
    /// callback.
    ///
    /// # Example
    ///
    /// ```
    /// use array_list::ArrayList;
    ///
    /// let list = ArrayList::<u32>::new();
    ///
    /// assert!(list.is_empty());
    /// assert_eq!(list.capacity(), 10);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `T` is zero-sized.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts building a new [`ArrayList`].
    ///
    /// Use this to configure the initial capacity, an equality callback, or
    /// a release callback.
    ///
    /// # Example
    ///
    /// ```
    /// use array_list::ArrayList;
    ///
    /// let list = ArrayList::<u32>::builder().initial_capacity(32).build();
    ///
    /// assert_eq!(list.capacity(), 32);
    /// ```
    pub fn builder() -> ArrayListBuilder<T> {
        ArrayListBuilder::new()
    }

    /// # Panics
    ///
    /// Panics if `T` is zero-sized.
    #[must_use]
    pub(crate) fn new_inner(
        capacity: usize,
        equality: Option<EqualityFn<T>>,
        release: Option<ReleaseFn<T>>,
    ) -> Self {
        assert!(size_of::<T>() > 0, "ArrayList must have non-zero item size");

        Self {
            buf: RawBuffer::allocate_or_abort(capacity),
            len: 0,
            equality,
            release,
            owns_dataset: true,
        }
    }

    /// The number of items in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list holds no items.
    ///
    /// An empty list may still be holding buffer capacity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of items the list can hold without growing its buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Appends an item at the end of the list, growing the buffer if it is
    /// full. Amortized O(1).
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailed`] if the buffer needed to grow and memory
    /// could not be obtained; the list is left unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use array_list::ArrayList;
    ///
    /// let mut list = ArrayList::new();
    ///
    /// list.push("a")?;
    /// list.push("b")?;
    ///
    /// assert_eq!(list.len(), 2);
    /// assert_eq!(*list.get(1)?, "b");
    /// # Ok::<(), array_list::Error>(())
    /// ```
    pub fn push(&mut self, item: T) -> Result<()> {
        self.ensure_spare_capacity()?;

        // SAFETY: The slot at `len` is within capacity after the growth check
        // and holds no live item, so writing does not leak or overlap.
        unsafe {
            self.buf.as_ptr().add(self.len).write(item);
        }

        self.len = self
            .len
            .checked_add(1)
            .expect("a list of usize::MAX items would exceed addressable memory");

        Ok(())
    }

    /// Inserts an item at `index`, shifting the items at `[index, len)` one
    /// slot to the right. `index == len` appends. O(len) worst case.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfBounds`] if `index > len`; [`Error::AllocationFailed`]
    /// if the buffer needed to grow and memory could not be obtained. Either
    /// way the list is left unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use array_list::ArrayList;
    ///
    /// let mut list = ArrayList::new();
    /// list.push(1)?;
    /// list.push(3)?;
    ///
    /// list.insert(1, 2)?;
    ///
    /// assert_eq!(list.to_string(), "[1, 2, 3]");
    /// # Ok::<(), array_list::Error>(())
    /// ```
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        if index > self.len {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }

        self.ensure_spare_capacity()?;

        // SAFETY: `index <= len < capacity` after the growth check, so both
        // the shifted range and the written slot stay within the buffer. The
        // shift is a bitwise move; the vacated slot is immediately
        // re-initialized by the write.
        unsafe {
            let slot = self.buf.as_ptr().add(index);
            ptr::copy(slot, slot.add(1), self.len - index);
            slot.write(item);
        }

        self.len = self
            .len
            .checked_add(1)
            .expect("a list of usize::MAX items would exceed addressable memory");

        Ok(())
    }

    /// Removes and returns the item at `index`, shifting the items at
    /// `(index, len)` one slot to the left. O(len) worst case.
    ///
    /// The release callback is never involved - the caller receives the raw
    /// item and decides its disposal.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfBounds`] if `index >= len`.
    ///
    /// # Example
    ///
    /// ```
    /// use array_list::ArrayList;
    ///
    /// let mut list = ArrayList::new();
    /// list.push(10)?;
    /// list.push(20)?;
    /// list.push(30)?;
    ///
    /// assert_eq!(list.remove_at(1)?, 20);
    /// assert_eq!(list.to_string(), "[10, 30]");
    /// # Ok::<(), array_list::Error>(())
    /// ```
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        self.check_index(index)?;

        // SAFETY: `index < len`, so the slot holds a live item we can move
        // out, and the shifted range is within the live range. After the
        // bitwise shift the duplicate at the old tail position is outside
        // `[0, len)` and is never read or dropped.
        let item = unsafe {
            let slot = self.buf.as_ptr().add(index);
            let item = slot.read();
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            item
        };

        self.len -= 1;

        Ok(item)
    }

    /// Removes and returns the first item that matches `item` under the
    /// [equality policy][Self::index_of], or `None` when nothing
    /// matches. O(len).
    ///
    /// # Example
    ///
    /// ```
    /// use array_list::ArrayList;
    ///
    /// let mut list = ArrayList::new();
    /// list.push("a")?;
    /// list.push("b")?;
    ///
    /// assert_eq!(list.remove_item(&"a"), Some("a"));
    /// assert_eq!(list.remove_item(&"z"), None);
    /// assert_eq!(list.to_string(), "[b]");
    /// # Ok::<(), array_list::Error>(())
    /// ```
    pub fn remove_item(&mut self, item: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let index = self.index_of(item)?;

        Some(
            self.remove_at(index)
                .expect("index came from a scan of the live range"),
        )
    }

    /// Returns a shared reference to the item at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfBounds`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.check_index(index)?;

        // SAFETY: `index < len`, so the slot holds a live item. The shared
        // borrow of `self` keeps the buffer alive and unmoved.
        Ok(unsafe { &*self.buf.as_ptr().add(index) })
    }

    /// Returns an exclusive reference to the item at `index`. Mutation
    /// through the reference is visible in the list.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfBounds`] if `index >= len`.
    ///
    /// # Example
    ///
    /// ```
    /// use array_list::ArrayList;
    ///
    /// let mut list = ArrayList::new();
    /// list.push(41)?;
    ///
    /// *list.get_mut(0)? += 1;
    ///
    /// assert_eq!(*list.get(0)?, 42);
    /// # Ok::<(), array_list::Error>(())
    /// ```
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        self.check_index(index)?;

        // SAFETY: `index < len`, so the slot holds a live item. The exclusive
        // borrow of `self` rules out any concurrent access or reallocation.
        Ok(unsafe { &mut *self.buf.as_ptr().add(index) })
    }

    /// The index of the first item that matches `item`, or `None` when
    /// nothing matches. O(len).
    ///
    /// Items are compared through the equality callback when one was
    /// configured, and through `T`'s own [`PartialEq`] otherwise. For raw
    /// pointer items the built-in comparison is address equality, so a
    /// callback is the way to compare by pointed-to content.
    ///
    /// # Example
    ///
    /// ```
    /// use array_list::ArrayList;
    ///
    /// fn same_magnitude(a: &i32, b: &i32) -> bool {
    ///     a.abs() == b.abs()
    /// }
    ///
    /// let mut list = ArrayList::builder().equality(same_magnitude).build();
    /// list.push(-3)?;
    ///
    /// assert_eq!(list.index_of(&3), Some(0));
    /// # Ok::<(), array_list::Error>(())
    /// ```
    #[must_use]
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter()
            .position(|candidate| self.items_equal(candidate, item))
    }

    /// Whether any item matches `item` under the
    /// [equality policy][Self::index_of]. O(len).
    #[must_use]
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(item).is_some()
    }

    /// Removes every item and resets the buffer to the default capacity.
    ///
    /// Teardown happens exactly as on drop: an
    /// [owning][ArrayList#ownership-of-pointed-to-data] list first runs its
    /// release callback over the live items, then the items are dropped and
    /// the buffer is replaced by a fresh one of [`DEFAULT_CAPACITY`] slots.
    ///
    /// # Example
    ///
    /// ```
    /// use array_list::ArrayList;
    ///
    /// let mut list = ArrayList::builder().initial_capacity(100).build();
    /// list.push(1)?;
    ///
    /// list.clear();
    ///
    /// assert!(list.is_empty());
    /// assert_eq!(list.capacity(), 10);
    /// # Ok::<(), array_list::Error>(())
    /// ```
    pub fn clear(&mut self) {
        self.release_dataset();
        self.drop_items();

        // Old buffer is released when replaced. `clear()` is infallible, so
        // a failed reset allocation goes to the allocation error handler.
        self.buf = RawBuffer::allocate_or_abort(DEFAULT_CAPACITY);
    }

    /// The live items as a contiguous slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` holds initialized items and the pointer is valid
        // for `len` reads (dangling only when `len == 0`, which a slice
        // permits).
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// The live items as a contiguous mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: As in `as_slice()`; the exclusive borrow of `self` makes
        // the exclusive slice sound.
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
    }

    /// Iterates over the items front to back.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterates over the items front to back with exclusive access.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns a [`CursorMut`] positioned at the front of the list, for
    /// traversal with in-place removal.
    ///
    /// # Example
    ///
    /// ```
    /// use array_list::ArrayList;
    ///
    /// let mut list = ArrayList::new();
    /// for value in [1, 2, 3, 4] {
    ///     list.push(value)?;
    /// }
    ///
    /// // Drop the even values, keep the rest.
    /// let mut cursor = list.cursor_front_mut();
    /// while let Some(&value) = cursor.current() {
    ///     if value % 2 == 0 {
    ///         cursor.remove_current();
    ///     } else {
    ///         cursor.move_next();
    ///     }
    /// }
    ///
    /// assert_eq!(list.to_string(), "[1, 3]");
    /// # Ok::<(), array_list::Error>(())
    /// ```
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self)
    }

    /// Renders the list as `[e0, e1, ..., en]` using the supplied
    /// item-to-text callback.
    ///
    /// For item types that implement [`Display`][fmt::Display] the `Display`
    /// implementation of the list itself renders the same shape without a
    /// callback.
    ///
    /// # Example
    ///
    /// ```
    /// use array_list::ArrayList;
    ///
    /// let mut list = ArrayList::new();
    /// list.push((1, 2))?;
    /// list.push((3, 4))?;
    ///
    /// let rendered = list.format_with(|&(x, y)| format!("{x}:{y}"));
    /// assert_eq!(rendered, "[1:2, 3:4]");
    /// # Ok::<(), array_list::Error>(())
    /// ```
    #[must_use]
    pub fn format_with(&self, item_to_string: fn(&T) -> String) -> String {
        let rendered: Vec<String> = self.iter().map(item_to_string).collect();
        format!("[{}]", rendered.join(", "))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }

        Ok(())
    }

    /// Grows the buffer if the next append would not fit. The growth factor
    /// lives in [`RawBuffer::grow`].
    fn ensure_spare_capacity(&mut self) -> Result<()> {
        if self.len == self.buf.capacity() {
            self.buf.grow(self.len)?;
        }

        Ok(())
    }

    fn items_equal(&self, a: &T, b: &T) -> bool
    where
        T: PartialEq,
    {
        match self.equality {
            Some(equality) => equality(a, b),
            None => a == b,
        }
    }

    /// Runs the release callback over the live items, if this list owns its
    /// dataset and a callback is configured.
    fn release_dataset(&mut self) {
        if !self.owns_dataset {
            return;
        }

        if let Some(release) = self.release {
            // SAFETY: Callbacks with preconditions can only have been
            // registered through `ArrayListBuilder::release_unchecked`, whose
            // caller vouched for them holding at every teardown. Safe
            // callbacks carry no preconditions.
            unsafe {
                release(self);
            }
        }
    }

    /// Drops the live items in place. The buffer keeps its allocation.
    fn drop_items(&mut self) {
        let live = ptr::slice_from_raw_parts_mut(self.buf.as_ptr(), self.len);

        // Clear the length first so a panicking item Drop cannot lead to a
        // second drop of the same slots.
        self.len = 0;

        // SAFETY: The slots held live items and are not reachable through
        // the list anymore (len is 0).
        unsafe {
            ptr::drop_in_place(live);
        }
    }
}

impl<T> ArrayList<*mut T> {
    /// A reusable release callback for lists of owning raw pointers: walks
    /// the list front to back and reclaims every stored pointer as a
    /// [`Box<T>`], freeing the pointed-to data.
    ///
    /// Register it through [`ArrayListBuilder::release_unchecked`]:
    ///
    /// ```
    /// use array_list::ArrayList;
    ///
    /// // SAFETY: Every pointer pushed below comes from Box::into_raw and
    /// // nothing else ever frees it.
    /// let mut list = unsafe {
    ///     ArrayList::<*mut String>::builder()
    ///         .release_unchecked(ArrayList::free_boxed)
    ///         .build()
    /// };
    ///
    /// list.push(Box::into_raw(Box::new("owned".to_string())))?;
    ///
    /// // Dropping the list frees the boxed string.
    /// drop(list);
    /// # Ok::<(), array_list::Error>(())
    /// ```
    ///
    /// # Safety
    ///
    /// Every item in the list must have been produced by [`Box::into_raw`]
    /// and must have no other owner - each pointer is freed exactly once.
    pub unsafe fn free_boxed(list: &mut ArrayList<*mut T>) {
        for &item in list.iter() {
            // SAFETY: Per this function's contract the pointer came from
            // `Box::into_raw` and nothing else owns it.
            drop(unsafe { Box::from_raw(item) });
        }
    }
}

impl<T> Drop for ArrayList<T> {
    fn drop(&mut self) {
        // Release pointed-to data first (owner only), while the items are
        // still alive for the callback to walk. The buffer itself is freed
        // by RawBuffer's own Drop regardless of ownership.
        self.release_dataset();
        self.drop_items();
    }
}

impl<T> Default for ArrayList<T> {
    /// Creates a new [`ArrayList`] with the default configuration.
    ///
    /// # Panics
    ///
    /// Panics if `T` is zero-sized.
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ArrayList<T> {
    /// Creates a structurally independent list holding clones of the items.
    ///
    /// The buffer is sized to the source's capacity and both callbacks are
    /// carried over, but the clone does not
    /// [own the dataset][ArrayList#ownership-of-pointed-to-data]: it never
    /// runs the release callback. For raw pointer items `Clone` is a shallow
    /// handle copy, so source and clone share the pointed-to data and only
    /// the source releases it.
    ///
    /// # Panics
    ///
    /// Panics if the buffer for the clone cannot be allocated.
    fn clone(&self) -> Self {
        let mut clone = Self {
            buf: RawBuffer::allocate_or_abort(self.buf.capacity()),
            len: 0,
            equality: self.equality,
            release: self.release,
            owns_dataset: false,
        };

        for item in self.iter() {
            // SAFETY: The clone's capacity equals the source's, which is at
            // least the source's len, so the slot is within bounds. Writing
            // one slot at a time keeps `clone.len` truthful if an item's
            // Clone panics.
            unsafe {
                clone.buf.as_ptr().add(clone.len).write(item.clone());
            }
            clone.len += 1;
        }

        clone
    }

    /// Replaces `self` with a clone of `source`, first tearing down the
    /// existing state under `self`'s own ownership flag.
    fn clone_from(&mut self, source: &Self) {
        self.release_dataset();

        // The release already happened; stripping ownership stops the Drop
        // of the replaced value from running it a second time. Item values
        // and the old buffer are still freed by that Drop.
        self.owns_dataset = false;

        *self = source.clone();
    }
}

impl<T: fmt::Display> fmt::Display for ArrayList<T> {
    /// Renders the list as `[e0, e1, ..., en]`; an empty list renders
    /// as `[]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;

        for (index, item) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }

            write!(f, "{item}")?;
        }

        f.write_str("]")
    }
}

impl<T> fmt::Debug for ArrayList<T> {
    #[cfg_attr(test, mutants::skip)] // Diagnostic output only, mutation is meaningless.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayList")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("len", &self.len)
            .field("capacity", &self.buf.capacity())
            .field("owns_dataset", &self.owns_dataset)
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a ArrayList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ArrayList<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
