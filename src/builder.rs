use std::any::type_name;
use std::fmt;

use crate::list::DEFAULT_CAPACITY;
use crate::{ArrayList, EqualityFn, ReleaseFn};

/// Builder for creating an instance of [`ArrayList`].
///
/// You only need to use this builder if you want to customize the list
/// configuration. The default configuration used by [`ArrayList::new()`] is
/// sufficient for item types that compare with their own [`PartialEq`] and
/// own no external data.
///
/// # Examples
///
/// ```
/// use array_list::ArrayList;
///
/// fn pointee_equal(a: &*mut u32, b: &*mut u32) -> bool {
///     // SAFETY: The lists built below only ever hold pointers to live values.
///     unsafe { **a == **b }
/// }
///
/// let list = ArrayList::<*mut u32>::builder()
///     .initial_capacity(32)
///     .equality(pointee_equal)
///     .build();
///
/// assert_eq!(list.capacity(), 32);
/// ```
#[must_use]
pub struct ArrayListBuilder<T> {
    initial_capacity: usize,

    equality: Option<EqualityFn<T>>,

    release: Option<ReleaseFn<T>>,
}

impl<T> ArrayListBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            equality: None,
            release: None,
        }
    }

    /// Sets the number of items the list can hold before its first growth.
    /// Defaults to [`DEFAULT_CAPACITY`][crate::DEFAULT_CAPACITY]; zero is
    /// allowed and allocates nothing until the first insertion.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the equality predicate used by lookup operations instead of the
    /// item type's own [`PartialEq`].
    ///
    /// This is how a list of pointer-like items compares by pointed-to
    /// content rather than by address.
    pub fn equality(mut self, equality: EqualityFn<T>) -> Self {
        self.equality = Some(equality);
        self
    }

    /// Sets the release callback run once over the whole list when an
    /// [owning][ArrayList#ownership-of-pointed-to-data] list is dropped or
    /// cleared.
    ///
    /// Use this for callbacks that free external data through safe means.
    /// For callbacks with safety preconditions, such as
    /// [`ArrayList::free_boxed`], use
    /// [`release_unchecked()`][Self::release_unchecked].
    pub fn release(mut self, release: fn(&mut ArrayList<T>)) -> Self {
        // A safe fn pointer loses nothing by being carried as unsafe.
        let release: ReleaseFn<T> = release;
        self.release = Some(release);
        self
    }

    /// Sets a release callback that has safety preconditions of its own,
    /// such as [`ArrayList::free_boxed`].
    ///
    /// # Safety
    ///
    /// The caller must guarantee that the callback's preconditions hold
    /// whenever the built list tears down - that is, at every point the list
    /// may be dropped or cleared.
    pub unsafe fn release_unchecked(mut self, release: ReleaseFn<T>) -> Self {
        self.release = Some(release);
        self
    }

    /// Builds the array list with the specified configuration.
    ///
    /// # Panics
    ///
    /// Panics if `T` is zero-sized or if the initial buffer cannot be
    /// allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use array_list::ArrayList;
    ///
    /// let list = ArrayList::<u32>::builder().build();
    ///
    /// assert_eq!(list.len(), 0);
    /// assert!(list.is_empty());
    /// ```
    #[must_use]
    pub fn build(self) -> ArrayList<T> {
        ArrayList::new_inner(self.initial_capacity, self.equality, self.release)
    }
}

impl<T> fmt::Debug for ArrayListBuilder<T> {
    #[cfg_attr(test, mutants::skip)] // Diagnostic output only, mutation is meaningless.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayListBuilder")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("initial_capacity", &self.initial_capacity)
            .field("has_equality", &self.equality.is_some())
            .field("has_release", &self.release.is_some())
            .finish()
    }
}
