use std::alloc::{self, Layout};
use std::ptr::{self, NonNull};

use crate::{Error, Result};

/// The backing storage of an `ArrayList`: a contiguous block of `capacity`
/// slots, allocated up front and replaced wholesale when the list grows.
///
/// The buffer knows nothing about which slots hold live items. It never reads,
/// writes, or drops item values - initialization and teardown of slots is
/// entirely the owner's responsibility. Dropping the buffer releases the
/// block itself and nothing else.
#[derive(Debug)]
pub(crate) struct RawBuffer<T> {
    /// Dangling when `capacity == 0`, so a zero-capacity buffer costs nothing.
    ptr: NonNull<T>,

    capacity: usize,
}

impl<T> RawBuffer<T> {
    /// Allocates a buffer of exactly `capacity` slots, all uninitialized.
    ///
    /// A capacity of zero performs no allocation.
    pub(crate) fn allocate(capacity: usize) -> Result<Self> {
        debug_assert!(
            size_of::<T>() > 0,
            "RawBuffer must have non-zero item size"
        );

        if capacity == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity: 0,
            });
        }

        let layout = Self::layout(capacity)?;

        // SAFETY: The layout is non-zero-sized because capacity is non-zero
        // and T is non-zero-sized (asserted above).
        let ptr = NonNull::new(unsafe { alloc::alloc(layout) }.cast::<T>())
            .ok_or(Error::AllocationFailed { capacity })?;

        Ok(Self { ptr, capacity })
    }

    /// Allocates on behalf of an infallible caller (constructors, `clear()`).
    ///
    /// Allocation failure is routed to the global allocation error handler
    /// rather than surfaced as an error value.
    pub(crate) fn allocate_or_abort(capacity: usize) -> Self {
        Self::allocate(capacity).unwrap_or_else(|_| {
            alloc::handle_alloc_error(
                Self::layout(capacity).expect("a layout that fit in memory once is calculable"),
            )
        })
    }

    fn layout(capacity: usize) -> Result<Layout> {
        Layout::array::<T>(capacity).map_err(|_| Error::AllocationFailed { capacity })
    }

    #[must_use]
    pub(crate) fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[must_use]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Replaces the block with one grown by the 1.5x factor, moving the first
    /// `live` slots into it bitwise and releasing the old block.
    ///
    /// Growth is guaranteed to add at least one slot, so capacities 0 and 1
    /// still make progress despite the truncating multiplier. On allocation
    /// failure the buffer is left untouched.
    pub(crate) fn grow(&mut self, live: usize) -> Result<()> {
        debug_assert!(live <= self.capacity);

        let new_capacity = self
            .capacity
            .saturating_add(self.capacity / 2)
            .max(self.capacity.checked_add(1).expect(
                "growing past a capacity of usize::MAX items would exceed addressable memory",
            ));

        let fresh = Self::allocate(new_capacity)?;

        // SAFETY: The first `live` slots of the old block are readable (they
        // are within its capacity) and the fresh block has room for them. The
        // two blocks are distinct allocations. This is a bitwise move - the
        // old copies are never touched again because the old block is released
        // without dropping any slots.
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), fresh.ptr.as_ptr(), live);
        }

        // The old block is released by the Drop of the value we replace.
        *self = fresh;

        Ok(())
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        if self.capacity == 0 {
            return;
        }

        let layout = Layout::array::<T>(self.capacity)
            .expect("a layout that was successfully allocated is calculable");

        // SAFETY: The pointer came from `alloc` with this exact layout and
        // has not been released yet.
        unsafe {
            alloc::dealloc(self.ptr.as_ptr().cast(), layout);
        }
    }
}
