use thiserror::Error;

/// Errors that can occur when operating on an [`ArrayList`][crate::ArrayList].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The caller supplied an index outside the valid range of the operation.
    ///
    /// Lookup and removal accept indexes in `0..len`, insertion accepts
    /// indexes in `0..=len`. Out of range indexes are never clamped.
    #[error("index {index} is out of bounds for a list of length {len}")]
    IndexOutOfBounds {
        /// The index the caller supplied.
        index: usize,

        /// The number of items in the list at the time of the call.
        len: usize,
    },

    /// The buffer manager could not obtain memory while growing the list.
    ///
    /// The list remains exactly as it was before the failed operation - no
    /// partial resize takes place and no items are lost.
    #[error("failed to allocate storage for {capacity} items")]
    AllocationFailed {
        /// The capacity the list attempted to allocate.
        capacity: usize,
    },
}

/// A specialized `Result` type for array list operations, returning the
/// crate's [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
