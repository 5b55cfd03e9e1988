//! A growable array list with caller-supplied equality and release hooks for
//! pointer-like elements.
//!
//! This crate provides [`ArrayList`], a contiguous-buffer sequence container
//! that is index-addressable and grows geometrically as items are appended.
//! Beyond the usual insert/remove/lookup operations it carries two optional,
//! construction-time callbacks that matter when the item type is a handle to
//! externally owned data:
//!
//! - **Equality callback**: lets lookups compare pointer-like items by their
//!   pointed-to content instead of by address.
//! - **Release callback**: runs once over the whole list at teardown of an
//!   *owning* list, freeing the external data its items point to. Clones
//!   share the pointed-to data but never run the callback, so a handle
//!   sequence can be shallow-copied without a double free.
//!
//! # Key features
//!
//! - **Index-addressable storage**: bounds-checked `get`/`get_mut`/`insert`/
//!   `remove_at` over one contiguous buffer
//! - **Geometric growth**: 1.5x expansion with a guaranteed minimum step, so
//!   tiny capacities cannot stall
//! - **Strong error safety**: a failed growth reports
//!   [`Error::AllocationFailed`] and leaves the list untouched
//! - **Injectable policies**: equality and release behavior supplied as plain
//!   function pointers at construction
//! - **Single-owner teardown**: the `owns_dataset` flag confines the release
//!   callback to the originally constructed list
//! - **Cursor traversal**: [`CursorMut`] walks the list and removes items in
//!   place without invalidating itself
//!
//! # Examples
//!
//! ## Basic usage
//!
//! ```rust
//! use array_list::ArrayList;
//!
//! let mut list = ArrayList::new();
//!
//! list.push(1)?;
//! list.push(2)?;
//! list.push(3)?;
//! assert_eq!(list.to_string(), "[1, 2, 3]");
//!
//! assert_eq!(list.remove_at(1)?, 2);
//! list.insert(1, 5)?;
//!
//! assert_eq!(list.to_string(), "[1, 5, 3]");
//! assert_eq!(list.index_of(&5), Some(1));
//! # Ok::<(), array_list::Error>(())
//! ```
//!
//! ## Owning pointer-like items
//!
//! ```rust
//! use array_list::ArrayList;
//!
//! // SAFETY: Every pointer pushed below comes from Box::into_raw and
//! // nothing else ever frees it.
//! let mut owner = unsafe {
//!     ArrayList::<*mut u64>::builder()
//!         .release_unchecked(ArrayList::free_boxed)
//!         .build()
//! };
//!
//! owner.push(Box::into_raw(Box::new(42)))?;
//!
//! // The clone shares the pointed-to data but does not own it.
//! let snapshot = owner.clone();
//! drop(snapshot); // No release happens here.
//!
//! drop(owner); // The boxed value is freed exactly once, here.
//! # Ok::<(), array_list::Error>(())
//! ```

mod builder;
mod cursor;
mod error;
mod list;
mod raw_buffer;

pub use builder::*;
pub use cursor::*;
pub use error::Error;
pub(crate) use error::Result;
pub use list::*;
pub(crate) use raw_buffer::*;
