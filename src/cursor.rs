use std::fmt;

use crate::ArrayList;

/// A cursor over an [`ArrayList`] with exclusive access, supporting forward
/// traversal and removal at the current position.
///
/// The cursor is a plain (list, offset) pair. Positions run from the front of
/// the list to a terminal one-past-the-end position at which
/// [`current()`][Self::current] returns `None`. Because the cursor holds the
/// list's exclusive borrow, the buffer cannot be grown, shifted, or freed
/// behind its back while it is alive.
///
/// Created by calling [`ArrayList::cursor_front_mut()`].
///
/// # Example
///
/// ```
/// use array_list::ArrayList;
///
/// let mut list = ArrayList::new();
/// for value in ["keep", "drop", "keep"] {
///     list.push(value)?;
/// }
///
/// let mut cursor = list.cursor_front_mut();
/// while let Some(&value) = cursor.current() {
///     if value == "drop" {
///         cursor.remove_current();
///     } else {
///         cursor.move_next();
///     }
/// }
///
/// assert_eq!(list.as_slice(), ["keep", "keep"]);
/// # Ok::<(), array_list::Error>(())
/// ```
pub struct CursorMut<'a, T> {
    list: &'a mut ArrayList<T>,

    /// Always within `[0, list.len()]`; `list.len()` is the terminal
    /// position.
    index: usize,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(list: &'a mut ArrayList<T>) -> Self {
        Self { list, index: 0 }
    }

    /// The cursor's current offset from the front of the list.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// A shared reference to the current item, or `None` at the terminal
    /// position.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.list.as_slice().get(self.index)
    }

    /// An exclusive reference to the current item, or `None` at the terminal
    /// position.
    #[must_use]
    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.list.as_mut_slice().get_mut(self.index)
    }

    /// Advances the cursor by one position, stopping at the terminal
    /// position.
    pub fn move_next(&mut self) {
        if self.index < self.list.len() {
            self.index += 1;
        }
    }

    /// Removes and returns the current item, or `None` at the terminal
    /// position.
    ///
    /// The cursor does not advance: the successor that slides into the
    /// removed slot becomes the current item, so a removal loop visits every
    /// item exactly once. The release callback is never involved - the
    /// caller receives the raw item and decides its disposal.
    pub fn remove_current(&mut self) -> Option<T> {
        if self.index >= self.list.len() {
            return None;
        }

        Some(
            self.list
                .remove_at(self.index)
                .expect("cursor index is within the live range"),
        )
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    #[cfg_attr(test, mutants::skip)] // Diagnostic output only, mutation is meaningless.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("index", &self.index)
            .field("len", &self.list.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(values: &[i32]) -> ArrayList<i32> {
        let mut list = ArrayList::new();
        for &value in values {
            list.push(value).unwrap();
        }
        list
    }

    #[test]
    fn traversal_visits_front_to_back() {
        let mut list = list_of(&[1, 2, 3]);

        let mut cursor = list.cursor_front_mut();
        let mut seen = Vec::new();
        while let Some(&value) = cursor.current() {
            seen.push(value);
            cursor.move_next();
        }

        assert_eq!(seen, [1, 2, 3]);
        assert_eq!(cursor.index(), 3);
    }

    #[test]
    fn empty_list_starts_at_terminal() {
        let mut list = ArrayList::<i32>::new();

        let mut cursor = list.cursor_front_mut();
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.remove_current(), None);

        // Advancing at the terminal position is a no-op.
        cursor.move_next();
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn remove_current_lands_on_successor() {
        let mut list = list_of(&[1, 2, 3]);

        let mut cursor = list.cursor_front_mut();
        cursor.move_next();

        assert_eq!(cursor.remove_current(), Some(2));

        // The slid-in successor is now current, without advancing.
        assert_eq!(cursor.index(), 1);
        assert_eq!(cursor.current(), Some(&3));
    }

    #[test]
    fn removal_loop_visits_every_item_once() {
        let mut list = list_of(&[1, 2, 3, 4, 5, 6]);

        let mut cursor = list.cursor_front_mut();
        let mut visited = Vec::new();
        while let Some(&value) = cursor.current() {
            visited.push(value);
            if value % 2 == 0 {
                cursor.remove_current();
            } else {
                cursor.move_next();
            }
        }

        assert_eq!(visited, [1, 2, 3, 4, 5, 6]);
        assert_eq!(list.as_slice(), [1, 3, 5]);
    }

    #[test]
    fn remove_everything_through_the_cursor() {
        let mut list = list_of(&[1, 2, 3]);

        let mut cursor = list.cursor_front_mut();
        while cursor.remove_current().is_some() {}

        assert!(list.is_empty());
    }

    #[test]
    fn current_mut_writes_through() {
        let mut list = list_of(&[1, 2]);

        let mut cursor = list.cursor_front_mut();
        cursor.move_next();
        *cursor.current_mut().unwrap() = 20;

        assert_eq!(list.as_slice(), [1, 20]);
    }
}
