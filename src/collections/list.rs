//! Ordered integer list with a removing cursor.

use num_traits::PrimInt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cursor::{CursorState, IntIterator, RemovalGuard};
use crate::error::CursorError;

/// Ordered list of primitive integers. Duplicates are kept.
///
/// Cursors walk the list in index order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntList<T> {
    values: Vec<T>,
}

impl<T: PrimInt> IntList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Create an empty list with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Append a value.
    pub fn push(&mut self, value: T) {
        self.values.push(value);
    }

    /// Number of values in the list.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the list holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the values in order.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Returns `true` if `value` occurs at least once.
    pub fn contains(&self, value: T) -> bool {
        self.values.contains(&value)
    }

    /// Open a cursor positioned before the first value.
    pub fn cursor(&mut self) -> ListCursor<'_, T> {
        ListCursor {
            list: self,
            position: 0,
            guard: RemovalGuard::new(),
        }
    }

    /// Consume the list, returning its values.
    pub fn into_vec(self) -> Vec<T> {
        self.values
    }
}

impl<T: PrimInt> From<Vec<T>> for IntList<T> {
    fn from(values: Vec<T>) -> Self {
        Self { values }
    }
}

impl<T: PrimInt> FromIterator<T> for IntList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<T: PrimInt> Extend<T> for IntList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

/// Cursor over an [`IntList`], created by [`IntList::cursor`].
#[derive(Debug)]
pub struct ListCursor<'a, T> {
    list: &'a mut IntList<T>,
    /// Index of the next value to return.
    position: usize,
    guard: RemovalGuard,
}

impl<T: PrimInt> ListCursor<'_, T> {
    /// Removal state of the current element.
    pub fn state(&self) -> CursorState {
        self.guard.state()
    }

    /// Number of values returned so far, removed ones included.
    pub fn yielded(&self) -> usize {
        self.guard.yielded()
    }

    /// Values not yet returned.
    pub fn remaining(&self) -> usize {
        self.list.values.len() - self.position
    }
}

impl<T: PrimInt + std::fmt::Debug> IntIterator for ListCursor<'_, T> {
    type Int = T;

    fn has_next_int(&self) -> bool {
        self.position < self.list.values.len()
    }

    fn next_int(&mut self) -> Result<T, CursorError> {
        let value = match self.list.values.get(self.position) {
            Some(value) => *value,
            None => return Err(self.guard.exhausted()),
        };
        self.position += 1;
        self.guard.on_next();
        Ok(value)
    }

    fn remove_int(&mut self) -> Result<(), CursorError> {
        self.guard.take_for_removal()?;
        // Returned state implies position >= 1.
        self.position -= 1;
        self.list.values.remove(self.position);
        debug!(index = self.position, len = self.list.values.len(), "removed list value");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemovalFault;

    #[test]
    fn walks_in_index_order() {
        let mut list: IntList<u16> = vec![5, 5, 2, 9].into();
        let seen: Vec<u16> = list.cursor().ints().collect();
        assert_eq!(seen, vec![5, 5, 2, 9]);
    }

    #[test]
    fn removing_a_duplicate_keeps_the_other() {
        let mut list: IntList<i32> = vec![7, 7, 1].into();
        let mut cursor = list.cursor();
        cursor.next_int().unwrap();
        cursor.remove_int().unwrap();
        assert_eq!(cursor.next_int(), Ok(7));
        assert_eq!(cursor.remaining(), 1);
        assert_eq!(list.as_slice(), &[7, 1]);
    }

    #[test]
    fn removing_everything_empties_the_list() {
        let mut list: IntList<i64> = (-3..3).collect();
        let mut cursor = list.cursor();
        while cursor.has_next_int() {
            cursor.next_int().unwrap();
            cursor.remove_int().unwrap();
        }
        assert_eq!(cursor.yielded(), 6);
        assert!(list.is_empty());
    }

    #[test]
    fn failed_next_keeps_removal_right() {
        let mut list: IntList<u8> = vec![1].into();
        let mut cursor = list.cursor();
        cursor.next_int().unwrap();
        assert_eq!(cursor.next_int(), Err(CursorError::Exhausted { yielded: 1 }));
        assert_eq!(cursor.state(), CursorState::Returned);
        cursor.remove_int().unwrap();
        assert_eq!(
            cursor.remove_int(),
            Err(CursorError::IllegalRemoval(RemovalFault::AlreadyRemoved))
        );
        assert!(list.is_empty());
    }

    #[test]
    fn extend_appends_in_order() {
        let mut list = IntList::with_capacity(4);
        list.push(1u32);
        list.extend([2, 3]);
        assert!(list.contains(3));
        assert_eq!(list.into_vec(), vec![1, 2, 3]);
    }
}
