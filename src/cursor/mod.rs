//! Primitive integer cursors
//!
//! [`IntIterator`] walks a sequence of primitive integers one at a time and
//! may remove the element it just returned from the collection underneath.
//! Implementations hold an exclusive borrow of their collection, so nothing
//! else can restructure it while a cursor is alive.
//!
//! Call order:
//! - `has_next_int` may be called freely
//! - `next_int` must follow a `true` from `has_next_int`
//! - `remove_int` must directly follow a successful `next_int`

mod guard;

pub use guard::CursorState;
pub(crate) use guard::RemovalGuard;

use std::fmt::Debug;
use std::iter::FusedIterator;

use num_traits::PrimInt;

use crate::error::CursorError;

/// Cursor over primitive integers with in-place removal.
pub trait IntIterator {
    /// Integer type produced by this cursor.
    type Int: PrimInt + Debug;

    /// Returns `true` if a following [`next_int`](Self::next_int) would succeed.
    ///
    /// Has no side effects.
    fn has_next_int(&self) -> bool;

    /// Returns the next value and advances past it.
    ///
    /// Fails with [`CursorError::Exhausted`] when no value is left; a failed
    /// call leaves the removal state untouched.
    fn next_int(&mut self) -> Result<Self::Int, CursorError>;

    /// Removes the value most recently returned by [`next_int`](Self::next_int)
    /// from the underlying collection.
    ///
    /// Does not advance the cursor: the element that followed the removed one
    /// is still returned by the next call to `next_int`.
    fn remove_int(&mut self) -> Result<(), CursorError>;

    /// Adapt this cursor into a standard [`Iterator`].
    fn ints(self) -> Ints<Self>
    where
        Self: Sized,
    {
        Ints { cursor: self }
    }

    /// Walk the remaining values, removing every value matching `pred`.
    ///
    /// Returns the number of removed values.
    fn remove_if<F>(&mut self, mut pred: F) -> Result<usize, CursorError>
    where
        F: FnMut(Self::Int) -> bool,
    {
        let mut removed = 0;
        while self.has_next_int() {
            let value = self.next_int()?;
            if pred(value) {
                self.remove_int()?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Advance past up to `n` values, returning how many were skipped.
    fn skip_ints(&mut self, n: usize) -> usize {
        let mut skipped = 0;
        while skipped < n && self.has_next_int() {
            if self.next_int().is_err() {
                break;
            }
            skipped += 1;
        }
        skipped
    }
}

impl<I: IntIterator + ?Sized> IntIterator for &mut I {
    type Int = I::Int;

    fn has_next_int(&self) -> bool {
        (**self).has_next_int()
    }

    fn next_int(&mut self) -> Result<Self::Int, CursorError> {
        (**self).next_int()
    }

    fn remove_int(&mut self) -> Result<(), CursorError> {
        (**self).remove_int()
    }
}

/// [`Iterator`] view of an [`IntIterator`], created by [`IntIterator::ints`].
///
/// Iteration ends at exhaustion instead of reporting an error.
#[derive(Debug)]
pub struct Ints<I> {
    cursor: I,
}

impl<I: IntIterator> Ints<I> {
    /// Remove the value most recently yielded by this iterator.
    pub fn remove_last(&mut self) -> Result<(), CursorError> {
        self.cursor.remove_int()
    }

    /// Recover the wrapped cursor.
    pub fn into_inner(self) -> I {
        self.cursor
    }
}

impl<I: IntIterator> Iterator for Ints<I> {
    type Item = I::Int;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.cursor.has_next_int() {
            return None;
        }
        self.cursor.next_int().ok()
    }
}

impl<I: IntIterator> FusedIterator for Ints<I> {}
