//! Removal state shared by every cursor implementation.

use tracing::trace;

use crate::error::{CursorError, RemovalFault};

/// Whether the most recently returned element may be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorState {
    /// Nothing returned yet.
    #[default]
    Unread,
    /// An element was returned and is still present.
    Returned,
    /// The returned element has been removed.
    Removed,
}

/// Tracks the call-order invariant between `next_int` and `remove_int`.
#[derive(Debug, Default)]
pub(crate) struct RemovalGuard {
    state: CursorState,
    yielded: usize,
}

impl RemovalGuard {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn state(&self) -> CursorState {
        self.state
    }

    pub(crate) fn yielded(&self) -> usize {
        self.yielded
    }

    /// Record a successful `next_int`.
    pub(crate) fn on_next(&mut self) {
        self.state = CursorState::Returned;
        self.yielded += 1;
    }

    /// Build the error for a `next_int` past the end.
    pub(crate) fn exhausted(&self) -> CursorError {
        trace!(yielded = self.yielded, "cursor exhausted");
        CursorError::Exhausted {
            yielded: self.yielded,
        }
    }

    /// Consume the right to remove the current element.
    pub(crate) fn take_for_removal(&mut self) -> Result<(), CursorError> {
        match self.state {
            CursorState::Returned => {
                self.state = CursorState::Removed;
                Ok(())
            }
            CursorState::Unread => Err(CursorError::IllegalRemoval(
                RemovalFault::NothingReturned,
            )),
            CursorState::Removed => Err(CursorError::IllegalRemoval(
                RemovalFault::AlreadyRemoved,
            )),
        }
    }
}
