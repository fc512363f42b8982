//! Error taxonomy for cursors and the collections they walk.
//!
//! Every variant is a caller-misuse error: nothing here is transient and
//! nothing is retried.

use thiserror::Error;

/// Why a removal request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalFault {
    /// `remove_int` was called before any element was returned.
    NothingReturned,
    /// The most recently returned element has already been removed.
    AlreadyRemoved,
}

impl std::fmt::Display for RemovalFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemovalFault::NothingReturned => f.write_str("no element has been returned yet"),
            RemovalFault::AlreadyRemoved => f.write_str("current element was already removed"),
        }
    }
}

/// Contract violations raised by [`crate::IntIterator`] implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CursorError {
    /// `next_int` was called with no element left.
    #[error("iterator exhausted after {yielded} elements")]
    Exhausted {
        /// Number of elements this cursor returned before running dry.
        yielded: usize,
    },

    /// `remove_int` was called out of sequence relative to `next_int`.
    #[error("invalid removal state: {0}")]
    IllegalRemoval(RemovalFault),
}

impl CursorError {
    /// Returns `true` for the exhausted-iterator error.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, CursorError::Exhausted { .. })
    }

    /// Returns `true` for either invalid-removal error.
    pub fn is_illegal_removal(&self) -> bool {
        matches!(self, CursorError::IllegalRemoval(_))
    }
}

/// Errors raised while building or mutating the bundled collections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// Value does not fit inside a fixed-capacity bit set.
    #[error("value {value} out of range for capacity {capacity}")]
    ValueOutOfRange {
        /// Offending value.
        value: usize,
        /// Capacity of the set.
        capacity: usize,
    },

    /// A negative value was supplied where only non-negative values exist.
    #[error("negative value {0} is not representable")]
    NegativeValue(i64),

    /// A signed value exceeds the collection's value type.
    #[error("value {value} exceeds the largest representable value {max}")]
    ValueTooLarge {
        /// Value as supplied.
        value: i64,
        /// Largest value the collection can hold.
        max: u64,
    },

    /// Stored state breaks an invariant of the collection.
    #[error("inconsistent collection state: {0}")]
    Inconsistent(String),

    /// Configuration rejected at construction time.
    #[error("invalid collection configuration: {0}")]
    InvalidConfiguration(String),
}
