//! # Primitive Integer Cursors
//!
//! Walk a collection of primitive integers one value at a time and remove
//! the value just returned, without boxing each element.
//!
//! ## Contract
//!
//! 1. **`has_next_int`**: true iff `next_int` would succeed
//! 2. **`next_int`**: return the next value and advance
//! 3. **`remove_int`**: drop the value just returned, once
//!
//! A cursor borrows its collection mutably for its whole life, so the
//! collection cannot be changed behind its back.
//!
//! ## Usage Example
//!
//! ```
//! use intcursor::{IntIterator, IntList};
//!
//! let mut list = IntList::from(vec![3, 1, 4]);
//! let mut cursor = list.cursor();
//! assert_eq!(cursor.next_int()?, 3);
//! assert_eq!(cursor.next_int()?, 1);
//! cursor.remove_int()?;
//! assert_eq!(cursor.next_int()?, 4);
//! assert!(!cursor.has_next_int());
//! assert_eq!(list.as_slice(), &[3, 4]);
//! # Ok::<(), intcursor::CursorError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod collections; // Lists, bit sets and part trackers
pub mod cursor;      // The cursor contract and its iterator adapter
pub mod error;       // Misuse and collection errors

// Re-exports for convenience
pub use collections::{
    BitSetConfig, BitSetCursor, IntBitSet, IntList, ListCursor, PartCursor, PartRange,
    PartTracker,
};
pub use cursor::{CursorState, IntIterator, Ints};
pub use error::{CollectionError, CursorError, RemovalFault};
