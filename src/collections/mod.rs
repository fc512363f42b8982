//! Integer collections that hand out removing cursors

mod bitset;
mod list;
mod parts;

pub use bitset::{BitSetConfig, BitSetCursor, IntBitSet};
pub use list::{IntList, ListCursor};
pub use parts::{PartCursor, PartRange, PartTracker};
