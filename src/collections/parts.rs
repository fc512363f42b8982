//! Received-part tracking
//!
//! Records which numbered parts of a multi-part transfer have arrived and
//! reports the gaps. Parts are stored as sorted, disjoint, non-adjacent
//! inclusive ranges so a mostly-complete transfer costs a handful of ranges
//! rather than one entry per part.

use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cursor::{CursorState, IntIterator, RemovalGuard};
use crate::error::{CollectionError, CursorError};

/// Inclusive run of received parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "StoredRange")
)]
pub struct PartRange {
    /// First part in the run.
    pub first: u32,
    /// Last part in the run.
    pub last: u32,
}

impl PartRange {
    fn single(part: u32) -> Self {
        Self {
            first: part,
            last: part,
        }
    }

    /// Returns `true` if `part` lies in this run.
    pub fn contains(&self, part: u32) -> bool {
        self.first <= part && part <= self.last
    }

    /// Number of parts in this run. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        (self.last - self.first) as usize + 1
    }
}

/// Set of received part numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "StoredTracker")
)]
pub struct PartTracker {
    received: Vec<PartRange>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct StoredRange {
    first: u32,
    last: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<StoredRange> for PartRange {
    type Error = CollectionError;

    fn try_from(stored: StoredRange) -> Result<Self, Self::Error> {
        if stored.first > stored.last {
            return Err(CollectionError::Inconsistent(format!(
                "part range starts at {} after its end {}",
                stored.first, stored.last
            )));
        }
        Ok(Self {
            first: stored.first,
            last: stored.last,
        })
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct StoredTracker {
    received: Vec<PartRange>,
}

#[cfg(feature = "serde")]
impl TryFrom<StoredTracker> for PartTracker {
    type Error = CollectionError;

    fn try_from(stored: StoredTracker) -> Result<Self, Self::Error> {
        for pair in stored.received.windows(2) {
            // Runs must be ascending with at least one missing part between them.
            let separated = pair[0]
                .last
                .checked_add(1)
                .is_some_and(|end| end < pair[1].first);
            if !separated {
                return Err(CollectionError::Inconsistent(format!(
                    "part ranges {}..={} and {}..={} overlap, touch or are out of order",
                    pair[0].first, pair[0].last, pair[1].first, pair[1].last
                )));
            }
        }
        Ok(Self {
            received: stored.received,
        })
    }
}

impl PartTracker {
    /// Create a tracker with nothing received.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `part` as received. Returns `false` if it was already known.
    pub fn insert(&mut self, part: u32) -> bool {
        let idx = self.range_index(part);
        if self.received.get(idx).is_some_and(|r| r.first <= part) {
            return false;
        }

        // received[idx - 1].last < part, so the addition cannot overflow.
        let joins_prev = idx > 0 && self.received[idx - 1].last + 1 == part;
        let joins_next = self
            .received
            .get(idx)
            .is_some_and(|r| part.checked_add(1) == Some(r.first));

        match (joins_prev, joins_next) {
            (true, true) => {
                let next = self.received.remove(idx);
                self.received[idx - 1].last = next.last;
                trace!(part, ranges = self.received.len(), "bridged two ranges");
            }
            (true, false) => self.received[idx - 1].last = part,
            (false, true) => self.received[idx].first = part,
            (false, false) => self.received.insert(idx, PartRange::single(part)),
        }
        true
    }

    /// Record a part given as a signed number, rejecting negatives.
    pub fn insert_signed(&mut self, part: i64) -> Result<bool, CollectionError> {
        if part < 0 {
            return Err(CollectionError::NegativeValue(part));
        }
        let part = u32::try_from(part).map_err(|_| CollectionError::ValueTooLarge {
            value: part,
            max: u64::from(u32::MAX),
        })?;
        Ok(self.insert(part))
    }

    /// Forget `part`. Returns `false` if it was not recorded.
    pub fn remove(&mut self, part: u32) -> bool {
        let idx = self.range_index(part);
        let range = match self.received.get(idx) {
            Some(range) if range.first <= part => *range,
            _ => return false,
        };

        if range.first == range.last {
            self.received.remove(idx);
        } else if part == range.first {
            self.received[idx].first = part + 1;
        } else if part == range.last {
            self.received[idx].last = part - 1;
        } else {
            self.received[idx].last = part - 1;
            self.received.insert(
                idx + 1,
                PartRange {
                    first: part + 1,
                    last: range.last,
                },
            );
            trace!(part, ranges = self.received.len(), "split range");
        }
        true
    }

    /// Returns `true` if `part` has been received.
    pub fn contains(&self, part: u32) -> bool {
        self.received
            .get(self.range_index(part))
            .is_some_and(|r| r.contains(part))
    }

    /// Total number of received parts.
    pub fn len(&self) -> usize {
        self.received.iter().map(PartRange::len).sum()
    }

    /// Returns `true` when nothing has been received.
    pub fn is_empty(&self) -> bool {
        self.received.is_empty()
    }

    /// Received runs in ascending order.
    pub fn ranges(&self) -> &[PartRange] {
        &self.received
    }

    /// Half-open ranges of `0..total_parts` that have not been received.
    pub fn missing_ranges(&self, total_parts: u32) -> Vec<Range<u32>> {
        let mut missing = Vec::new();
        let mut expected = 0u32;
        for range in &self.received {
            if range.first >= total_parts {
                break;
            }
            if range.first > expected {
                missing.push(expected..range.first);
            }
            match range.last.checked_add(1) {
                Some(next) => expected = next,
                None => return missing,
            }
        }
        if expected < total_parts {
            missing.push(expected..total_parts);
        }
        missing
    }

    /// Returns `true` once every part in `0..total_parts` has been received.
    pub fn is_complete(&self, total_parts: u32) -> bool {
        self.missing_ranges(total_parts).is_empty()
    }

    /// Open a cursor positioned before the lowest received part.
    pub fn cursor(&mut self) -> PartCursor<'_> {
        PartCursor {
            tracker: self,
            lower: Some(0),
            current: None,
            guard: RemovalGuard::new(),
        }
    }

    /// Index of the first range whose last part is `>= part`.
    fn range_index(&self, part: u32) -> usize {
        self.received.partition_point(|r| r.last < part)
    }
}

/// Cursor over every received part of a [`PartTracker`], ascending.
#[derive(Debug)]
pub struct PartCursor<'a> {
    tracker: &'a mut PartTracker,
    /// Smallest part that may still be returned; `None` once `u32::MAX` was passed.
    lower: Option<u32>,
    current: Option<u32>,
    guard: RemovalGuard,
}

impl PartCursor<'_> {
    /// Removal state of the current part.
    pub fn state(&self) -> CursorState {
        self.guard.state()
    }

    /// Number of parts returned so far, removed ones included.
    pub fn yielded(&self) -> usize {
        self.guard.yielded()
    }

    fn peek(&self) -> Option<u32> {
        let lower = self.lower?;
        let range = self.tracker.received.get(self.tracker.range_index(lower))?;
        Some(range.first.max(lower))
    }
}

impl IntIterator for PartCursor<'_> {
    type Int = u32;

    fn has_next_int(&self) -> bool {
        self.peek().is_some()
    }

    fn next_int(&mut self) -> Result<u32, CursorError> {
        let part = match self.peek() {
            Some(part) => part,
            None => return Err(self.guard.exhausted()),
        };
        self.lower = part.checked_add(1);
        self.current = Some(part);
        self.guard.on_next();
        Ok(part)
    }

    fn remove_int(&mut self) -> Result<(), CursorError> {
        self.guard.take_for_removal()?;
        if let Some(part) = self.current.take() {
            self.tracker.remove(part);
            debug!(part, "removed tracked part");
        }
        Ok(())
    }
}
