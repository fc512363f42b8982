//! Bit-vector backed set of non-negative integers.
//!
//! One bit per representable value; a set bit means the value is present.
//! Cursors scan forward for the next set bit, so values come out ascending.

use bitvec::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cursor::{CursorState, IntIterator, RemovalGuard};
use crate::error::{CollectionError, CursorError};

/// Sizing parameters for an [`IntBitSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSetConfig {
    capacity: usize,
}

impl BitSetConfig {
    /// Configuration holding values `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Result<Self, CollectionError> {
        if capacity == 0 {
            return Err(CollectionError::InvalidConfiguration(
                "capacity must be > 0".to_string(),
            ));
        }
        Ok(Self { capacity })
    }

    /// Smallest configuration that can hold `max_value`.
    pub fn for_max_value(max_value: usize) -> Result<Self, CollectionError> {
        let capacity = max_value.checked_add(1).ok_or_else(|| {
            CollectionError::InvalidConfiguration(format!(
                "max value {max_value} leaves no room for a capacity"
            ))
        })?;
        Self::with_capacity(capacity)
    }

    /// Values `0..capacity` are representable.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Fixed-capacity set of `usize` values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "StoredBitSet")
)]
pub struct IntBitSet {
    bits: BitVec,
    /// Population count, kept in sync with `bits`.
    len: usize,
}

/// Wire form of [`IntBitSet`], checked before use.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct StoredBitSet {
    bits: BitVec,
    len: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<StoredBitSet> for IntBitSet {
    type Error = CollectionError;

    fn try_from(stored: StoredBitSet) -> Result<Self, Self::Error> {
        let population = stored.bits.count_ones();
        if stored.len != population {
            return Err(CollectionError::Inconsistent(format!(
                "bit set length {} does not match population {}",
                stored.len, population
            )));
        }
        Ok(Self {
            bits: stored.bits,
            len: stored.len,
        })
    }
}

impl IntBitSet {
    /// Create an empty set sized by `config`.
    pub fn new(config: BitSetConfig) -> Self {
        Self {
            bits: bitvec![0; config.capacity],
            len: 0,
        }
    }

    /// Build a set just large enough for the given values.
    pub fn from_values<I>(values: I) -> Result<Self, CollectionError>
    where
        I: IntoIterator<Item = usize>,
    {
        let values: Vec<usize> = values.into_iter().collect();
        let mut set = match values.iter().max() {
            Some(&max) => Self::new(BitSetConfig::for_max_value(max)?),
            None => Self {
                bits: BitVec::new(),
                len: 0,
            },
        };
        for value in values {
            set.insert(value)?;
        }
        Ok(set)
    }

    /// Insert `value`, returning `true` if it was not already present.
    pub fn insert(&mut self, value: usize) -> Result<bool, CollectionError> {
        if value >= self.bits.len() {
            return Err(CollectionError::ValueOutOfRange {
                value,
                capacity: self.bits.len(),
            });
        }
        let was_set = self.bits.replace(value, true);
        if !was_set {
            self.len += 1;
        }
        Ok(!was_set)
    }

    /// Insert a signed value, rejecting negatives.
    pub fn insert_signed(&mut self, value: i64) -> Result<bool, CollectionError> {
        if value < 0 {
            return Err(CollectionError::NegativeValue(value));
        }
        let value = usize::try_from(value).map_err(|_| CollectionError::ValueTooLarge {
            value,
            max: usize::MAX as u64,
        })?;
        self.insert(value)
    }

    /// Remove `value`, returning `true` if it was present.
    pub fn remove(&mut self, value: usize) -> bool {
        if value >= self.bits.len() {
            return false;
        }
        let was_set = self.bits.replace(value, false);
        if was_set {
            self.len -= 1;
        }
        was_set
    }

    /// Returns `true` if `value` is present.
    pub fn contains(&self, value: usize) -> bool {
        value < self.bits.len() && self.bits[value]
    }

    /// Number of values present.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when no value is present.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of representable values.
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Present values in ascending order, without removal support.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Open a cursor positioned before the smallest value.
    pub fn cursor(&mut self) -> BitSetCursor<'_> {
        BitSetCursor {
            set: self,
            scan_from: 0,
            guard: RemovalGuard::new(),
        }
    }

    fn next_set_bit(&self, from: usize) -> Option<usize> {
        self.bits[from..].first_one().map(|offset| from + offset)
    }
}

/// Cursor over an [`IntBitSet`], created by [`IntBitSet::cursor`].
#[derive(Debug)]
pub struct BitSetCursor<'a> {
    set: &'a mut IntBitSet,
    /// One past the last returned value; never exceeds the capacity.
    scan_from: usize,
    guard: RemovalGuard,
}

impl BitSetCursor<'_> {
    /// Removal state of the current element.
    pub fn state(&self) -> CursorState {
        self.guard.state()
    }

    /// Number of values returned so far, removed ones included.
    pub fn yielded(&self) -> usize {
        self.guard.yielded()
    }
}

impl IntIterator for BitSetCursor<'_> {
    type Int = usize;

    fn has_next_int(&self) -> bool {
        self.set.next_set_bit(self.scan_from).is_some()
    }

    fn next_int(&mut self) -> Result<usize, CursorError> {
        let value = match self.set.next_set_bit(self.scan_from) {
            Some(value) => value,
            None => return Err(self.guard.exhausted()),
        };
        self.scan_from = value + 1;
        self.guard.on_next();
        Ok(value)
    }

    fn remove_int(&mut self) -> Result<(), CursorError> {
        self.guard.take_for_removal()?;
        let value = self.scan_from - 1;
        self.set.bits.set(value, false);
        self.set.len -= 1;
        debug!(value, len = self.set.len, "removed bit set value");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_zero_capacity() {
        assert!(matches!(
            BitSetConfig::with_capacity(0),
            Err(CollectionError::InvalidConfiguration(_))
        ));
        assert_eq!(BitSetConfig::for_max_value(9).unwrap().capacity(), 10);
        assert_eq!(BitSetConfig::with_capacity(4).unwrap().capacity(), 4);
        assert!(BitSetConfig::for_max_value(usize::MAX).is_err());
    }

    #[test]
    fn insert_tracks_population() {
        let mut set = IntBitSet::new(BitSetConfig::with_capacity(16).unwrap());
        assert_eq!(set.insert(3), Ok(true));
        assert_eq!(set.insert(3), Ok(false));
        assert_eq!(set.insert(15), Ok(true));
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.insert(16),
            Err(CollectionError::ValueOutOfRange {
                value: 16,
                capacity: 16
            })
        );
        assert_eq!(set.insert_signed(-1), Err(CollectionError::NegativeValue(-1)));
        assert!(set.remove(3));
        assert!(!set.remove(3));
        assert!(!set.remove(99));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn cursor_yields_ascending_and_clears_bits() {
        let mut set = IntBitSet::from_values([40, 2, 17, 63, 64]).unwrap();
        assert_eq!(set.capacity(), 65);

        let mut cursor = set.cursor();
        let mut seen = Vec::new();
        while cursor.has_next_int() {
            let value = cursor.next_int().unwrap();
            seen.push(value);
            if value == 17 || value == 64 {
                cursor.remove_int().unwrap();
            }
        }
        assert_eq!(seen, vec![2, 17, 40, 63, 64]);
        assert!(cursor.next_int().unwrap_err().is_exhausted());

        assert_eq!(set.iter().collect::<Vec<_>>(), vec![2, 40, 63]);
        assert_eq!(set.len(), 3);
        assert!(!set.contains(17));
    }

    #[test]
    fn empty_set_cursor_is_exhausted() {
        let mut set = IntBitSet::from_values(std::iter::empty()).unwrap();
        assert!(set.is_empty());
        let mut cursor = set.cursor();
        assert!(!cursor.has_next_int());
        assert_eq!(cursor.next_int(), Err(CursorError::Exhausted { yielded: 0 }));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn round_trip_keeps_values() {
        let set = IntBitSet::from_values([1, 5, 9]).unwrap();
        let json = serde_json::to_string(&set).unwrap();
        let restored: IntBitSet = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, set);
    }

    #[test]
    fn mismatched_length_is_rejected() {
        let set = IntBitSet::from_values([1, 5, 9]).unwrap();
        let mut value = serde_json::to_value(&set).unwrap();
        value["len"] = serde_json::json!(0);

        let err = serde_json::from_value::<IntBitSet>(value).unwrap_err();
        assert!(err.to_string().contains("does not match population 3"));
    }
}
