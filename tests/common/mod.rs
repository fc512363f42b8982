use intcursor::{IntBitSet, IntIterator, IntList, PartTracker};

/// Collection kinds exercised by the shared contract tests.
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
pub enum Backing {
    List,
    Bits,
    Parts,
}

/// Walk `cursor` to the end, removing the i-th returned value when `mask[i]`
/// is set. Returns the values seen, in order.
#[allow(dead_code)]
pub fn walk_with_mask<I: IntIterator>(mut cursor: I, mask: &[bool]) -> Vec<I::Int> {
    let mut seen = Vec::new();
    while cursor.has_next_int() {
        let value = cursor.next_int().expect("has_next_int promised a value");
        if mask.get(seen.len()).copied().unwrap_or(false) {
            cursor.remove_int().expect("removal right after next succeeds");
        }
        seen.push(value);
    }
    seen
}

#[allow(dead_code)]
pub fn list(values: &[i32]) -> IntList<i32> {
    IntList::from(values.to_vec())
}

#[allow(dead_code)]
pub fn bits(values: &[usize]) -> IntBitSet {
    IntBitSet::from_values(values.iter().copied()).expect("bit set builds")
}

#[allow(dead_code)]
pub fn parts(values: &[u32]) -> PartTracker {
    let mut tracker = PartTracker::new();
    for &part in values {
        tracker.insert(part);
    }
    tracker
}
