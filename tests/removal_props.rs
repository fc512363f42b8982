mod common;

use std::collections::BTreeSet;

use common::walk_with_mask;
use intcursor::{IntBitSet, IntIterator, IntList, PartTracker};
use proptest::prelude::*;

proptest! {
    #[test]
    fn list_cursor_matches_vec_model(
        values in proptest::collection::vec(any::<i16>(), 0..64),
        mask in proptest::collection::vec(any::<bool>(), 0..64),
    ) {
        let mut list = IntList::from(values.clone());
        let seen = walk_with_mask(list.cursor(), &mask);
        prop_assert_eq!(&seen, &values, "every value is returned once, in order");

        let expected: Vec<i16> = values
            .iter()
            .enumerate()
            .filter(|(idx, _)| !mask.get(*idx).copied().unwrap_or(false))
            .map(|(_, v)| *v)
            .collect();
        prop_assert_eq!(list.as_slice(), expected.as_slice());
    }

    #[test]
    fn bit_set_cursor_matches_btreeset_model(
        values in proptest::collection::btree_set(0usize..512, 0..48),
        mask in proptest::collection::vec(any::<bool>(), 0..48),
    ) {
        let mut set = IntBitSet::from_values(values.iter().copied()).expect("bit set builds");
        let seen = walk_with_mask(set.cursor(), &mask);
        let ordered: Vec<usize> = values.iter().copied().collect();
        prop_assert_eq!(&seen, &ordered, "values come out ascending");

        let kept: BTreeSet<usize> = ordered
            .iter()
            .enumerate()
            .filter(|(idx, _)| !mask.get(*idx).copied().unwrap_or(false))
            .map(|(_, v)| *v)
            .collect();
        prop_assert_eq!(set.len(), kept.len());
        prop_assert_eq!(set.iter().collect::<BTreeSet<_>>(), kept);
    }

    #[test]
    fn part_tracker_matches_btreeset_model(
        inserted in proptest::collection::vec(0u32..96, 0..80),
        mask in proptest::collection::vec(any::<bool>(), 0..96),
        total in 0u32..128,
    ) {
        let mut tracker = PartTracker::new();
        let mut model = BTreeSet::new();
        for part in inserted {
            prop_assert_eq!(tracker.insert(part), model.insert(part));
        }

        // Ranges stay sorted, disjoint and non-adjacent.
        for pair in tracker.ranges().windows(2) {
            prop_assert!(pair[0].last + 1 < pair[1].first);
        }

        let seen = walk_with_mask(tracker.cursor(), &mask);
        prop_assert_eq!(&seen, &model.iter().copied().collect::<Vec<_>>());

        let kept: BTreeSet<u32> = seen
            .iter()
            .enumerate()
            .filter(|(idx, _)| !mask.get(*idx).copied().unwrap_or(false))
            .map(|(_, v)| *v)
            .collect();
        prop_assert_eq!(tracker.len(), kept.len());
        prop_assert_eq!(tracker.cursor().ints().collect::<BTreeSet<_>>(), kept.clone());

        let missing: BTreeSet<u32> = tracker
            .missing_ranges(total)
            .into_iter()
            .flatten()
            .collect();
        let expected: BTreeSet<u32> = (0..total).filter(|p| !kept.contains(p)).collect();
        prop_assert_eq!(missing, expected);
    }
}
