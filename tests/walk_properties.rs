//! Property tests for merging, scoring and the greedy walk.

use std::collections::BTreeSet;

use proptest::prelude::*;
use slideshow_kernel::{
    interest_between, merge_records, GreedyWalker, Orientation, RawRecord, SlideshowPlanner,
    TagId, TieBreak, WalkPolicy,
};

fn arb_records() -> impl Strategy<Value = Vec<RawRecord>> {
    prop::collection::vec(
        (any::<bool>(), prop::collection::btree_set(0u32..16, 0..6)),
        0..48,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(index, (vertical, tags))| {
                let orientation = if vertical {
                    Orientation::Vertical
                } else {
                    Orientation::Horizontal
                };
                RawRecord::new(orientation, tags.into_iter().map(TagId::new).collect(), index)
            })
            .collect()
    })
}

fn arb_policy() -> impl Strategy<Value = WalkPolicy> {
    (1usize..8, any::<bool>()).prop_map(|(cap, highest)| {
        let tie_break = if highest { TieBreak::HighestId } else { TieBreak::LowestId };
        WalkPolicy::new(cap, tie_break, 10)
    })
}

fn tag_set(ids: &BTreeSet<u32>) -> BTreeSet<TagId> {
    ids.iter().copied().map(TagId::new).collect()
}

proptest! {
    #[test]
    fn prop_output_partitions_consumed_records(records in arb_records(), policy in arb_policy()) {
        let verticals: Vec<usize> = records
            .iter()
            .filter(|r| r.orientation == Orientation::Vertical)
            .map(|r| r.index)
            .collect();
        let dropped = if verticals.len() % 2 == 1 { verticals.last().copied() } else { None };
        let expected: Vec<usize> = records
            .iter()
            .map(|r| r.index)
            .filter(|i| Some(*i) != dropped)
            .collect();

        match SlideshowPlanner::new(policy).unwrap().plan(records) {
            Ok(planned) => {
                let mut written: Vec<usize> = planned
                    .slideshow
                    .iter()
                    .flat_map(|id| planned.catalog.get(id).unwrap().source_indices().to_vec())
                    .collect();
                written.sort_unstable();
                prop_assert_eq!(written, expected);
                prop_assert_eq!(planned.merge.dropped_index, dropped);
            }
            Err(_) => prop_assert!(expected.is_empty()),
        }
    }

    #[test]
    fn prop_walk_terminates_after_n_minus_one_steps(records in arb_records(), policy in arb_policy()) {
        let mut merged = merge_records(records);
        prop_assume!(!merged.catalog.is_empty());
        let n = merged.catalog.len();

        let outcome = GreedyWalker::new(policy)
            .walk(&mut merged.catalog, &mut merged.index)
            .unwrap();

        prop_assert_eq!(outcome.stats.steps, n - 1);
        prop_assert!(outcome.slideshow.is_permutation_of(n));
        prop_assert!(merged.catalog.iter().all(|e| e.is_used()));
        prop_assert_eq!(merged.catalog.unused_count(), 0);
    }

    #[test]
    fn prop_entries_never_mix_orientations(records in arb_records()) {
        let merged = merge_records(records.clone());
        for entry in merged.catalog.iter() {
            let sources = entry.source_indices();
            prop_assert!(sources.len() == 1 || sources.len() == 2);
            for &i in sources {
                prop_assert_eq!(records[i].orientation, entry.orientation());
            }
            let union: BTreeSet<TagId> = sources
                .iter()
                .flat_map(|&i| records[i].tags.iter().copied())
                .collect();
            prop_assert_eq!(entry.tags(), &union);
        }
    }

    #[test]
    fn prop_interest_matches_set_difference_formula(
        a in prop::collection::btree_set(0u32..24, 0..12),
        b in prop::collection::btree_set(0u32..24, 0..12),
    ) {
        let shared = a.intersection(&b).count();
        let a_only = a.difference(&b).count();
        let b_only = b.difference(&a).count();
        let expected = shared.min(a_only).min(b_only);

        prop_assert_eq!(interest_between(&tag_set(&a), &tag_set(&b)), expected);
        prop_assert_eq!(interest_between(&tag_set(&b), &tag_set(&a)), expected);
    }

    #[test]
    fn prop_walk_is_deterministic(records in arb_records(), policy in arb_policy()) {
        let planner = SlideshowPlanner::new(policy).unwrap();
        let first = planner.plan(records.clone());
        let second = planner.plan(records);

        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a.slideshow, b.slideshow),
            (Err(_), Err(_)) => {}
            _ => prop_assert!(false, "runs disagree on success"),
        }
    }
}
