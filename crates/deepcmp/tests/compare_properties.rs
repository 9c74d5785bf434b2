#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::paths;
use deepcmp::{compare, Comparator, CompareConfig, Diff, Reflect};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

#[derive(Reflect, Clone, Debug)]
struct Row {
    id: u32,
    name: String,
    scores: Vec<i64>,
    attrs: HashMap<String, i32>,
}

fn row_strategy() -> impl Strategy<Value = Row> {
    (
        any::<u32>(),
        "[a-z]{0,6}",
        prop::collection::vec(any::<i64>(), 0..6),
        prop::collection::hash_map("[a-d]{1,2}", any::<i32>(), 0..5),
    )
        .prop_map(|(id, name, scores, attrs)| Row {
            id,
            name,
            scores,
            attrs,
        })
}

/// Paths with v1 and v2, so a swapped comparison can be matched up
fn swapped(diff: &Diff) -> Vec<(String, String, String, String)> {
    let mut rows: Vec<_> = diff
        .iter()
        .map(|d| (d.path.to_string(), d.message.clone(), d.v2.clone(), d.v1.clone()))
        .collect();
    rows.sort();
    rows
}

fn straight(diff: &Diff) -> Vec<(String, String, String, String)> {
    let mut rows: Vec<_> = diff
        .iter()
        .map(|d| (d.path.to_string(), d.message.clone(), d.v1.clone(), d.v2.clone()))
        .collect();
    rows.sort();
    rows
}

proptest! {
    #[test]
    fn prop_reflexive(row in row_strategy()) {
        prop_assert!(compare(&row, &row.clone()).is_empty());
    }

    #[test]
    fn prop_idempotent(a in row_strategy(), b in row_strategy()) {
        let first = compare(&a, &b);
        let second = compare(&a, &b);
        prop_assert_eq!(first.to_string(), second.to_string());
        prop_assert_eq!(format!("{first:#}"), format!("{second:#}"));
    }

    #[test]
    fn prop_swap_symmetric(a in row_strategy(), b in row_strategy()) {
        let comparator = Comparator::from_config(CompareConfig::unlimited());
        let forward = comparator.compare(&a, &b);
        let backward = comparator.compare(&b, &a);
        prop_assert_eq!(straight(&forward), swapped(&backward));
    }

    #[test]
    fn prop_slice_cap(n in 1usize..20) {
        let comparator = Comparator {
            slice_max_differences: n,
            ..Comparator::new()
        };
        let diff = comparator.compare(&vec![0u32; 2 * n], &vec![1u32; 2 * n]);
        let expected: Vec<String> = (0..n).map(|i| format!("[{i}]")).collect();
        prop_assert_eq!(paths(&diff), expected);
    }

    #[test]
    fn prop_map_cap(n in 1usize..20) {
        let comparator = Comparator {
            map_max_differences: n,
            ..Comparator::new()
        };
        let m1: HashMap<usize, bool> = (0..2 * n).map(|k| (k, false)).collect();
        let m2: HashMap<usize, bool> = (0..2 * n).map(|k| (k, true)).collect();
        let diff = comparator.compare(&m1, &m2);
        let expected: Vec<String> = (0..n).map(|i| format!("[{i}]")).collect();
        prop_assert_eq!(paths(&diff), expected);
    }

    #[test]
    fn prop_reflexive_with_option_keys(entries in prop::collection::hash_map(any::<Option<i8>>(), any::<i32>(), 0..8)) {
        let ordered: BTreeMap<Option<i8>, i32> = entries.clone().into_iter().collect();
        prop_assert!(compare(&entries, &entries.clone()).is_empty());
        prop_assert!(compare(&ordered, &ordered.clone()).is_empty());
    }

    #[test]
    fn prop_hash_and_btree_maps_agree(entries in prop::collection::vec((any::<i16>(), any::<bool>()), 0..12),
                                      flips in prop::collection::vec(any::<bool>(), 12)) {
        let m1: BTreeMap<i16, bool> = entries.iter().copied().collect();
        let m2: BTreeMap<i16, bool> = m1
            .iter()
            .zip(flips.iter())
            .map(|((k, v), flip)| (*k, v ^ flip))
            .collect();
        let h1: HashMap<i16, bool> = m1.clone().into_iter().collect();
        let h2: HashMap<i16, bool> = m2.clone().into_iter().collect();

        let unlimited = Comparator::from_config(CompareConfig::unlimited());
        prop_assert_eq!(
            unlimited.compare(&m1, &m2).to_string(),
            unlimited.compare(&h1, &h2).to_string()
        );
    }
}
