//! Property tests for the standing laws
//!
//! - Symmetry between index and key addressing
//! - Totality of the order (sorting is idempotent)
//! - Rerank round-trip
//! - Fit projection

use std::collections::BTreeSet;

use proptest::prelude::*;
use standing::Standing;

/// Distinct keys paired with distinct integral values
fn entries() -> impl Strategy<Value = Vec<(u32, f64)>> {
    (1usize..24).prop_flat_map(|n| {
        (
            proptest::collection::btree_set(0u32..1000, n),
            proptest::collection::btree_set(-500i32..500, n),
        )
            .prop_map(|(keys, values)| {
                keys.into_iter()
                    .zip(values.into_iter().rev().map(f64::from))
                    .collect()
            })
    })
}

fn build(entries: &[(u32, f64)]) -> Standing<u32> {
    let keys: Vec<u32> = entries.iter().map(|(k, _)| *k).collect();
    let values: Vec<f64> = entries.iter().map(|(_, v)| *v).collect();
    let mut standing = Standing::new();
    standing.add(keys, &values).unwrap();
    standing
}

proptest! {
    #[test]
    fn index_and_key_are_symmetric(entries in entries()) {
        let standing = build(&entries);

        for i in 0..standing.len() {
            let key = standing.get_by_index(i).unwrap();
            prop_assert_eq!(standing.index_of(&key).unwrap(), i);
        }
        for (key, _) in &entries {
            let index = standing.index_of(key).unwrap();
            prop_assert_eq!(standing.get_by_index(index).unwrap(), *key);
        }
    }

    #[test]
    fn order_is_total_and_stable(
        keys in proptest::collection::btree_set(0u32..1000, 1..24),
        value in -10i32..10,
    ) {
        // Every key shares one value: only the key tie-break orders them
        let keys: Vec<u32> = keys.into_iter().collect();
        let values = vec![f64::from(value); keys.len()];
        let mut standing = Standing::new();
        standing.add(keys.clone(), &values).unwrap();

        let first = standing.keys();
        standing.force_resort();
        prop_assert_eq!(standing.keys(), first.clone());

        let distinct: BTreeSet<u32> = first.iter().copied().collect();
        prop_assert_eq!(distinct.len(), keys.len());

        // Greater keys rank first among equal values
        prop_assert!(first.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn rerank_round_trip_restores_values(
        (entries, permutation) in entries().prop_flat_map(|entries| {
            let n = entries.len();
            (Just(entries), Just((0..n).collect::<Vec<usize>>()).prop_shuffle())
        })
    ) {
        let standing = build(&entries);

        let there = standing.rerank(&permutation, false).unwrap();
        let back = there.rerank(&permutation, true).unwrap();
        for (key, value) in &entries {
            prop_assert_eq!(back.value_of(key).unwrap(), *value);
        }

        let there = standing.rerank(&permutation, true).unwrap();
        let back = there.rerank(&permutation, false).unwrap();
        for (key, value) in &entries {
            prop_assert_eq!(back.value_of(key).unwrap(), *value);
        }
    }

    #[test]
    fn fit_keeps_known_values_and_defaults_new_keys(
        entries in entries(),
        extra in proptest::collection::btree_set(1000u32..2000, 0..8),
    ) {
        let standing = build(&entries).with_default(-7.0);

        let mut keys: Vec<u32> = entries.iter().step_by(2).map(|(k, _)| *k).collect();
        keys.extend(extra.iter().copied());
        let fitted = standing.fit(&keys).unwrap();

        prop_assert_eq!(fitted.len(), keys.len());
        for (key, value) in entries.iter().step_by(2) {
            prop_assert_eq!(fitted.value_of(key).unwrap(), *value);
        }
        for key in &extra {
            prop_assert_eq!(fitted.value_of(key).unwrap(), -7.0);
        }
    }
}
