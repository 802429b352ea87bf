#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can inspect
// slot-level bookkeeping that is not part of the public surface.

use crate::hash_table::{HashTable, MAX_LOAD_FACTOR, MIN_CAPACITY};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
    StopAfter(usize),
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    (0usize..12, proptest::collection::vec("[a-z]{0,4}", 1..=24)).prop_flat_map(|(cap, pool)| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            3 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => "[a-z]{0,4}".prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Iterate),
            1 => (0usize..8).prop_map(OpI::StopAfter),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (cap, pool.clone(), ops))
    })
}

// Hash that sends every key to one of four buckets, so probe chains are long
// and cross each other constantly.
fn clustered(key: &str) -> u64 {
    key.len() as u64 % 4
}

fn check_invariants<H: crate::hash_fn::KeyHasher>(
    sut: &HashTable<i32, H>,
    model: &HashMap<String, i32>,
) -> Result<(), TestCaseError> {
    prop_assert_eq!(sut.len(), model.len());
    prop_assert_eq!(sut.len(), sut.occupied_slots());
    prop_assert_eq!(sut.tombstones(), sut.deleted_slots());
    prop_assert!(sut.capacity() >= MIN_CAPACITY);
    prop_assert!(sut.load_factor() <= MAX_LOAD_FACTOR);
    Ok(())
}

fn run_scenario<H: crate::hash_fn::KeyHasher>(
    mut sut: HashTable<i32, H>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();
    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = &pool[i];
                let before = sut.capacity();
                let grows = (sut.len() + 1) as f64 / before as f64 > MAX_LOAD_FACTOR;
                let prev = sut.insert(k, v).expect("insert must not fail in tests");
                prop_assert_eq!(prev, model.insert(k.clone(), v));
                if grows {
                    prop_assert_eq!(sut.capacity(), before * 2);
                    prop_assert_eq!(sut.tombstones(), 0, "resize leaves no tombstones");
                } else {
                    prop_assert_eq!(sut.capacity(), before);
                }
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let before = sut.len();
                let removed = sut.remove(k);
                prop_assert_eq!(removed, model.remove(k));
                if removed.is_some() {
                    prop_assert_eq!(sut.len(), before - 1);
                }
                prop_assert!(!sut.contains_key(k));
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
                prop_assert_eq!(sut.contains_key(k), model.contains_key(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(v) = sut.get_mut(k) {
                    *v = v.wrapping_add(d);
                }
                if let Some(v) = model.get_mut(k) {
                    *v = v.wrapping_add(d);
                }
            }
            OpI::Iterate => {
                let mut seen = BTreeSet::new();
                let calls = sut.iterate_keys(|k| {
                    seen.insert(k.to_string());
                    true
                });
                let expected: BTreeSet<String> = model.keys().cloned().collect();
                prop_assert_eq!(calls, sut.len());
                prop_assert_eq!(seen, expected);
                for (k, v) in sut.iter() {
                    prop_assert_eq!(Some(v), model.get(k));
                }
            }
            OpI::StopAfter(n) => {
                let mut left = n;
                let calls = sut.iterate_keys(|_| {
                    if left == 0 {
                        return false;
                    }
                    left -= 1;
                    true
                });
                prop_assert_eq!(calls, (n + 1).min(sut.len()));
            }
        }
        check_invariants(&sut, &model)?;
    }

    // Every surviving key is still reachable after all the churn.
    for (k, v) in &model {
        prop_assert_eq!(sut.get(k), Some(v));
    }
    let mut destroyed = Vec::new();
    sut.destroy_with(|v| destroyed.push(v));
    let mut expected: Vec<i32> = model.values().copied().collect();
    destroyed.sort_unstable();
    expected.sort_unstable();
    prop_assert_eq!(destroyed, expected);
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `get` returns the most recent value for every live key.
// - Overwrites hand back the previous value; `len` tracks occupied slots.
// - Removal leaves the key absent without hiding keys that probed past it.
// - Growth happens exactly when `(len + 1) / capacity` would exceed the
//   threshold, doubles the capacity and clears tombstones.
// - `iterate_keys` visits the live key set once and honors early stop.
// - `destroy_with` sees each live value exactly once.
proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_default_hash((cap, pool, ops) in arb_scenario()) {
        run_scenario(HashTable::with_capacity(cap), &pool, ops)?;
    }

    #[test]
    fn prop_state_machine_clustered_hash((cap, pool, ops) in arb_scenario()) {
        run_scenario(HashTable::with_capacity_and_hasher(cap, clustered), &pool, ops)?;
    }
}
