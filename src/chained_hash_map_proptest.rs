#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can
// check chain placement against the bucket index directly.

use crate::chained_hash_map::{ChainedHashMap, Insertion};
use crate::hash::bucket_index;
use hashbrown::HashMap;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::BTreeSet;

// Pool-indexed operations so shrinking moves toward earlier keys and
// shorter op lists.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i64),
    Get(usize),
    Remove(usize),
    Mutate(usize, i64),
    Contains(String),
    Iterate,
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => (idx.clone(), any::<i64>()).prop_map(|(i, v)| Op::Insert(i, v)),
            3 => idx.clone().prop_map(Op::Get),
            4 => idx.clone().prop_map(Op::Remove),
            2 => (idx.clone(), any::<i64>()).prop_map(|(i, d)| Op::Mutate(i, d)),
            2 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(Op::Contains),
            1 => Just(Op::Iterate),
            1 => Just(Op::Clear),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// State-machine equivalence against hashbrown::HashMap. After each op:
// - `len` equals the model's size and no key appears twice.
// - every entry sits in the bucket its key hashes to.
// - chain lengths sum to `len`.
fn check_against_model(
    bucket_count: usize,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut sut = ChainedHashMap::with_buckets(bucket_count).expect("non-zero buckets");
    let mut model: HashMap<String, i64> = HashMap::new();

    for op in ops {
        match op {
            Op::Insert(i, v) => {
                let k = &pool[i];
                let outcome = sut.insert(k, v).expect("small keys always allocate");
                match model.insert(k.clone(), v) {
                    Some(previous) => prop_assert_eq!(outcome, Insertion::Updated { previous }),
                    None => prop_assert_eq!(outcome, Insertion::Inserted),
                }
                prop_assert_eq!(sut.get(k), Some(v));
            }
            Op::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k).copied());
            }
            Op::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
                prop_assert_eq!(sut.get(k), None);
                // A second removal is an ordinary miss.
                prop_assert_eq!(sut.remove(k), None);
            }
            Op::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(v) = sut.get_mut(k) {
                    *v = v.wrapping_add(d);
                }
                if let Some(v) = model.get_mut(k) {
                    *v = v.wrapping_add(d);
                }
            }
            Op::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            Op::Iterate => {
                let mut seen = BTreeSet::new();
                for (bucket, k, v) in sut.iter() {
                    prop_assert_eq!(bucket, bucket_index(k, bucket_count));
                    prop_assert_eq!(Some(&v), model.get(k));
                    prop_assert!(seen.insert(k.to_string()), "duplicate key {:?}", k);
                }
                let expected: BTreeSet<String> = model.keys().cloned().collect();
                prop_assert_eq!(seen, expected);
            }
            Op::Clear => {
                sut.clear();
                model.clear();
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        let chained: usize = (0..bucket_count).map(|b| sut.chain_len(b)).sum();
        prop_assert_eq!(chained, sut.len());
        for b in 0..bucket_count {
            for (k, _) in sut.chain(b) {
                prop_assert_eq!(bucket_index(k, bucket_count), b);
            }
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(bucket_count in 1usize..=16, (pool, ops) in arb_scenario()) {
        check_against_model(bucket_count, &pool, ops)?;
    }
}

// Same invariants with a single bucket: every key collides and the
// whole map is one chain.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        check_against_model(1, &pool, ops)?;
    }
}

proptest! {
    #[test]
    fn prop_bucket_index_in_range(key in ".{0,24}", bucket_count in 1usize..=4096) {
        let b = bucket_index(&key, bucket_count);
        prop_assert!(b < bucket_count);
        prop_assert_eq!(b, bucket_index(&key, bucket_count));
    }
}
