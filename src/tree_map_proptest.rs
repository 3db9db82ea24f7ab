#![cfg(test)]

// Property tests for TreeMap kept inside the crate so they can sit next to
// the unit tests without exposing internals.

use crate::error::DictError;
use crate::tree_map::TreeMap;
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
    Insert(i32, i32),
    Get(i32),
    Contains(i32),
    Remove(i32),
    Iterate,
    Range(i32, i32),
}

// Small key domain so sequences revisit keys: overwrites, removals of absent
// keys, and range bounds that sit on and between live keys all occur.
fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let key = 0i32..50;
    let op = prop_oneof![
        (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        key.clone().prop_map(Op::Get),
        key.clone().prop_map(Op::Contains),
        key.clone().prop_map(Op::Remove),
        Just(Op::Iterate),
        (key.clone(), key).prop_map(|(a, b)| Op::Range(a, b)),
    ];
    proptest::collection::vec(op, 1..80)
}

// Property: state-machine equivalence against std::collections::BTreeMap,
// removals included (the tree has no tombstones, so the model is exact).
//
// Invariants exercised across random operation sequences:
// - Duplicate inserts overwrite; `len` equals the number of distinct keys.
// - `get`/`contains`/`remove` parity for present and absent keys.
// - Full iteration yields exactly the model's entries in ascending key
//   order (sequence equality, not just set equality).
// - Range traversal over [lo, hi] matches the model's inclusive range, and
//   an inverted range yields nothing.
// - The range cursor emits the same sequence as the range visitor.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(ops in arb_ops()) {
        let mut sut: TreeMap<i32, i32> = TreeMap::new();
        let mut model: BTreeMap<i32, i32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    sut.insert(k, v);
                    model.insert(k, v);
                }
                Op::Get(k) => match model.get(&k) {
                    Some(v) => prop_assert_eq!(sut.get(&k), Ok(v)),
                    None => prop_assert_eq!(sut.get(&k), Err(DictError::KeyNotFound)),
                },
                Op::Contains(k) => {
                    prop_assert_eq!(sut.contains(&k), model.contains_key(&k));
                }
                Op::Remove(k) => match model.remove(&k) {
                    Some(v) => prop_assert_eq!(sut.remove(&k), Ok(v)),
                    None => prop_assert_eq!(sut.remove(&k), Err(DictError::KeyNotFound)),
                },
                Op::Iterate => {
                    let mut s_entries = Vec::new();
                    sut.for_each(|k, v| {
                        s_entries.push((*k, *v));
                        true
                    });
                    let m_entries: Vec<(i32, i32)> =
                        model.iter().map(|(k, v)| (*k, *v)).collect();
                    prop_assert_eq!(s_entries, m_entries);
                }
                Op::Range(lo, hi) => {
                    let mut s_entries = Vec::new();
                    sut.range_for_each(Some(&lo), Some(&hi), |k, v| {
                        s_entries.push((*k, *v));
                        true
                    });
                    let m_entries: Vec<(i32, i32)> = if lo <= hi {
                        model.range(lo..=hi).map(|(k, v)| (*k, *v)).collect()
                    } else {
                        Vec::new()
                    };
                    prop_assert_eq!(&s_entries, &m_entries);

                    let c_entries: Vec<(i32, i32)> = sut
                        .range_cursor(Some(lo), Some(hi))
                        .map(|(k, v)| (*k, *v))
                        .collect();
                    prop_assert_eq!(&c_entries, &m_entries);
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
        }
    }
}

// Property: the full cursor is equivalent to the unbounded range cursor and
// to in-order recursion, and repeating it over an unmodified tree yields an
// identical sequence.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_cursor_matches_in_order(keys in proptest::collection::vec(0i32..200, 0..60)) {
        let mut sut: TreeMap<i32, i32> = TreeMap::new();
        for (i, k) in keys.iter().enumerate() {
            sut.insert(*k, i as i32);
        }

        let mut visited = Vec::new();
        sut.for_each(|k, v| {
            visited.push((*k, *v));
            true
        });

        let first: Vec<(i32, i32)> = sut.cursor().map(|(k, v)| (*k, *v)).collect();
        let second: Vec<(i32, i32)> = sut.cursor().map(|(k, v)| (*k, *v)).collect();
        let unbounded: Vec<(i32, i32)> =
            sut.range_cursor(None, None).map(|(k, v)| (*k, *v)).collect();

        prop_assert_eq!(&first, &visited);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &unbounded);
    }
}
