//! Property tests: every trie version behaves like an ordered map model,
//! and versions stay unchanged after later writes.

use cowtrie::{Trie, TrieNode};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;

/// No reachable node may be empty and valueless; an empty trie has no root.
fn validate_trie(trie: &Trie) {
    let Some(root) = trie.root() else {
        return;
    };
    assert!(
        root.is_value_node() || root.has_children(),
        "a trie with a root must hold something"
    );

    let mut stack: Vec<&Arc<TrieNode>> = vec![root];
    while let Some(node) = stack.pop() {
        for (_, child) in node.children() {
            assert!(
                child.is_value_node() || child.has_children(),
                "dangling empty branch left behind"
            );
            stack.push(child);
        }
    }
}

fn assert_matches_model(trie: &Trie, model: &BTreeMap<Vec<u8>, u64>, probes: &[Vec<u8>]) {
    for (key, value) in model {
        assert_eq!(trie.get::<u64>(key), Some(value));
    }
    for key in probes {
        assert_eq!(trie.get::<u64>(key), model.get(key));
    }
    let max_nodes: usize = 1 + model.keys().map(Vec::len).sum::<usize>();
    assert!(trie.node_count() <= max_nodes);
    assert_eq!(trie.is_empty(), model.is_empty());
}

#[derive(Clone, Debug)]
enum Op {
    Put(Vec<u8>, u64),
    Remove(Vec<u8>),
}

fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // A small alphabet keeps keys colliding on shared prefixes
    prop::collection::vec(b'a'..=b'd', 0..=6)
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        3 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Put(k, v)),
        2 => key.prop_map(Op::Remove),
    ];
    prop::collection::vec(op, 0..=200)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_versions_match_model(ops in ops_strategy()) {
        let mut versions = vec![(Trie::new(), BTreeMap::new())];
        let mut probes: Vec<Vec<u8>> = Vec::new();

        for op in ops {
            let (trie, model) = versions.last().cloned().unwrap();
            let mut next_model = model;
            let next = match op {
                Op::Put(key, value) => {
                    next_model.insert(key.clone(), value);
                    probes.push(key.clone());
                    trie.put(&key, value)
                }
                Op::Remove(key) => {
                    next_model.remove(&key);
                    probes.push(key.clone());
                    trie.remove(&key)
                }
            };
            validate_trie(&next);
            assert_matches_model(&next, &next_model, &probes);
            versions.push((next, next_model));
        }

        // Every earlier version still answers exactly as when it was built
        for (trie, model) in &versions {
            assert_matches_model(trie, model, &probes);
        }
    }

    #[test]
    fn prop_remove_missing_shares_root(ops in ops_strategy(), missing in key_strategy()) {
        let mut trie = Trie::new();
        for op in ops {
            trie = match op {
                Op::Put(key, value) => trie.put(&key, value),
                Op::Remove(key) => trie.remove(&key),
            };
        }
        prop_assume!(!trie.contains_key(&missing));

        let after = trie.remove(&missing);
        match (trie.root(), after.root()) {
            (Some(a), Some(b)) => prop_assert!(Arc::ptr_eq(a, b)),
            (None, None) => {}
            _ => prop_assert!(false, "no-op remove changed emptiness"),
        }
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys: Vec<Vec<u8>> = vec![
        b"".to_vec(),
        b"a".to_vec(),
        b"b".to_vec(),
        b"aa".to_vec(),
        b"ab".to_vec(),
        b"aab".to_vec(),
    ];

    let mut base = Trie::new();
    for (i, key) in keys.iter().enumerate() {
        base = base.put(key, i as u64);
    }

    for_each_permutation(&keys, |perm| {
        let mut trie = base.clone();
        let mut model: BTreeMap<Vec<u8>, u64> =
            keys.iter().enumerate().map(|(i, k)| (k.clone(), i as u64)).collect();

        for key in perm {
            trie = trie.remove(&key);
            model.remove(&key);
            validate_trie(&trie);
            assert_matches_model(&trie, &model, &keys);
        }
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 0);
    });

    // The base version was never touched
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(base.get::<u64>(key), Some(&(i as u64)));
    }
}

#[test]
fn example_scenario() {
    let trie = Trie::new().put("app", 1u32).put("apple", 2u32);
    assert_eq!(trie.get::<u32>("app"), Some(&1));
    assert_eq!(trie.get::<u32>("apple"), Some(&2));
    assert_eq!(trie.get::<u32>("ap"), None);

    let before = trie.clone();
    let trie = trie.remove("app");
    assert_eq!(trie.get::<u32>("app"), None);
    assert_eq!(trie.get::<u32>("apple"), Some(&2));
    assert_eq!(before.get::<u32>("app"), Some(&1));
}
