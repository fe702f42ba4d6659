use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use osrb_tree::{Direction, MergePolicy, OSRBTree, Order, Policy, Put, Rank, Removed};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 1_000;

/// Keys to look up or remove, over a range narrow enough to chain values.
fn key_strategy() -> impl Strategy<Value = i64> {
    -300i64..300i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

fn policy_strategy() -> impl Strategy<Value = Policy> {
    prop_oneof![
        Just(Policy::Repeat),
        Just(Policy::Unique),
        Just(Policy::Replace),
        Just(Policy::DeepReplace),
    ]
}

/// The reference model: every key's chain, newest value first.
type Model = BTreeMap<i64, Vec<i64>>;

fn model_of(entries: &[(i64, i64)]) -> Model {
    let mut model = Model::new();
    for &(k, v) in entries {
        model.entry(k).or_default().insert(0, v);
    }
    model
}

fn tree_of(entries: &[(i64, i64)]) -> OSRBTree<i64, i64> {
    entries.iter().copied().collect()
}

/// Every chain entry in rank order.
fn flatten(model: &Model) -> Vec<(i64, i64)> {
    model.iter().flat_map(|(&k, chain)| chain.iter().map(move |&v| (k, v))).collect()
}

fn tree_flatten(tree: &OSRBTree<i64, i64>) -> Vec<(i64, i64)> {
    tree.iter().flat_map(|(&k, values)| values.map(move |&v| (k, v))).collect()
}

/// Removes one value from the model the way `remove_one`/`remove_by_rank` report it.
fn model_take(model: &mut Model, key: i64, offset: usize) -> Removed<i64, i64> {
    let chain = model.get_mut(&key).unwrap();
    if chain.len() > 1 {
        return Removed::Value(chain.remove(offset));
    }
    let value = chain.pop();
    model.remove(&key);
    Removed::Entry(key, value)
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(i64, i64),
    InsertKey(i64),
    Put(i64, i64, Policy),
    RemoveOne(i64),
    RemoveAll(i64),
    RemoveByRank(usize),
    Get(i64),
    GetAll(i64),
    Floor(i64),
    Ceiling(i64),
    PopFirst,
    PopLast,
}

fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        6 => (key_strategy(), value_strategy()).prop_map(|(k, v)| TreeOp::Insert(k, v)),
        1 => key_strategy().prop_map(TreeOp::InsertKey),
        3 => (key_strategy(), value_strategy(), policy_strategy()).prop_map(|(k, v, p)| TreeOp::Put(k, v, p)),
        3 => key_strategy().prop_map(TreeOp::RemoveOne),
        1 => key_strategy().prop_map(TreeOp::RemoveAll),
        2 => (0usize..TEST_SIZE).prop_map(TreeOp::RemoveByRank),
        1 => key_strategy().prop_map(TreeOp::Get),
        1 => key_strategy().prop_map(TreeOp::GetAll),
        1 => key_strategy().prop_map(TreeOp::Floor),
        1 => key_strategy().prop_map(TreeOp::Ceiling),
        1 => Just(TreeOp::PopFirst),
        1 => Just(TreeOp::PopLast),
    ]
}

// ─── Core operations ─────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both OSRBTree and the model, checking
    /// results, counts and every structural invariant at every step.
    #[test]
    fn tree_ops_match_model(ops in proptest::collection::vec(tree_op_strategy(), TEST_SIZE)) {
        let mut tree: OSRBTree<i64, i64> = OSRBTree::new();
        let mut model = Model::new();

        for op in &ops {
            match *op {
                TreeOp::Insert(k, v) => {
                    let was_new = !model.contains_key(&k);
                    model.entry(k).or_default().insert(0, v);
                    prop_assert_eq!(tree.insert(k, v), was_new, "insert({}, {})", k, v);
                }
                TreeOp::InsertKey(k) => {
                    let expected = if model.contains_key(&k) {
                        Put::Rejected { key: k, value: None }
                    } else {
                        model.insert(k, Vec::new());
                        Put::Inserted
                    };
                    prop_assert_eq!(tree.insert_key(k), expected, "insert_key({})", k);
                }
                TreeOp::Put(k, v, policy) => {
                    let expected = match model.get_mut(&k) {
                        None => {
                            model.insert(k, vec![v]);
                            Put::Inserted
                        }
                        Some(chain) => match policy {
                            Policy::Repeat => {
                                chain.insert(0, v);
                                Put::Chained
                            }
                            Policy::Unique => Put::Rejected { key: k, value: Some(v) },
                            Policy::Replace | Policy::DeepReplace => {
                                let displaced = if chain.is_empty() {
                                    chain.push(v);
                                    None
                                } else {
                                    Some(std::mem::replace(&mut chain[0], v))
                                };
                                Put::Replaced(if policy == Policy::Replace { displaced } else { None })
                            }
                        },
                    };
                    prop_assert_eq!(tree.put(k, v, policy), expected, "put({}, {}, {:?})", k, v, policy);
                }
                TreeOp::RemoveOne(k) => {
                    let expected = model.contains_key(&k).then(|| model_take(&mut model, k, 0));
                    prop_assert_eq!(tree.remove_one(&k), expected, "remove_one({})", k);
                }
                TreeOp::RemoveAll(k) => {
                    let expected = model.remove(&k).map(|chain| (k, chain));
                    prop_assert_eq!(tree.remove_all(&k), expected, "remove_all({})", k);
                }
                TreeOp::RemoveByRank(rank) => {
                    let mut seen = 0;
                    let mut target = None;
                    for (&k, chain) in &model {
                        if rank < seen + chain.len() {
                            target = Some((k, rank - seen));
                            break;
                        }
                        seen += chain.len();
                    }
                    let expected = target.map(|(k, offset)| model_take(&mut model, k, offset));
                    prop_assert_eq!(tree.remove_by_rank(rank), expected, "remove_by_rank({})", rank);
                }
                TreeOp::Get(k) => {
                    prop_assert_eq!(tree.get(&k), model.get(&k).and_then(|chain| chain.first()), "get({})", k);
                    prop_assert_eq!(tree.contains_key(&k), model.contains_key(&k));
                    prop_assert_eq!(tree.chain_len(&k), model.get(&k).map(Vec::len));
                }
                TreeOp::GetAll(k) => {
                    let values = tree.get_all(&k).map(|values| values.copied().collect::<Vec<_>>());
                    prop_assert_eq!(values.as_ref(), model.get(&k), "get_all({})", k);
                }
                TreeOp::Floor(k) => {
                    prop_assert_eq!(tree.floor(&k), model.range(..=k).next_back().map(|(k, _)| k), "floor({})", k);
                }
                TreeOp::Ceiling(k) => {
                    prop_assert_eq!(tree.ceiling(&k), model.range(k..).next().map(|(k, _)| k), "ceiling({})", k);
                }
                TreeOp::PopFirst => prop_assert_eq!(tree.pop_first(), model.pop_first()),
                TreeOp::PopLast => prop_assert_eq!(tree.pop_last(), model.pop_last()),
            }

            prop_assert_eq!(tree.check(), Ok(()), "after {:?}", op);
            prop_assert_eq!(tree.len(), model.values().map(Vec::len).sum::<usize>());
            prop_assert_eq!(tree.key_count(), model.len());
            prop_assert_eq!(tree.is_empty(), model.is_empty());
        }

        prop_assert_eq!(tree.first_key(), model.keys().next());
        prop_assert_eq!(tree.last_key(), model.keys().next_back());
    }

    /// Iteration yields every key once, in order, with its chain newest first.
    #[test]
    fn iter_matches_model(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let tree = tree_of(&entries);
        let model = model_of(&entries);

        prop_assert_eq!(tree_flatten(&tree), flatten(&model));
        prop_assert_eq!(tree.iter().len(), model.len());

        let backwards: Vec<i64> = tree.iter().rev().map(|(k, _)| *k).collect();
        let expected: Vec<i64> = model.keys().rev().copied().collect();
        prop_assert_eq!(backwards, expected);

        let owned: Vec<(i64, Vec<i64>)> = tree.into_iter().collect();
        let expected: Vec<(i64, Vec<i64>)> = model.into_iter().collect();
        prop_assert_eq!(owned, expected);
    }

    /// Meeting in the middle from both ends visits each key exactly once.
    #[test]
    fn iter_double_ended_meets(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE), take_front in 0usize..TEST_SIZE) {
        let tree = tree_of(&entries);
        let mut iter = tree.iter();
        let mut seen = Vec::new();
        for _ in 0..take_front.min(iter.len()) {
            seen.push(*iter.next().unwrap().0);
        }
        let mut back: Vec<i64> = iter.by_ref().rev().map(|(k, _)| *k).collect();
        back.reverse();
        seen.extend(back);

        let expected: Vec<i64> = model_of(&entries).keys().copied().collect();
        prop_assert_eq!(seen, expected);
        prop_assert!(iter.next().is_none());
    }

    /// Inclusive ranges match the model, with swapped bounds normalized.
    #[test]
    fn range_matches_model(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE),
        a in key_strategy(),
        b in key_strategy(),
    ) {
        let tree = tree_of(&entries);
        let model = model_of(&entries);
        let (low, high) = (a.min(b), a.max(b));

        let expected: Vec<i64> = model.range(low..=high).map(|(k, _)| *k).collect();
        let forward: Vec<i64> = tree.range(&a, &b).map(|(k, _)| *k).collect();
        let swapped: Vec<i64> = tree.range(&b, &a).map(|(k, _)| *k).collect();
        let backward: Vec<i64> = tree.range(&a, &b).rev().map(|(k, _)| *k).collect();

        prop_assert_eq!(&forward, &expected);
        prop_assert_eq!(&swapped, &expected);
        prop_assert_eq!(backward, expected.into_iter().rev().collect::<Vec<_>>());
    }

    #[test]
    fn get_mut_updates_front(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE),
        keys_to_mutate in proptest::collection::vec(key_strategy(), 100),
    ) {
        let mut tree = tree_of(&entries);
        let mut model = model_of(&entries);

        for k in keys_to_mutate {
            if let Some(v) = tree.get_mut(&k) {
                *v = v.wrapping_add(1);
            }
            if let Some(v) = model.get_mut(&k).and_then(|chain| chain.first_mut()) {
                *v = v.wrapping_add(1);
            }
        }
        prop_assert_eq!(tree_flatten(&tree), flatten(&model));
    }
}

// ─── Order statistics ────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// `select` and `get_by_rank` agree with the flattened model at every rank.
    #[test]
    fn select_matches_model(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let tree = tree_of(&entries);
        let flat = flatten(&model_of(&entries));

        for (rank, (k, v)) in flat.iter().enumerate() {
            prop_assert_eq!(tree.select(rank), Some(k));
            prop_assert_eq!(tree.get_by_rank(rank), Some((k, v)));
            prop_assert_eq!(&tree[Rank(rank)], k);
        }
        prop_assert_eq!(tree.select(flat.len()), None);
        prop_assert_eq!(tree.get_by_rank(flat.len()), None);
    }

    /// A key's rank is the first rank it covers, and it covers `chain_len` ranks.
    #[test]
    fn rank_of_select_roundtrip(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let tree = tree_of(&entries);

        for rank in 0..tree.len() {
            let key = *tree.select(rank).unwrap();
            let start = tree.rank_of(&key).unwrap();
            let len = tree.chain_len(&key).unwrap();
            prop_assert!(start <= rank && rank < start + len);
        }
    }

    #[test]
    fn rank_of_matches_model(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE), probes in proptest::collection::vec(key_strategy(), 100)) {
        let tree = tree_of(&entries);
        let model = model_of(&entries);

        for k in probes {
            let expected = model.contains_key(&k).then(|| model.range(..k).map(|(_, chain)| chain.len()).sum::<usize>());
            prop_assert_eq!(tree.rank_of(&k), expected);
        }
    }
}

// ─── Traversals and walks ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn traversals_visit_every_key_once(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let tree = tree_of(&entries);
        let keys: Vec<i64> = model_of(&entries).keys().copied().collect();

        let mut in_order = Vec::new();
        tree.traverse(Order::InOrder, |k, _| in_order.push(*k));
        prop_assert_eq!(&in_order, &keys);

        for order in [Order::PreOrder, Order::PostOrder, Order::LevelOrder] {
            let mut visited = Vec::new();
            let mut values = 0;
            tree.traverse(order, |k, chain| {
                visited.push(*k);
                values += chain.len();
            });
            prop_assert_eq!(values, tree.len());
            visited.sort_unstable();
            prop_assert_eq!(&visited, &keys);
        }
    }

    #[test]
    fn walks_follow_direction(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE), threshold in value_strategy()) {
        let tree = tree_of(&entries);
        let model = model_of(&entries);
        let ascending = flatten(&model);
        let descending: Vec<(i64, i64)> = model
            .iter()
            .rev()
            .flat_map(|(&k, chain)| chain.iter().map(move |&v| (k, v)))
            .collect();

        let mut walked = Vec::new();
        tree.walk(Direction::Ascending, |&k, &v| walked.push((k, v)));
        prop_assert_eq!(&walked, &ascending);

        walked.clear();
        tree.walk(Direction::Descending, |&k, &v| walked.push((k, v)));
        prop_assert_eq!(&walked, &descending);

        let first_above = descending.iter().find(|(_, v)| *v > threshold);
        let found = tree.walk_break_if_true(Direction::Descending, |_, &v| v > threshold);
        prop_assert_eq!(found, first_above.map(|(k, v)| (k, v)));

        let first_not_below = ascending.iter().find(|(_, v)| *v >= threshold);
        let found = tree.walk_break_if_false(Direction::Ascending, |_, &v| v < threshold);
        prop_assert_eq!(found, first_not_below.map(|(k, v)| (k, v)));
    }
}

// ─── Bulk operations ─────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// A copy is valid, equal, and independent of its source.
    #[test]
    fn copy_roundtrip(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut tree = tree_of(&entries);
        let copy = tree.try_copy().unwrap();
        let cloned = tree.clone();

        prop_assert!(copy.is_valid());
        prop_assert_eq!(&copy, &tree);
        prop_assert_eq!(&cloned, &tree);
        for (k, values) in &tree {
            let original: Vec<_> = values.collect();
            let copied: Vec<_> = copy.get_all(k).unwrap().collect();
            prop_assert_eq!(original, copied);
        }

        tree.clear();
        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree_flatten(&copy), flatten(&model_of(&entries)));
    }

    #[test]
    fn unique_is_idempotent(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut tree = tree_of(&entries);
        let model = model_of(&entries);

        let dropped = tree.unique();
        prop_assert_eq!(dropped, entries.len() - model.len());
        prop_assert!(tree.is_valid());
        let once = tree.clone();

        prop_assert_eq!(tree.unique(), 0);
        prop_assert_eq!(&tree, &once);

        let expected: Vec<(i64, i64)> = model.iter().map(|(&k, chain)| (k, chain[0])).collect();
        prop_assert_eq!(tree_flatten(&tree), expected);
    }

    #[test]
    fn unique_into_moves_tails(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut tree = tree_of(&entries);
        let mut collector = OSRBTree::new();
        let model = model_of(&entries);

        let moved = tree.unique_into(&mut collector).unwrap();
        prop_assert_eq!(moved, entries.len() - model.len());
        prop_assert!(tree.is_valid());
        prop_assert!(collector.is_valid());

        let tails: Model = model
            .iter()
            .filter(|(_, chain)| chain.len() > 1)
            .map(|(&k, chain)| (k, chain[1..].to_vec()))
            .collect();
        prop_assert_eq!(tree_flatten(&collector), flatten(&tails));
    }

    #[test]
    fn merge_matches_model(
        entries_a in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE / 2),
        entries_b in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE / 2),
        repeat in any::<bool>(),
    ) {
        let mut a = tree_of(&entries_a);
        let mut b = tree_of(&entries_b);
        let mut model = model_of(&entries_a);
        let policy = if repeat { MergePolicy::Repeat } else { MergePolicy::Unique };

        for (k, mut chain) in model_of(&entries_b) {
            match model.get_mut(&k) {
                Some(existing) if repeat => {
                    chain.append(existing);
                    *existing = chain;
                }
                Some(_) => {}
                None => {
                    model.insert(k, chain);
                }
            }
        }

        a.merge(&mut b, policy).unwrap();
        prop_assert!(b.is_empty());
        prop_assert!(a.is_valid());
        prop_assert_eq!(tree_flatten(&a), flatten(&model));
    }
}

// ─── Concrete scenarios ──────────────────────────────────────────────────────

#[test]
fn scenario_string_keys_rank_and_select() {
    let mut tree = OSRBTree::new();
    for key in ["5", "3", "8", "1", "9", "4", "6"] {
        tree.insert(key, ());
    }
    assert!(tree.is_valid());
    assert_eq!(tree.rank_of(&"6"), Some(4));
    assert_eq!(tree.select(0), Some(&"1"));
}

#[test]
fn scenario_value_less_repeats_collapse() {
    let mut tree = OSRBTree::new();
    for _ in 0..3 {
        tree.insert("5", ());
    }
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.key_count(), 1);

    assert_eq!(tree.remove_one(&"5"), Some(Removed::Value(())));
    assert!(tree.is_valid());
    assert_eq!(tree.remove_one(&"5"), Some(Removed::Value(())));
    assert!(tree.is_valid());
    assert_eq!(tree.remove_one(&"5"), Some(Removed::Entry("5", Some(()))));
    assert!(tree.is_valid());
    assert!(tree.is_empty());
}

#[test]
fn scenario_chains_are_newest_first() {
    let mut tree = OSRBTree::new();
    for key in ["g", "k", "r"] {
        tree.insert(key, format!("v{key}1"));
        tree.insert(key, format!("v{key}2"));
    }
    let g: Vec<&String> = tree.get_all(&"g").unwrap().collect();
    assert_eq!(g, ["vg2", "vg1"]);
    assert_eq!(tree.len(), 6);
}

#[test]
fn scenario_alphabet_range_either_way() {
    let tree: OSRBTree<String, ()> = ('a'..='z').map(|c| (c.to_string(), ())).collect();
    let (g, r) = (String::from("g"), String::from("r"));

    let forward: Vec<&str> = tree.range(&g, &r).map(|(k, _)| k.as_str()).collect();
    let swapped: Vec<&str> = tree.range(&r, &g).map(|(k, _)| k.as_str()).collect();
    assert_eq!(forward, ["g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r"]);
    assert_eq!(swapped, forward);
}

#[test]
fn scenario_merge_policies() {
    let a = || OSRBTree::from([("a", 0), ("b", 0), ("c", 0)]);
    let b = || OSRBTree::from([("a", 1), ("b", 1), ("c", 1), ("d", 1)]);

    let mut target = a();
    target.merge(&mut b(), MergePolicy::Unique).unwrap();
    assert_eq!(target.len(), 4);
    assert_eq!(target.get(&"a"), Some(&0));

    let mut target = a();
    target.merge(&mut b(), MergePolicy::Repeat).unwrap();
    assert_eq!(target.len(), 7);
    assert_eq!(target.get_all(&"b").unwrap().copied().collect::<Vec<_>>(), [1, 0]);
}

// ─── Comparators and trait impls ─────────────────────────────────────────────

#[test]
fn closure_comparator_uses_captured_context() {
    let modulus = 10;
    let mut tree = OSRBTree::with_comparator(move |a: &u32, b: &u32| (a % modulus).cmp(&(b % modulus)));
    for n in [13, 21, 3, 45, 33] {
        tree.insert(n, n);
    }

    // 13, 3 and 33 share a residue, so they share a node keyed by the first of them.
    assert_eq!(tree.key_count(), 3);
    assert_eq!(tree.iter().map(|(k, _)| *k).collect::<Vec<_>>(), [21, 13, 45]);
    assert_eq!(tree.get_all(&3).unwrap().copied().collect::<Vec<_>>(), [33, 3, 13]);
    assert_eq!(tree.rank_of(&45), Some(4));
    assert!(tree.is_valid());
}

#[test]
fn debug_lists_chains() {
    let tree = OSRBTree::from([(1, 'a'), (2, 'c'), (1, 'b')]);
    assert_eq!(format!("{tree:?}"), "{1: ['b', 'a'], 2: ['c']}");
}

#[test]
fn default_iterators_are_empty() {
    let iter: osrb_tree::osrb_tree::Iter<'_, u8, u8> = Default::default();
    assert_eq!(iter.len(), 0);
    let range: osrb_tree::osrb_tree::Range<'_, u8, u8> = Default::default();
    assert_eq!(range.count(), 0);
    let into_iter: osrb_tree::osrb_tree::IntoIter<u8, u8> = Default::default();
    assert_eq!(into_iter.len(), 0);
}

#[test]
fn with_capacity_reports_capacity() {
    let tree: OSRBTree<u8, u8> = OSRBTree::with_capacity(64);
    assert!(tree.capacity() >= 64);
    let tree: OSRBTree<u8, u8, _> = OSRBTree::with_capacity_and_comparator(8, |a: &u8, b: &u8| b.cmp(a));
    assert!(tree.capacity() >= 8);
    assert!(tree.is_empty());
}

/// Empties a tree from both ends without naming its comparator type.
fn pop_both_ends<K, V, C>(tree: &mut OSRBTree<K, V, C>) -> Vec<(K, Vec<V>)> {
    let mut popped = Vec::new();
    while let Some(first) = tree.pop_first() {
        popped.push(first);
        if let Some(last) = tree.pop_last() {
            popped.push(last);
        }
    }
    popped
}

#[test]
fn pops_work_for_any_comparator() {
    let mut tree = OSRBTree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    for (k, v) in [(1, 'a'), (3, 'b'), (2, 'c'), (3, 'd')] {
        tree.insert(k, v);
    }
    assert_eq!(pop_both_ends(&mut tree), [(3, vec!['d', 'b']), (1, vec!['a']), (2, vec!['c'])]);
    assert!(tree.is_empty());
    assert!(tree.is_valid());
}
