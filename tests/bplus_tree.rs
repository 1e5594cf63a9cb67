use std::collections::BTreeSet;

use bplus_chain::{BPlusTree, Config, DuplicatePolicy, Error};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

mod common;

use common::{assert_shape, chain_keys, init_tracing, leaves_by_descent};

fn tree_of(order: usize, keys: impl IntoIterator<Item = i64>) -> BPlusTree<i64> {
    let mut tree = BPlusTree::new(order).unwrap();
    for key in keys {
        tree.insert(key);
    }
    tree
}

// ─── Construction ────────────────────────────────────────────────────────────

#[test]
fn order_below_three_is_a_configuration_error() {
    init_tracing();
    assert_eq!(BPlusTree::<i64>::new(2).err(), Some(Error::InvalidOrder { order: 2, min: 3 }));
    assert_eq!(BPlusTree::<i64>::new(0).err(), Some(Error::InvalidOrder { order: 0, min: 3 }));
}

#[test]
fn fresh_tree_is_one_empty_leaf() {
    let tree: BPlusTree<i64> = BPlusTree::new(3).unwrap();
    let root = tree.root();
    assert!(root.is_leaf());
    assert!(root.keys().is_empty());
    assert_eq!(root, tree.first_leaf());
    assert_eq!(tree.height(), 1);
    assert_eq!(tree.len(), 0);
    assert!(chain_keys(&tree).is_empty());
}

// ─── Split scenarios ─────────────────────────────────────────────────────────

#[test]
fn order_four_mixed_inserts_split_the_root_leaf() {
    init_tracing();
    let tree = tree_of(4, [10, 20, 5, 15]);

    assert_eq!(chain_keys(&tree), vec![5, 10, 15, 20]);
    let root = tree.root();
    assert_eq!(root.keys(), &[15]);
    assert_eq!(root.child(0).unwrap().keys(), &[5, 10]);
    assert_eq!(root.child(1).unwrap().keys(), &[15, 20]);
    assert_shape(&tree);
}

#[test]
fn order_three_leaf_split_copies_separator_up() {
    let tree = tree_of(3, [1, 2, 3]);

    let root = tree.root();
    assert!(root.is_internal());
    assert_eq!(root.keys(), &[2]);
    let left = root.child(0).unwrap();
    let right = root.child(1).unwrap();
    assert_eq!(left.keys(), &[1]);
    assert_eq!(right.keys(), &[2, 3]);
    assert_eq!(left.next(), Some(right));
    assert_eq!(right.next(), None);
    assert_eq!(chain_keys(&tree), vec![1, 2, 3]);
}

#[test]
fn filling_a_fresh_root_splits_exactly_once() {
    for order in 3..=16usize {
        let tree = tree_of(order, (0..order as i64).collect::<Vec<_>>());

        let root = tree.root();
        assert_eq!(root.key_count(), 1, "order {order}");
        assert_eq!(root.child_count(), 2, "order {order}");
        assert!(root.children().all(|child| child.is_leaf()), "order {order}");
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.node_count(), 3);
    }
}

#[test]
fn order_four_internal_split_pushes_median_up() {
    init_tracing();
    let tree = tree_of(4, 1..=10);

    let root = tree.root();
    assert_eq!(root.keys(), &[7]);
    let left = root.child(0).unwrap();
    let right = root.child(1).unwrap();
    assert!(left.is_internal() && right.is_internal());
    assert_eq!(left.keys(), &[3, 5]);
    assert_eq!(right.keys(), &[9]);
    // Push-up: the promoted key lives only in the new root.
    assert!(!left.keys().contains(&7));
    assert!(!right.keys().contains(&7));
    assert_eq!(tree.height(), 3);
    assert_eq!(chain_keys(&tree), (1..=10).collect::<Vec<_>>());
    assert_shape(&tree);
}

#[test]
fn demo_sequence_builds_a_valid_tree() {
    let keys = [10, 20, 5, 15, 12, 30, 25, 22, 35, 36, 37, 38, 39];
    let mut tree = BPlusTree::new(4).unwrap();
    for key in keys {
        tree.insert(key);
        assert_shape(&tree);
    }

    let mut sorted = keys.to_vec();
    sorted.sort_unstable();
    assert_eq!(chain_keys(&tree), sorted);
    assert_eq!(tree.len(), keys.len());
}

#[test]
fn descending_inserts_grow_on_the_left() {
    let tree = tree_of(5, (0..200).rev());
    assert_shape(&tree);
    assert_eq!(chain_keys(&tree), (0..200).collect::<Vec<_>>());
    assert!(tree.height() > 3);
}

// ─── Routing ─────────────────────────────────────────────────────────────────

#[test]
fn keys_equal_to_a_separator_are_found_right_of_it() {
    let tree = tree_of(3, 0..60);

    let mut stack = vec![tree.root()];
    while let Some(node) = stack.pop() {
        if node.is_leaf() {
            continue;
        }
        for (i, separator) in node.keys().iter().enumerate() {
            let mut cursor = node.child(i + 1).unwrap();
            while cursor.is_internal() {
                let index = cursor.keys().partition_point(|k| k <= separator);
                cursor = cursor.child(index).unwrap();
            }
            assert!(cursor.keys().contains(separator), "separator {separator} not right of itself");
        }
        stack.extend(node.children());
    }

    for key in 0..60 {
        assert!(tree.contains(&key));
    }
    assert!(!tree.contains(&60));
    assert!(!tree.contains(&-1));
}

// ─── Duplicates ──────────────────────────────────────────────────────────────

#[test]
fn duplicates_are_kept_with_multiplicity() {
    let tree = tree_of(3, [4, 4, 1, 4, 9, 4, 1, 4]);

    assert_eq!(chain_keys(&tree), vec![1, 1, 4, 4, 4, 4, 4, 9]);
    assert_eq!(tree.len(), 8);
    assert!(tree.contains(&4));
    assert_shape(&tree);
}

#[test]
fn one_repeated_key_still_splits_evenly() {
    let tree = tree_of(4, std::iter::repeat_n(7, 50));

    assert_eq!(chain_keys(&tree), vec![7; 50]);
    assert_shape(&tree);
    assert!(leaves_by_descent(&tree).iter().all(|(leaf, _)| leaf.key_count() >= 1));
}

#[test]
fn ignore_policy_gives_set_semantics() {
    let config = Config::new(3).unwrap().with_duplicates(DuplicatePolicy::Ignore);
    let mut tree = BPlusTree::with_config(config);

    assert!(tree.insert("b"));
    assert!(tree.insert("a"));
    assert!(!tree.insert("b"));
    assert!(tree.insert("c"));
    assert!(!tree.insert("a"));

    assert_eq!(chain_keys(&tree), vec!["a", "b", "c"]);
    assert_eq!(tree.len(), 3);
}

// ─── Lifecycle ───────────────────────────────────────────────────────────────

#[test]
fn clear_keeps_configuration() {
    let config = Config::new(5).unwrap().with_duplicates(DuplicatePolicy::Ignore);
    let mut tree = BPlusTree::with_config(config);
    tree.extend(0..100);
    tree.clear();

    assert!(tree.is_empty());
    assert_eq!(tree.height(), 1);
    assert_eq!(tree.config(), &config);
    tree.extend([3, 3, 1]);
    assert_eq!(chain_keys(&tree), vec![1, 3]);
}

#[test]
fn node_capacity_is_preallocated() {
    let mut tree = BPlusTree::with_node_capacity(Config::new(4).unwrap(), 128);
    let capacity = tree.node_capacity();
    assert!(capacity >= 128);

    tree.extend(0..100);
    assert!(tree.node_count() <= capacity);
    assert_eq!(tree.node_capacity(), capacity);
}

#[test]
fn string_keys() {
    let mut tree = BPlusTree::new(3).unwrap();
    for word in ["pear", "apple", "fig", "kiwi", "banana", "cherry", "date"] {
        tree.insert(word.to_string());
    }
    assert!(tree.contains("kiwi"));
    assert!(!tree.contains("mango"));
    assert_eq!(chain_keys(&tree), vec!["apple", "banana", "cherry", "date", "fig", "kiwi", "pear"]);
    assert_shape(&tree);
}

// ─── Randomized ──────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// The leaf chain always equals the sorted multiset of inserted keys.
    #[test]
    fn chain_is_sorted_multiset(
        order in 3usize..10,
        keys in prop::collection::vec(-300i64..300, 0..600),
    ) {
        let tree = tree_of(order, keys.iter().copied());

        let mut expected = keys.clone();
        expected.sort_unstable();
        prop_assert_eq!(chain_keys(&tree), expected);
        prop_assert_eq!(tree.len(), keys.len());
        assert_shape(&tree);
    }

    /// Shape invariants hold after every single insert, not only at the end.
    #[test]
    fn shape_holds_after_each_insert(
        order in 3usize..6,
        keys in prop::collection::vec(any::<i16>(), 1..150),
    ) {
        let mut tree = BPlusTree::new(order).unwrap();
        for key in keys {
            tree.insert(key);
            assert_shape(&tree);
        }
    }

    /// Set semantics agree with `BTreeSet`, including the insert result.
    #[test]
    fn ignore_policy_matches_btreeset(
        order in 3usize..8,
        keys in prop::collection::vec(0u32..100, 0..400),
    ) {
        let config = Config::new(order).unwrap().with_duplicates(DuplicatePolicy::Ignore);
        let mut tree = BPlusTree::with_config(config);
        let mut model = BTreeSet::new();

        for key in keys {
            prop_assert_eq!(tree.insert(key), model.insert(key), "insert({})", key);
        }

        prop_assert_eq!(chain_keys(&tree), model.iter().copied().collect::<Vec<_>>());
        for probe in 0..100 {
            prop_assert_eq!(tree.contains(&probe), model.contains(&probe));
        }
    }
}
