//! Shared helpers for the integration tests.
//!
//! Run with `RUST_LOG=bplus_chain=debug cargo test --features tracing` to see split events.

#![allow(dead_code)]

use std::sync::Once;

use bplus_chain::{BPlusTree, NodeRef};
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs a test-writer subscriber filtered by `RUST_LOG`. Only the first call has an effect.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}

/// Collects every key by walking the leaf chain from the leftmost leaf.
pub fn chain_keys<K: Clone>(tree: &BPlusTree<K>) -> Vec<K> {
    let mut keys = Vec::new();
    let mut leaf = Some(tree.first_leaf());
    while let Some(node) = leaf {
        assert!(node.is_leaf(), "leaf chain reached an internal node");
        keys.extend_from_slice(node.keys());
        leaf = node.next();
    }
    keys
}

/// Collects the leaves reachable from the root, left to right, with their depth.
pub fn leaves_by_descent<'a, K>(tree: &'a BPlusTree<K>) -> Vec<(NodeRef<'a, K>, usize)> {
    fn walk<'a, K>(node: NodeRef<'a, K>, depth: usize, out: &mut Vec<(NodeRef<'a, K>, usize)>) {
        if node.is_leaf() {
            out.push((node, depth));
        } else {
            for child in node.children() {
                walk(child, depth + 1, out);
            }
        }
    }

    let mut out = Vec::new();
    walk(tree.root(), 0, &mut out);
    out
}

/// Asserts the structural invariants visible through the public API:
/// child/key counts, node sizes, parent links, uniform leaf depth, separator bounds and a leaf
/// chain that matches the tree's left-to-right leaf order.
pub fn assert_shape<K: Ord + Clone + std::fmt::Debug>(tree: &BPlusTree<K>) {
    fn check<K: Ord + std::fmt::Debug>(
        node: NodeRef<'_, K>,
        is_root: bool,
        order: usize,
        lower: Option<&K>,
        upper: Option<&K>,
    ) {
        let keys = node.keys();
        assert!(keys.windows(2).all(|w| w[0] <= w[1]), "unsorted node {node:?}");
        assert!(keys.len() < order, "node {node:?} has {} keys with order {order}", keys.len());
        assert!(is_root || !keys.is_empty(), "empty non-root node");
        if let Some(lower) = lower {
            assert!(keys.iter().all(|k| k >= lower), "{node:?} below separator {lower:?}");
        }
        if let Some(upper) = upper {
            assert!(keys.iter().all(|k| k <= upper), "{node:?} above separator {upper:?}");
        }

        if node.is_internal() {
            assert_eq!(node.child_count(), keys.len() + 1, "child count of {node:?}");
            for (i, child) in node.children().enumerate() {
                assert_eq!(child.parent(), Some(node), "stale parent link under {node:?}");
                let child_lower = if i == 0 { lower } else { keys.get(i - 1) };
                let child_upper = keys.get(i).or(upper);
                check(child, false, order, child_lower, child_upper);
            }
        }
    }

    let root = tree.root();
    assert_eq!(root.parent(), None);
    check(root, true, tree.order(), None, None);

    let leaves = leaves_by_descent(tree);
    assert!(leaves.iter().all(|&(_, depth)| depth + 1 == tree.height()), "leaves at uneven depth");

    let mut chained = Vec::new();
    let mut leaf = Some(tree.first_leaf());
    while let Some(node) = leaf {
        chained.push(node);
        leaf = node.next();
    }
    let descended: Vec<NodeRef<'_, K>> = leaves.into_iter().map(|(node, _)| node).collect();
    assert_eq!(chained, descended, "leaf chain disagrees with tree order");
}
