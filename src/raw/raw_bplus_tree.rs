use core::borrow::Borrow;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Children, InternalNode, Node};
use crate::config::{Config, DuplicatePolicy};
use crate::tracing_helpers::{debug_log, trace_log};

/// The core B+Tree implementation backing `BPlusTree`.
///
/// Handles are arena indices, so a derived slot-for-slot clone keeps every link valid.
#[derive(Clone)]
pub(crate) struct RawBPlusTree<K> {
    /// Arena owning every node; all links between nodes are handles into it.
    nodes: Arena<Node<K>>,
    /// Handle to the root node. Starts as an empty leaf and changes only when the root splits.
    root: Handle,
    /// Handle to the leftmost leaf. Splits always append to the right, so this never changes.
    first_leaf: Handle,
    /// Total number of keys stored in the leaves.
    len: usize,
    /// Number of levels, counting the leaf level.
    height: usize,
    config: Config,
}

impl<K> RawBPlusTree<K> {
    /// Creates a tree holding a single empty leaf as its root.
    pub(crate) fn new(config: Config) -> Self {
        let mut nodes = Arena::new();
        let root = nodes.alloc(Node::new_leaf());
        Self {
            nodes,
            root,
            first_leaf: root,
            len: 0,
            height: 1,
            config,
        }
    }

    /// Creates a tree like [`RawBPlusTree::new`] with room for `nodes` nodes up front.
    pub(crate) fn with_node_capacity(config: Config, nodes: usize) -> Self {
        let mut nodes = Arena::with_capacity(nodes.max(1));
        let root = nodes.alloc(Node::new_leaf());
        Self {
            nodes,
            root,
            first_leaf: root,
            len: 0,
            height: 1,
            config,
        }
    }

    pub(crate) fn node_capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) const fn height(&self) -> usize {
        self.height
    }

    pub(crate) const fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) const fn root(&self) -> Handle {
        self.root
    }

    pub(crate) const fn first_leaf(&self) -> Handle {
        self.first_leaf
    }

    /// Returns the number of nodes allocated for this tree.
    pub(crate) const fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<K> {
        self.nodes.get(handle)
    }

    /// Drops every node and starts over with a single empty root leaf.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.alloc(Node::new_leaf());
        self.first_leaf = self.root;
        self.len = 0;
        self.height = 1;
    }

    /// Descends from the root to the leaf responsible for `key`.
    ///
    /// At each internal node the child index is the number of separators `<= key`, so keys equal
    /// to a separator are routed to its right.
    pub(crate) fn find_leaf<Q>(&self, key: &Q) -> Handle
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Node::Internal(internal) = self.nodes.get(current) {
            current = internal.child(internal.search_child(key));
        }
        current
    }

    /// Returns true if the tree stores a key equal to `key`.
    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.nodes.get(self.find_leaf(key)).as_leaf().contains(key)
    }
}

impl<K: Ord + Clone> RawBPlusTree<K> {
    /// Inserts `key` into its leaf and splits upward as far as needed.
    ///
    /// Returns `false` only when the duplicate policy is [`DuplicatePolicy::Ignore`] and an equal
    /// key is already stored.
    pub(crate) fn insert(&mut self, key: K) -> bool {
        let order = self.config.order();
        let leaf_handle = self.find_leaf(&key);
        let leaf = self.nodes.get_mut(leaf_handle).as_leaf_mut();

        if self.config.duplicates() == DuplicatePolicy::Ignore && leaf.contains(&key) {
            trace_log!(leaf = ?leaf_handle, "insert: duplicate ignored");
            return false;
        }

        let _index = leaf.insert_in_leaf(key);
        self.len += 1;
        trace_log!(leaf = ?leaf_handle, index = _index, keys = leaf.key_count(), "insert: key placed");

        if leaf.key_count() >= order {
            self.split_leaf(leaf_handle);
        }

        true
    }

    /// Splits a full leaf, links the new leaf after it and promotes a copy of the new leaf's
    /// first key.
    fn split_leaf(&mut self, leaf_handle: Handle) {
        let leaf = self.nodes.get_mut(leaf_handle).as_leaf_mut();
        let (separator, right_leaf) = leaf.split();

        debug_log!(
            leaf = ?leaf_handle,
            left_keys = leaf.key_count(),
            right_keys = right_leaf.key_count(),
            "split_leaf"
        );

        // `right_leaf` already inherited `leaf.next`; close the chain behind it.
        let right_handle = self.nodes.alloc(Node::Leaf(right_leaf));
        self.nodes.get_mut(leaf_handle).as_leaf_mut().set_next(Some(right_handle));

        self.promote(leaf_handle, separator, right_handle);
    }

    /// Inserts `separator` and `right` into the parent of `left`, splitting internal nodes up the
    /// parent chain until one absorbs the promotion or a new root is created.
    fn promote(&mut self, mut left: Handle, mut separator: K, mut right: Handle) {
        let order = self.config.order();

        loop {
            let Some(parent_handle) = self.nodes.get(left).parent() else {
                self.create_new_root(left, separator, right);
                return;
            };

            let parent = self.nodes.get_mut(parent_handle).as_internal_mut();
            let index = parent
                .position_of(left)
                .expect("`RawBPlusTree::promote()` - `left` is not a child of its parent!");
            parent.insert_child(index, separator, right);
            let parent_full = parent.key_count() >= order;

            self.nodes.get_mut(right).set_parent(Some(parent_handle));

            if !parent_full {
                return;
            }

            let (median, sibling) = self.split_internal(parent_handle);
            left = parent_handle;
            separator = median;
            right = sibling;
        }
    }

    /// Splits a full internal node, pushing its median key out of both halves. Returns the median
    /// and the handle of the new right-hand node, whose children are relinked to it.
    fn split_internal(&mut self, node_handle: Handle) -> (K, Handle) {
        let node = self.nodes.get_mut(node_handle).as_internal_mut();
        let (median, right_node) = node.split();

        debug_log!(
            node = ?node_handle,
            left_keys = node.key_count(),
            right_keys = right_node.key_count(),
            "split_internal"
        );

        let moved: Children = right_node.children().iter().copied().collect();
        let right_handle = self.nodes.alloc(Node::Internal(right_node));
        for child in moved {
            self.nodes.get_mut(child).set_parent(Some(right_handle));
        }

        (median, right_handle)
    }

    /// Grows the tree by one level above `left` and `right`.
    fn create_new_root(&mut self, left: Handle, separator: K, right: Handle) {
        let new_root = self.nodes.alloc(Node::Internal(InternalNode::new_root(separator, left, right)));
        self.nodes.get_mut(left).set_parent(Some(new_root));
        self.nodes.get_mut(right).set_parent(Some(new_root));
        self.root = new_root;
        self.height += 1;

        debug_log!(root = ?new_root, height = self.height, "create_new_root");
    }
}
