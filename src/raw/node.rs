use core::borrow::Borrow;

use smallvec::SmallVec;

use super::handle::Handle;

/// Keys held inline before a node spills to the heap. Orders above this still work, the node just
/// stores its keys out of line.
pub(crate) const INLINE_KEYS: usize = 8;

pub(crate) type Keys<K> = SmallVec<[K; INLINE_KEYS]>;
pub(crate) type Children = SmallVec<[Handle; INLINE_KEYS + 1]>;

#[derive(Clone)]
#[allow(clippy::large_enum_variant)]
pub(crate) enum Node<K> {
    Internal(InternalNode<K>),
    Leaf(LeafNode<K>),
}

// B+Tree: internal nodes hold separator keys and one more child than keys.
// Every key under `children[i]` is >= `keys[i - 1]`; keys equal to a separator route right.
#[derive(Clone)]
pub(crate) struct InternalNode<K> {
    parent: Option<Handle>,
    keys: Keys<K>,
    children: Children,
}

// B+Tree: leaves hold the keys themselves and link to the leaf on their right.
#[derive(Clone)]
pub(crate) struct LeafNode<K> {
    parent: Option<Handle>,
    next: Option<Handle>,
    keys: Keys<K>,
}

impl<K> Node<K> {
    /// Creates a new empty leaf node.
    pub(crate) fn new_leaf() -> Self {
        Node::Leaf(LeafNode::new())
    }

    /// Returns true if this is a leaf node.
    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Returns the leaf node, panicking if this is not a leaf.
    pub(crate) fn as_leaf(&self) -> &LeafNode<K> {
        match self {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => panic!("expected leaf node"),
        }
    }

    /// Returns the leaf node mutably, panicking if this is not a leaf.
    pub(crate) fn as_leaf_mut(&mut self) -> &mut LeafNode<K> {
        match self {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => panic!("expected leaf node"),
        }
    }

    /// Returns the internal node, panicking if this is not internal.
    #[cfg(test)]
    pub(crate) fn as_internal(&self) -> &InternalNode<K> {
        match self {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => panic!("expected internal node"),
        }
    }

    /// Returns the internal node mutably, panicking if this is not internal.
    pub(crate) fn as_internal_mut(&mut self) -> &mut InternalNode<K> {
        match self {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => panic!("expected internal node"),
        }
    }

    pub(crate) fn keys(&self) -> &[K] {
        match self {
            Node::Internal(internal) => internal.keys(),
            Node::Leaf(leaf) => leaf.keys(),
        }
    }

    pub(crate) fn key_count(&self) -> usize {
        self.keys().len()
    }

    pub(crate) fn parent(&self) -> Option<Handle> {
        match self {
            Node::Internal(internal) => internal.parent,
            Node::Leaf(leaf) => leaf.parent,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        match self {
            Node::Internal(internal) => internal.parent = parent,
            Node::Leaf(leaf) => leaf.parent = parent,
        }
    }
}

impl<K> InternalNode<K> {
    /// Creates the root that sits above `left` and `right` after the old root split.
    pub(crate) fn new_root(separator: K, left: Handle, right: Handle) -> Self {
        let mut keys = Keys::new();
        keys.push(separator);
        let mut children = Children::new();
        children.push(left);
        children.push(right);
        Self {
            parent: None,
            keys,
            children,
        }
    }

    pub(crate) fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn child_count(&self) -> usize {
        self.children.len()
    }

    pub(crate) fn keys(&self) -> &[K] {
        &self.keys
    }

    #[inline]
    pub(crate) fn child(&self, index: usize) -> Handle {
        self.children[index]
    }

    pub(crate) fn children(&self) -> &[Handle] {
        &self.children
    }

    /// Returns the index of the child to descend into for `key`: the number of separators that
    /// are `<= key`, so a key equal to a separator goes to the child on its right.
    #[inline]
    pub(crate) fn search_child<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.keys.partition_point(|k| k.borrow() <= key)
    }

    /// Returns the position of `child` among this node's children.
    pub(crate) fn position_of(&self, child: Handle) -> Option<usize> {
        self.children.iter().position(|&c| c == child)
    }

    /// Inserts `key` at `index` and `child` immediately to its right.
    pub(crate) fn insert_child(&mut self, index: usize, key: K, child: Handle) {
        self.keys.insert(index, key);
        self.children.insert(index + 1, child);
    }

    /// Splits this node at the midpoint. Returns (`median_key`, `new_node`).
    ///
    /// The median is pushed up: it is removed from this node and not copied into the new one. The
    /// new node takes `keys[mid + 1..]` and `children[mid + 1..]`; moved children still name this
    /// node as their parent until the caller relinks them.
    pub(crate) fn split(&mut self) -> (K, InternalNode<K>) {
        let mid = self.keys.len() / 2;

        let right = InternalNode {
            parent: self.parent,
            keys: self.keys.drain(mid + 1..).collect(),
            children: self.children.drain(mid + 1..).collect(),
        };

        let median_key = self.keys.pop().expect("`InternalNode::split()` - node has no median key!");

        (median_key, right)
    }
}

impl<K> LeafNode<K> {
    /// Creates a new empty leaf node.
    pub(crate) fn new() -> Self {
        Self {
            parent: None,
            next: None,
            keys: Keys::new(),
        }
    }

    pub(crate) fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn keys(&self) -> &[K] {
        &self.keys
    }

    pub(crate) fn next(&self) -> Option<Handle> {
        self.next
    }

    pub(crate) fn set_next(&mut self, next: Option<Handle>) {
        self.next = next;
    }

    /// Returns true if some stored key compares equal to `key`.
    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.keys.binary_search_by(|k| k.borrow().cmp(key)).is_ok()
    }

    /// Inserts `key` before the first stored key that is not less than it, so a duplicate lands
    /// in front of the keys equal to it. Returns the insertion index.
    pub(crate) fn insert_in_leaf(&mut self, key: K) -> usize
    where
        K: Ord,
    {
        let index = self.keys.partition_point(|k| *k < key);
        self.keys.insert(index, key);
        index
    }

    /// Splits this leaf at the midpoint. Returns (`separator`, `new_node`).
    ///
    /// The new leaf takes `keys[mid..]` and is spliced into the chain right after this one by the
    /// caller. The separator is a copy of the new leaf's first key, which stays in the leaf.
    pub(crate) fn split(&mut self) -> (K, LeafNode<K>)
    where
        K: Clone,
    {
        let mid = self.keys.len() / 2;

        let right = LeafNode {
            parent: self.parent,
            next: self.next,
            keys: self.keys.drain(mid..).collect(),
        };

        let separator = right.keys.first().cloned().expect("`LeafNode::split()` - new leaf is empty!");

        (separator, right)
    }
}
