use core::fmt;
use core::iter::FusedIterator;
use core::slice;

use crate::raw::{Handle, Node, RawBPlusTree};

/// A read-only view of one node of a [`BPlusTree`](crate::BPlusTree).
///
/// This is the surface external components walk: down through [`children`](NodeRef::children),
/// up through [`parent`](NodeRef::parent), and across the leaf level through
/// [`next`](NodeRef::next). A `NodeRef` borrows the tree, so the tree cannot change while one is
/// alive.
///
/// # Examples
///
/// ```
/// use bplus_chain::BPlusTree;
///
/// let mut tree = BPlusTree::new(3).unwrap();
/// tree.extend([1, 2, 3]);
///
/// let root = tree.root();
/// assert!(root.is_internal());
/// let left = root.child(0).unwrap();
/// assert!(left.is_leaf());
/// assert_eq!(left.parent(), Some(root));
/// assert_eq!(left.next(), root.child(1));
/// ```
pub struct NodeRef<'a, K> {
    tree: &'a RawBPlusTree<K>,
    handle: Handle,
}

impl<'a, K> NodeRef<'a, K> {
    pub(crate) fn new(tree: &'a RawBPlusTree<K>, handle: Handle) -> Self {
        NodeRef { tree, handle }
    }

    fn node(&self) -> &'a Node<K> {
        self.tree.node(self.handle)
    }

    /// Returns true for a leaf, which holds keys and no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    /// Returns true for an internal node, which holds separator keys and one more child than keys.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        !self.is_leaf()
    }

    /// The keys of this node in ascending order. For an internal node these are separators: keys
    /// equal to `keys()[i]` are found under `child(i + 1)`.
    #[must_use]
    pub fn keys(&self) -> &'a [K] {
        self.node().keys()
    }

    /// Returns the number of keys in this node.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.node().key_count()
    }

    /// Returns the number of children; always `key_count() + 1` for internal nodes and 0 for leaves.
    #[must_use]
    pub fn child_count(&self) -> usize {
        match self.node() {
            Node::Internal(internal) => internal.child_count(),
            Node::Leaf(_) => 0,
        }
    }

    /// Returns the child at `index`, or `None` for a leaf or an out-of-range index.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<NodeRef<'a, K>> {
        match self.node() {
            Node::Internal(internal) => {
                let handle = *internal.children().get(index)?;
                Some(NodeRef::new(self.tree, handle))
            }
            Node::Leaf(_) => None,
        }
    }

    /// Returns an iterator over this node's children, left to right. Empty for a leaf.
    pub fn children(&self) -> Children<'a, K> {
        let handles: &'a [Handle] = match self.node() {
            Node::Internal(internal) => internal.children(),
            Node::Leaf(_) => &[],
        };
        Children {
            tree: self.tree,
            inner: handles.iter(),
        }
    }

    /// Returns the leaf immediately to the right of this one, or `None` for the rightmost leaf
    /// and for internal nodes.
    #[must_use]
    pub fn next(&self) -> Option<NodeRef<'a, K>> {
        match self.node() {
            Node::Leaf(leaf) => leaf.next().map(|handle| NodeRef::new(self.tree, handle)),
            Node::Internal(_) => None,
        }
    }

    /// Returns the node this one hangs from, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeRef<'a, K>> {
        self.node().parent().map(|handle| NodeRef::new(self.tree, handle))
    }
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeRef<'_, K> {}

/// Two views are equal when they name the same node of the same tree.
impl<K> PartialEq for NodeRef<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.handle == other.handle
    }
}

impl<K> Eq for NodeRef<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for NodeRef<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("leaf", &self.is_leaf())
            .field("keys", &self.keys())
            .finish()
    }
}

/// An iterator over the children of a node.
///
/// This `struct` is created by the [`children`](NodeRef::children) method on [`NodeRef`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Children<'a, K> {
    tree: &'a RawBPlusTree<K>,
    inner: slice::Iter<'a, Handle>,
}

impl<'a, K> Iterator for Children<'a, K> {
    type Item = NodeRef<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|&handle| NodeRef::new(self.tree, handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for Children<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|&handle| NodeRef::new(self.tree, handle))
    }
}

impl<K> ExactSizeIterator for Children<'_, K> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K> FusedIterator for Children<'_, K> {}

impl<K> Clone for Children<'_, K> {
    fn clone(&self) -> Self {
        Children {
            tree: self.tree,
            inner: self.inner.clone(),
        }
    }
}
