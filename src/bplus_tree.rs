use core::borrow::Borrow;
use core::fmt;

use crate::config::Config;
use crate::error::Result;
use crate::raw::RawBPlusTree;

mod capacity;
mod node_ref;

pub use node_ref::{Children, NodeRef};

/// An in-memory B+Tree of keys with a configurable order.
///
/// Keys live only in the leaves, sorted ascending; internal nodes hold copies of keys as
/// separators. A node splits as soon as it holds [`order`](Config::order) keys, so every node has
/// at most `order - 1` keys between insertions and every leaf sits at the same depth. Leaves are
/// linked left to right: starting at [`first_leaf`](BPlusTree::first_leaf) and following
/// [`next`](NodeRef::next) yields all stored keys in non-decreasing order.
///
/// By default equal keys are all kept (multiset semantics); see
/// [`DuplicatePolicy`](crate::DuplicatePolicy) for set semantics.
///
/// It is a logic error for a key to be modified in such a way that its ordering relative to any
/// other key, as determined by the [`Ord`] trait, changes while it is in the tree, or for the
/// [`Ord`] implementation not to be a total order. The resulting tree shape is unspecified, but
/// the behavior is confined to this tree and never memory-unsafe.
///
/// # Examples
///
/// ```
/// use bplus_chain::BPlusTree;
///
/// let mut tree = BPlusTree::new(4).unwrap();
/// for key in [10, 20, 5, 15] {
///     tree.insert(key);
/// }
///
/// // The fourth key filled the root leaf, which split under a new root.
/// assert_eq!(tree.height(), 2);
/// assert_eq!(tree.root().keys(), &[15]);
///
/// let mut keys = Vec::new();
/// let mut leaf = Some(tree.first_leaf());
/// while let Some(node) = leaf {
///     keys.extend_from_slice(node.keys());
///     leaf = node.next();
/// }
/// assert_eq!(keys, [5, 10, 15, 20]);
/// ```
pub struct BPlusTree<K> {
    raw: RawBPlusTree<K>,
}

impl<K> BPlusTree<K> {
    /// Creates an empty tree whose nodes split once they hold `order` keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOrder`](crate::Error::InvalidOrder) if `order < 3`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bplus_chain::{BPlusTree, Error};
    ///
    /// let tree: BPlusTree<u64> = BPlusTree::new(3).unwrap();
    /// assert!(tree.is_empty());
    ///
    /// assert!(matches!(BPlusTree::<u64>::new(2), Err(Error::InvalidOrder { order: 2, .. })));
    /// ```
    pub fn new(order: usize) -> Result<Self> {
        Ok(Self::with_config(Config::new(order)?))
    }

    /// Creates an empty tree with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        BPlusTree {
            raw: RawBPlusTree::new(config),
        }
    }

    /// Returns the number of keys stored in the tree, duplicates included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns true if the tree stores no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of levels, counting the leaves. An empty tree has height 1.
    ///
    /// Height only grows when the root splits, and then grows by one for every leaf at once.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.raw.height()
    }

    /// The key count at which a node splits.
    #[must_use]
    pub const fn order(&self) -> usize {
        self.raw.config().order()
    }

    /// Returns the configuration the tree was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        self.raw.config()
    }

    /// Returns the root node.
    ///
    /// The root starts out as an empty leaf and is replaced by a new internal node each time it
    /// splits.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_, K> {
        NodeRef::new(&self.raw, self.raw.root())
    }

    /// Returns the leftmost leaf, the head of the leaf chain.
    #[must_use]
    pub fn first_leaf(&self) -> NodeRef<'_, K> {
        NodeRef::new(&self.raw, self.raw.first_leaf())
    }

    /// Returns true if the tree stores a key equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bplus_chain::BPlusTree;
    ///
    /// let mut tree: BPlusTree<&str> = BPlusTree::new(3).unwrap();
    /// tree.extend(["apple", "pear", "fig"]);
    /// assert!(tree.contains("fig"));
    /// assert!(!tree.contains("kiwi"));
    /// ```
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains(key)
    }

    /// Removes every key, leaving a single empty root leaf. The configuration is kept.
    pub fn clear(&mut self) {
        self.raw.clear();
    }
}

impl<K: Ord + Clone> BPlusTree<K> {
    /// Inserts a key, splitting full nodes from the target leaf upward.
    ///
    /// Returns `true` if the key was stored. With
    /// [`DuplicatePolicy::Ignore`](crate::DuplicatePolicy::Ignore) a key equal to one already
    /// present is dropped and `false` is returned; with the default policy this always returns
    /// `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bplus_chain::BPlusTree;
    ///
    /// let mut tree = BPlusTree::new(3).unwrap();
    /// tree.insert(1);
    /// tree.insert(2);
    /// tree.insert(3);
    ///
    /// let root = tree.root();
    /// assert_eq!(root.keys(), &[2]);
    /// assert_eq!(root.child(0).unwrap().keys(), &[1]);
    /// assert_eq!(root.child(1).unwrap().keys(), &[2, 3]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(order × log<sub>order</sub>(n)): one descent plus at most one split per level.
    pub fn insert(&mut self, key: K) -> bool {
        self.raw.insert(key)
    }
}

impl<K> Default for BPlusTree<K> {
    /// Creates an empty tree with [`Config::default`].
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

impl<K: Clone> Clone for BPlusTree<K> {
    fn clone(&self) -> Self {
        BPlusTree { raw: self.raw.clone() }
    }
}

impl<K: Ord + Clone> Extend<K> for BPlusTree<K> {
    #[inline]
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K: Ord + Copy + 'a> Extend<&'a K> for BPlusTree<K> {
    fn extend<I: IntoIterator<Item = &'a K>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<K: fmt::Debug> fmt::Debug for BPlusTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BPlusTree")
            .field("config", self.config())
            .field("len", &self.len())
            .field("height", &self.height())
            .field("root", &self.root())
            .finish()
    }
}
