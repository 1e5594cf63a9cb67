use super::BPlusTree;
use crate::config::Config;
use crate::raw::RawBPlusTree;

impl<K> BPlusTree<K> {
    /// Creates an empty tree with room for at least `nodes` nodes before its node storage
    /// reallocates.
    ///
    /// Every split allocates one node, plus one more when the root splits, so a tree holding `n`
    /// keys in full leaves needs roughly `n / (order / 2)` nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use bplus_chain::{BPlusTree, Config};
    ///
    /// let tree: BPlusTree<i32> = BPlusTree::with_node_capacity(Config::new(8).unwrap(), 64);
    /// assert!(tree.is_empty());
    /// assert!(tree.node_capacity() >= 64);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(nodes) for memory allocation.
    #[must_use]
    pub fn with_node_capacity(config: Config, nodes: usize) -> Self {
        BPlusTree {
            raw: RawBPlusTree::with_node_capacity(config, nodes),
        }
    }

    /// Returns how many nodes the tree can hold before its node storage reallocates.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn node_capacity(&self) -> usize {
        self.raw.node_capacity()
    }

    /// Returns the number of nodes currently in the tree, leaves and internal nodes alike.
    ///
    /// # Examples
    ///
    /// ```
    /// use bplus_chain::BPlusTree;
    ///
    /// let mut tree = BPlusTree::new(3).unwrap();
    /// assert_eq!(tree.node_count(), 1);
    /// tree.extend([1, 2, 3]);
    /// // Two leaves under a new root.
    /// assert_eq!(tree.node_count(), 3);
    /// ```
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.raw.node_count()
    }
}
