use crate::error::{Error, Result};

/// How a tree treats a key that compares equal to one it already stores.
///
/// # Examples
///
/// ```
/// use bplus_chain::{BPlusTree, Config, DuplicatePolicy};
///
/// let config = Config::new(4).unwrap().with_duplicates(DuplicatePolicy::Ignore);
/// let mut tree = BPlusTree::with_config(config);
/// assert!(tree.insert(7));
/// assert!(!tree.insert(7));
/// assert_eq!(tree.len(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum DuplicatePolicy {
    /// Multiset semantics: every inserted key is stored, equal keys included.
    #[default]
    Allow,
    /// Set semantics: inserting a key equal to a stored key leaves the tree untouched.
    Ignore,
}

/// Construction-time settings shared by every node of a tree.
///
/// A `Config` can only be built with a valid order, so a tree created from one never has to
/// re-check it.
///
/// # Examples
///
/// ```
/// use bplus_chain::{Config, DuplicatePolicy, Error};
///
/// let config = Config::new(5).unwrap();
/// assert_eq!(config.order(), 5);
/// assert_eq!(config.duplicates(), DuplicatePolicy::Allow);
///
/// assert_eq!(Config::new(2), Err(Error::InvalidOrder { order: 2, min: 3 }));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Config {
    order: usize,
    duplicates: DuplicatePolicy,
}

impl Config {
    /// The smallest order for which splitting a full node leaves both halves non-empty.
    pub const MIN_ORDER: usize = 3;

    /// The order used by [`Config::default`].
    pub const DEFAULT_ORDER: usize = 32;

    /// Creates a configuration with the given order and [`DuplicatePolicy::Allow`].
    ///
    /// A node splits as soon as it holds `order` keys, so no node is left holding more than
    /// `order - 1` keys once an insertion returns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOrder`] if `order < Config::MIN_ORDER`.
    pub const fn new(order: usize) -> Result<Self> {
        if order < Self::MIN_ORDER {
            return Err(Error::InvalidOrder {
                order,
                min: Self::MIN_ORDER,
            });
        }
        Ok(Self {
            order,
            duplicates: DuplicatePolicy::Allow,
        })
    }

    /// Returns this configuration with the given duplicate policy.
    #[must_use]
    pub const fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// The key count at which a node splits.
    #[must_use]
    pub const fn order(&self) -> usize {
        self.order
    }

    /// How [`insert`](crate::BPlusTree::insert) treats a key equal to one already stored.
    #[must_use]
    pub const fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            order: Self::DEFAULT_ORDER,
            duplicates: DuplicatePolicy::Allow,
        }
    }
}
