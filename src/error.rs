//! Error types for `bplus_chain`.

/// Convenient Result type alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced by tree construction.
///
/// Insertion itself cannot fail: every split either completes or indicates a bug, since no
/// external resource is acquired along the way.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested order cannot produce two non-empty nodes when a full node splits.
    #[error("invalid order {order}: a B+Tree needs an order of at least {min}")]
    InvalidOrder {
        /// The rejected order.
        order: usize,
        /// The smallest accepted order.
        min: usize,
    },
}
