//! An in-memory B+Tree with a configurable order and a linked leaf level.
//!
//! This crate provides [`BPlusTree`], the insertion core of the index structures used by storage
//! engines:
//!
//! - Keys are kept sorted in the leaves; internal nodes hold separator keys and one more child
//!   than keys.
//! - A node splits once it holds [`order`](Config::order) keys. Leaf splits copy the separator up,
//!   internal splits push it up, and a split of the root adds one level for every leaf at once.
//! - Leaves are chained left to right, so an ordered scan is a walk from
//!   [`first_leaf`](BPlusTree::first_leaf) along [`next`](NodeRef::next).
//!
//! # Example
//!
//! ```
//! use bplus_chain::BPlusTree;
//!
//! let mut tree = BPlusTree::new(4).unwrap();
//! for key in 1..=10 {
//!     tree.insert(key);
//! }
//!
//! // Four leaf splits overflowed the root, which split in turn.
//! let root = tree.root();
//! assert_eq!(root.keys(), &[7]);
//! assert_eq!(root.child(0).unwrap().keys(), &[3, 5]);
//! assert_eq!(root.child(1).unwrap().keys(), &[9]);
//! assert_eq!(tree.height(), 3);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Arena-backed** - Nodes live in one arena; parent, child and sibling links are handles, so
//!   the crate needs no `unsafe` and no reference counting
//! - **`tracing`** (cargo feature) - Emits `tracing` events for inserts and splits
//!
//! # Scope
//!
//! The tree supports insertion and point lookup. It has no deletion, and no key iterators beyond
//! the leaf chain exposed through [`NodeRef`].

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod raw;
mod tracing_helpers;

pub mod bplus_tree;
pub mod config;
pub mod error;

pub use bplus_tree::{BPlusTree, NodeRef};
pub use config::{Config, DuplicatePolicy};
pub use error::{Error, Result};
