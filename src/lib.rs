//! An order-statistic red-black tree with per-key value chains.
//!
//! This crate provides [`OSRBTree`], an ordered index built on a left-leaning red-black
//! tree. Every key carries a chain of values (newest first), and every node tracks how many
//! values its subtree holds, which gives O(log n) order-statistic operations:
//!
//! - [`select`](OSRBTree::select) - Get the key at a given sorted position
//! - [`rank_of`](OSRBTree::rank_of) - Get the sorted position of a key
//! - [`get_by_rank`](OSRBTree::get_by_rank) - Get the exact value at a sorted position
//! - Indexing by [`Rank`] - e.g., `tree[Rank(0)]` for the smallest key
//!
//! # Example
//!
//! ```
//! use osrb_tree::{OSRBTree, Policy, Put, Rank};
//!
//! let mut tree = OSRBTree::new();
//! for key in [5, 3, 8, 1, 9, 4, 6] {
//!     tree.insert(key, key * 10);
//! }
//! tree.insert(3, 31);
//!
//! // Ranks count values, so key 3 covers two of them.
//! assert_eq!(tree.rank_of(&4), Some(3));
//! assert_eq!(tree[Rank(0)], 1);
//! assert_eq!(tree.select(2), Some(&3));
//!
//! // Duplicate handling is chosen per call.
//! assert_eq!(tree.put(3, 32, Policy::Replace), Put::Replaced(Some(31)));
//! assert!(tree.is_valid());
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Value chains** - Any number of values per key, with insert policies for duplicates
//! - **Custom ordering** - Any [`Comparator`], including closures with captured context
//! - **`tracing`** (default) - Trace and debug events for structural changes and bulk
//!   operations
//!
//! # Implementation
//!
//! Nodes and chain cells live in two arenas addressed by compact handles. Insertion and
//! deletion descend iteratively and then rebalance on the way back up through parent links,
//! so no operation recurses.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod error;
mod order_statistic;
mod policy;
mod raw;
mod traversal;

pub mod osrb_tree;

pub use compare::{Comparator, Natural};
pub use error::{Error, Violation};
pub use order_statistic::Rank;
pub use osrb_tree::OSRBTree;
pub use policy::{MergePolicy, Policy, Put, Removed};
pub use traversal::{Direction, Order};
