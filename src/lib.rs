/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

#![cfg_attr(feature = "fatal-warnings", deny(warnings))]
#![no_std]

// Note: Keep this in sync with `README.md`.  Note that the doc links must be removed.
//! # Top-down red-black tree
//!
//! An ordered container of unique payloads implemented as a
//! [red-black tree](https://en.wikipedia.org/wiki/Red%E2%80%93black_tree) whose insertion and
//! deletion restore balance in a single top-down pass, without recursion and without parent
//! links.  It is meant as a building block for indexes, sets and maps.
//!
//! # Overview
//!
//!   1. [`RedBlackTree`](#redblacktree): the tree handle, holding the node arena and the
//!      comparator.
//!   2. [`Traversal`](#traversal): a cursor that walks the tree in order, in either direction,
//!      using an explicit ancestor stack.
//!
//! ## `RedBlackTree`
//!
//! Payloads are ordered by a [`Comparator`], by default their [`Ord`] implementation.  Inserting
//! a payload equal to a stored one keeps the stored payload and hands the new one back;
//! erasing returns the removed payload.
//!
//! ### Example
//!
//! ```rust
//! use topdown_rbtree::{Insertion, RedBlackTree};
//!
//! let mut tree = RedBlackTree::new();
//!
//! for key in [10, 5, 15, 3, 7] {
//!     tree.insert(key).unwrap();
//! }
//!
//! assert!(matches!(tree.insert(7), Ok(Insertion::Present { rejected: 7, .. })));
//! assert_eq!(tree.find(&5), Some(&5));
//!
//! assert_eq!(tree.erase(&3), Some(3));
//! assert_eq!(tree.erase(&3), None);
//!
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![5, 7, 10, 15]);
//! ```
//!
//! ## `Traversal`
//!
//! ### Example
//!
//! ```rust
//! use topdown_rbtree::{rbtree, Traversal};
//!
//! let tree = rbtree!["b", "c", "a"];
//! let mut traversal = Traversal::new();
//!
//! assert_eq!(traversal.last(&tree), Some(&"c"));
//! assert_eq!(traversal.prev(), Some(&"b"));
//! assert_eq!(traversal.prev(), Some(&"a"));
//! assert_eq!(traversal.prev(), None);
//! ```

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod compare;
pub mod entry;
pub mod error;
pub mod traversal;
pub mod tree;

mod utils;

pub use crate::compare::{Comparator, Natural};
pub use crate::entry::Entry;
pub use crate::error::InsertError;
pub use crate::traversal::{Iter, Traversal, TraversalState};
pub use crate::tree::{Insertion, NodeId, RedBlackTree, MAX_HEIGHT};
