//! This crate exposes a Binary Search Tree (BST) whose nodes link back to their parent, for use as
//! the storage underneath ordered set and map types.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! may have up to two child `Node`s. The invariants of this BST are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have a value
//!    less than its own value.
//! 2. For every `Node`, all the `Node`s in its right subtree have a value
//!    greater than or equal to its own value. Equal values are only present
//!    when the caller asks for them.
//! 3. Every `Node` except the root knows its parent, and the parent of a
//!    `Node` is exactly the `Node` that has it as a child.
//!
//! Invariant 3 is what makes [`Cursor`]s cheap: the next or previous value
//! can be reached from any `Node` by following links, without remembering
//! the path from the root.
//!
//! The tree does not balance itself. Searching takes `O(height)`, and the
//! height depends on the order values were inserted in: it is `O(lg N)` for
//! random insertion order and `O(N)` for sorted input.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod tree;


pub use tree::{Cursor, CursorMut, IntoIter, Iter, Tree};
