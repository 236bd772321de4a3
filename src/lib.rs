//! This crate exposes a Binary Search Tree (BST) ordered by a
//! caller-supplied comparison function rather than by the element type's
//! [`Ord`] impl.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and remove stored elements. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` owns one element and
//! sometimes has child `Node`s. The most important invariants of this tree
//! are:
//!
//! 1. For every `Node`, no element in its left subtree compares greater
//!    than its own element. Equal elements land on the left, so the tree
//!    keeps duplicates instead of overwriting them.
//! 2. For every `Node`, every element in its right subtree compares
//!    strictly greater than its own element.
//!
//! > Note that "compares" always means the ordering function the tree was
//! > built with. The element type itself needs no `Ord` impl.
//!
//! The benefits of these invariants are many. For instance, searching for
//! elements takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). This tree performs no
//! rebalancing, so the height is bounded only by the number of insertions;
//! feeding it already-sorted input degrades it into a linked list. BSTs
//! also naturally support sorted iteration by visiting the left subtree,
//! then the subtree root, then the right subtree. That traversal is exposed
//! both as a callback walk ([`Tree::for_each`]) and as a borrowing iterator
//! ([`Tree::iter`]).
//!
//! Elements are destroyed when they are removed and when the tree itself is
//! cleared or dropped. A tree built with [`Tree::with_cleanup`] runs a hook
//! exactly once per destroyed element, just before that element's storage
//! is released.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod tree;

#[cfg(test)]
mod test;

pub use self::tree::{Iter, Tree};
