//! Copying trees.
//!
//! `clone` always builds a fresh copy of the node graph. `clone_from` tries to reuse the nodes
//! the destination already has, picking the first of these that applies:
//!
//! 1. The source has a single node: keep the destination's root node (if any), overwrite its
//!    value and free everything below it.
//! 2. The destination has a single node: overwrite its value and clone only the source's two
//!    subtrees underneath it.
//! 3. Both trees have the same number of nodes: walk both in order and overwrite the values one
//!    by one. Nothing is allocated or freed. The destination keeps its own shape, the matching
//!    node count is taken as a sign that it is close enough to the source's. If a value's
//!    `clone_from` panics partway through, the destination is cleared.
//! 4. Otherwise clear the destination and clone the whole source.
//!
//! Whichever case applies, the destination ends up with the same values in the same order as the
//! source.

use std::mem;
use std::ptr::NonNull;

use super::cursor::successor;
use super::node::{Link, Node};
use super::Tree;

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        match self.root {
            // SAFETY: `root` is live while `self` is borrowed.
            Some(root) => unsafe { Self::clone_subtree(root) },
            None => Self::new(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        let Some(source_root) = source.root else {
            self.clear();
            return;
        };

        // SAFETY: `source_root` is live while `source` is borrowed, and `self` is a different tree
        // (we hold `&mut self` and `&source` at once), so writing to our nodes never touches the
        // nodes we read from.
        unsafe {
            if source.len == 1 {
                self.assign_single(source_root);
            } else if self.len == 1 {
                self.assign_into_single(source_root, source.len);
            } else if self.len == source.len {
                self.assign_in_order(source_root);
            } else {
                self.clear();
                *self = Self::clone_subtree(source_root);
            }
        }
    }
}

impl<T> Tree<T>
where
    T: Clone,
{
    /// Copies the subtree rooted at `source` into a new tree.
    ///
    /// The copy is built inside the returned `Tree` from the start, so if cloning a value panics,
    /// the nodes copied so far are freed when the partial tree is dropped.
    ///
    /// # Safety
    ///
    /// `source` and all of its descendants must be live for the duration of the call.
    unsafe fn clone_subtree(source: NonNull<Node<T>>) -> Self {
        let mut tree = Self::new();
        let root = Node::alloc((*source.as_ptr()).value.clone());
        tree.root = Some(root);
        tree.len = 1;

        let mut stack = vec![(source, root)];
        while let Some((from, to)) = stack.pop() {
            if let Some(left) = (*from.as_ptr()).left {
                let copy = Node::push_left(to, (*left.as_ptr()).value.clone());
                tree.len += 1;
                stack.push((left, copy));
            }
            if let Some(right) = (*from.as_ptr()).right {
                let copy = Node::push_right(to, (*right.as_ptr()).value.clone());
                tree.len += 1;
                stack.push((right, copy));
            }
        }

        tree
    }

    /// Copies the subtree rooted at `source` (if any) and hands over its root, detached from the
    /// temporary tree that built it, along with its node count.
    ///
    /// # Safety
    ///
    /// See [`Tree::clone_subtree`].
    unsafe fn clone_detached(source: Link<T>) -> (Link<T>, usize) {
        match source {
            Some(source) => {
                let mut copy = Self::clone_subtree(source);
                let len = copy.len;
                copy.len = 0;
                (copy.root.take(), len)
            }
            None => (None, 0),
        }
    }

    /// Case 1: the source holds exactly one value.
    ///
    /// # Safety
    ///
    /// `source_root` must be a live node without children that does not belong to `self`.
    unsafe fn assign_single(&mut self, source_root: NonNull<Node<T>>) {
        let source_value = &(*source_root.as_ptr()).value;
        match self.root {
            Some(root) => {
                // Free both subtrees before touching the value, so a panicking `clone_from`
                // leaves a consistent one node tree behind.
                let root_ptr = root.as_ptr();
                self.len = 1;
                if let Some(left) = (*root_ptr).left.take() {
                    Node::free_subtree(left);
                }
                if let Some(right) = (*root_ptr).right.take() {
                    Node::free_subtree(right);
                }
                (*root_ptr).value.clone_from(source_value);
            }
            None => {
                self.root = Some(Node::alloc(source_value.clone()));
                self.len = 1;
            }
        }
    }

    /// Case 2: `self` holds exactly one value and the source holds `source_len` > 1.
    ///
    /// # Safety
    ///
    /// `source_root` must be a live node that does not belong to `self`, heading a tree of
    /// `source_len` nodes.
    unsafe fn assign_into_single(&mut self, source_root: NonNull<Node<T>>, source_len: usize) {
        let Some(root) = self.root else {
            unreachable!("a tree with one value has a root");
        };
        debug_assert!((*root.as_ptr()).left.is_none() && (*root.as_ptr()).right.is_none());

        let source = &*source_root.as_ptr();
        (*root.as_ptr()).value.clone_from(&source.value);

        let (left, left_len) = Self::clone_detached(source.left);
        Node::attach_left(root, left);
        self.len += left_len;

        let (right, right_len) = Self::clone_detached(source.right);
        Node::attach_right(root, right);
        self.len += right_len;

        debug_assert_eq!(self.len, source_len);
    }

    /// Case 3: both trees hold the same number of values. Overwrites our values in order.
    ///
    /// # Safety
    ///
    /// `source_root` must be a live node that does not belong to `self`, heading a tree of
    /// `self.len` nodes.
    unsafe fn assign_in_order(&mut self, source_root: NonNull<Node<T>>) {
        let mut to = self.root.map(|root| Node::leftmost(root));
        let mut from = Some(Node::leftmost(source_root));

        // Half old, half new values are out of order, so a panicking `clone_from` empties the tree.
        let guard = ClearOnUnwind(self);
        while let (Some(to_node), Some(from_node)) = (to, from) {
            (*to_node.as_ptr())
                .value
                .clone_from(&(*from_node.as_ptr()).value);
            to = successor(to_node);
            from = successor(from_node);
        }
        mem::forget(guard);

        debug_assert!(to.is_none() && from.is_none());
    }
}

/// Clears the tree when dropped. Forgotten once the tree is consistent again.
struct ClearOnUnwind<'a, T>(&'a mut Tree<T>);

impl<'a, T> Drop for ClearOnUnwind<'a, T> {
    fn drop(&mut self) {
        self.0.clear();
    }
}
