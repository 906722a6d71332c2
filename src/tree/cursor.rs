//! Positions inside a [`Tree`] and the iterators built on them.
//!
//! None of these types keep a stack of the nodes above them. Stepping to the next or previous
//! value is worked out from the parent and child links of the current node alone, which is what
//! lets a cursor be a single pointer and lets [`CursorMut::erase`] keep walking after it removes
//! a node.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use super::node::{Link, Node};
use super::Tree;

/// Returns the node holding the next value in ascending order, or `None` if `node` holds the
/// greatest value.
///
/// # Safety
///
/// `node` must be a live node whose ancestors are all live.
pub(crate) unsafe fn successor<T>(node: NonNull<Node<T>>) -> Link<T> {
    if let Some(right) = (*node.as_ptr()).right {
        return Some(Node::leftmost(right));
    }

    // Climb until we come up out of a left subtree. Running out of parents means `node` was the
    // last node.
    let mut current = node;
    while Node::is_right_child(current) {
        current = (*current.as_ptr()).parent?;
    }
    (*current.as_ptr()).parent
}

/// Returns the node holding the previous value in ascending order, or `None` if `node` holds
/// the least value.
///
/// # Safety
///
/// `node` must be a live node whose ancestors are all live.
pub(crate) unsafe fn predecessor<T>(node: NonNull<Node<T>>) -> Link<T> {
    if let Some(left) = (*node.as_ptr()).left {
        return Some(Node::rightmost(left));
    }

    let mut current = node;
    while Node::is_left_child(current) {
        current = (*current.as_ptr()).parent?;
    }
    (*current.as_ptr()).parent
}

/// A read-only position in a [`Tree`].
///
/// A cursor either points at one value of the tree or is at the end position, which sits past
/// the greatest value (and, going backwards, before the least one). Two cursors are equal when
/// they point at the same node or are both at the end.
///
/// # Examples
///
/// ```
/// use linked_bst::Tree;
///
/// let tree: Tree<_> = vec![5, 3, 8].into_iter().collect();
///
/// let mut cursor = tree.begin();
/// assert_eq!(cursor.get(), Some(&3));
/// cursor.move_next();
/// assert_eq!(cursor.get(), Some(&5));
/// cursor.move_next();
/// cursor.move_next();
/// assert_eq!(cursor, tree.end());
/// ```
pub struct Cursor<'a, T> {
    node: Link<T>,
    _marker: PhantomData<&'a Node<T>>,
}

impl<'a, T> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Cursor<'a, T> {}

impl<'a, T> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<'a, T> Eq for Cursor<'a, T> {}

impl<'a, T> fmt::Debug for Cursor<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

// SAFETY: A `Cursor` only hands out `&T`, so it can cross threads exactly when `&T` can.
unsafe impl<'a, T: Sync> Send for Cursor<'a, T> {}
unsafe impl<'a, T: Sync> Sync for Cursor<'a, T> {}

impl<'a, T> Cursor<'a, T> {
    /// Creates a cursor at `node`.
    ///
    /// The caller must make sure `node` is `None` or a node of a tree that stays borrowed for `'a`.
    pub(crate) fn new(node: Link<T>) -> Self {
        Self {
            node,
            _marker: PhantomData,
        }
    }

    /// Returns the value under the cursor, or `None` at the end position.
    pub fn get(&self) -> Option<&'a T> {
        // SAFETY: The tree is borrowed for `'a` so the node is live and nobody can mutate it.
        self.node.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Returns true if the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Moves to the next value in ascending order. Moving past the greatest value lands on the
    /// end position; moving from the end position stays there.
    pub fn move_next(&mut self) {
        if let Some(node) = self.node {
            // SAFETY: The borrowed tree is not mutated while the cursor lives.
            self.node = unsafe { successor(node) };
        }
    }

    /// Moves to the previous value in ascending order. Moving before the least value lands on the
    /// end position; moving from the end position stays there.
    pub fn move_prev(&mut self) {
        if let Some(node) = self.node {
            // SAFETY: The borrowed tree is not mutated while the cursor lives.
            self.node = unsafe { predecessor(node) };
        }
    }

    pub(crate) fn node(&self) -> Link<T> {
        self.node
    }
}

/// A position in a [`Tree`] that holds the tree's unique borrow, so it can also erase the value
/// it points at.
///
/// Values can only be read through a `CursorMut`: changing one in place could break the ordering
/// of the tree.
pub struct CursorMut<'a, T> {
    tree: &'a mut Tree<T>,
    node: Link<T>,
}

impl<'a, T> fmt::Debug for CursorMut<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.get()).finish()
    }
}

// SAFETY: A `CursorMut` is a `&mut Tree<T>` plus a position in that tree.
unsafe impl<'a, T: Send> Send for CursorMut<'a, T> {}
unsafe impl<'a, T: Sync> Sync for CursorMut<'a, T> {}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(tree: &'a mut Tree<T>, node: Link<T>) -> Self {
        Self { tree, node }
    }

    /// Returns the value under the cursor, or `None` at the end position.
    pub fn get(&self) -> Option<&T> {
        // SAFETY: The node belongs to `self.tree`, which we borrow.
        self.node.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Returns true if the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Moves to the next value in ascending order. See [`Cursor::move_next`].
    pub fn move_next(&mut self) {
        if let Some(node) = self.node {
            // SAFETY: `node` is a live node of `self.tree`.
            self.node = unsafe { successor(node) };
        }
    }

    /// Moves to the previous value in ascending order. See [`Cursor::move_prev`].
    pub fn move_prev(&mut self) {
        if let Some(node) = self.node {
            // SAFETY: `node` is a live node of `self.tree`.
            self.node = unsafe { predecessor(node) };
        }
    }

    /// Returns a read-only cursor at the same position, borrowing from this one.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.node)
    }

    /// Converts into a read-only cursor at the same position for the rest of the borrow.
    pub fn into_cursor(self) -> Cursor<'a, T> {
        Cursor::new(self.node)
    }

    /// Removes the value under the cursor from the tree and returns it. The cursor moves on to
    /// the next value in ascending order (or the end position if there is none).
    ///
    /// At the end position nothing happens and `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_> = vec![5, 3, 8, 1, 4].into_iter().collect();
    ///
    /// let mut cursor = tree.find_mut(&3);
    /// assert_eq!(cursor.erase(), Some(3));
    /// assert_eq!(cursor.get(), Some(&4));
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 4, 5, 8]);
    /// ```
    pub fn erase(&mut self) -> Option<T> {
        let node = self.node?;
        // SAFETY: `node` is a live node of `self.tree`. The successor is found before any link
        // changes, and `unlink` never frees anything but `node` so it stays valid afterwards.
        unsafe {
            self.node = successor(node);
            Some(self.tree.unlink(node))
        }
    }
}

/// An iterator over the values of a [`Tree`] in ascending order.
///
/// Created by [`Tree::iter`].
pub struct Iter<'a, T> {
    front: Link<T>,
    back: Link<T>,
    remaining: usize,
    _marker: PhantomData<&'a Node<T>>,
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T> fmt::Debug for Iter<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

// SAFETY: An `Iter` only hands out `&T`, so it can cross threads exactly when `&T` can.
unsafe impl<'a, T: Sync> Send for Iter<'a, T> {}
unsafe impl<'a, T: Sync> Sync for Iter<'a, T> {}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(front: Link<T>, back: Link<T>, len: usize) -> Self {
        Self {
            front,
            back,
            remaining: len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front?;
        self.remaining -= 1;
        // SAFETY: The tree is borrowed for `'a` and `remaining` keeps `front` from running past
        // `back`, so `node` is live.
        unsafe {
            self.front = successor(node);
            Some(&(*node.as_ptr()).value)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back?;
        self.remaining -= 1;
        // SAFETY: See `next`.
        unsafe {
            self.back = predecessor(node);
            Some(&(*node.as_ptr()).value)
        }
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// An owning iterator over the values of a [`Tree`] in ascending order.
///
/// Each step unlinks the least remaining node, so the tree shrinks as it is consumed. Created by
/// the `IntoIterator` impl of [`Tree`].
pub struct IntoIter<T> {
    tree: Tree<T>,
    front: Link<T>,
}

impl<T> fmt::Debug for IntoIter<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.tree).finish()
    }
}

// SAFETY: An `IntoIter` owns a `Tree<T>` plus a position inside that tree.
unsafe impl<T: Send> Send for IntoIter<T> {}
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> IntoIter<T> {
    pub(crate) fn new(tree: Tree<T>) -> Self {
        let front = tree.begin().node();
        Self { tree, front }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.front?;
        // SAFETY: `node` is the least live node of `self.tree`. Its successor is found before it
        // is unlinked and `unlink` frees nothing else.
        unsafe {
            self.front = successor(node);
            Some(self.tree.unlink(node))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
