//! An unbalanced BST whose nodes know their parent. Similar to the standard library's ordered
//! collections except keeping two children per node instead of an array based `BTree`, and
//! exposing positions in the tree as cursors that can walk in both directions without a stack.
//!
//! # Examples
//!
//! ```
//! use linked_bst::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.find(&1).is_end());
//!
//! let (cursor, inserted) = tree.insert(1, false);
//! assert!(inserted);
//! assert_eq!(cursor.get(), Some(&1));
//!
//! // Duplicates are allowed unless they are explicitly rejected.
//! assert!(tree.insert(1, false).1);
//! assert!(!tree.insert(1, true).1);
//! assert_eq!(tree.len(), 2);
//!
//! // Removing a value returns it.
//! assert_eq!(tree.remove(&1), Some(1));
//! assert_eq!(tree.len(), 1);
//! ```

mod assign;
mod cursor;
mod node;

pub use cursor::{Cursor, CursorMut, IntoIter, Iter};

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use node::{Link, Node};

/// A Binary Search Tree that does not balance itself. It can be used for inserting, finding and
/// erasing values, and for walking them in order from either end.
///
/// For every node, the values in its left subtree are less than its own value and the values in
/// its right subtree are greater than or equal to it. Equal values are allowed (unless rejected
/// at insertion) and always go to the right.
///
/// Since nothing rebalances the tree, its height depends on insertion order: inserting sorted
/// values produces a tree shaped like a linked list, and every operation then costs `O(n)`.
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
    // The tree owns every node through `root`.
    _marker: PhantomData<Box<Node<T>>>,
}

// SAFETY: The tree owns its nodes like a `Box` would and hands out `&T`/`T` only according to the
// usual borrow rules, so it is `Send`/`Sync` whenever `T` is.
unsafe impl<T: Send> Send for Tree<T> {}
unsafe impl<T: Sync> Sync for Tree<T> {}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Tree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Tree<T> {}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of values in the tree.
    ///
    /// Time complexity: `O(1)`
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no values.
    ///
    /// Time complexity: `O(1)`
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.len == 0, self.root.is_none());
        self.len == 0
    }

    /// Returns a cursor at the least value, or the end position if the tree is empty.
    pub fn begin(&self) -> Cursor<'_, T> {
        // SAFETY: The root is live while `self` is borrowed.
        Cursor::new(self.root.map(|root| unsafe { Node::leftmost(root) }))
    }

    /// Returns a cursor at the end position, one past the greatest value.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(None)
    }

    /// Returns a cursor at the greatest value, or the end position if the tree is empty. This is
    /// where walking backwards starts.
    pub fn last(&self) -> Cursor<'_, T> {
        // SAFETY: The root is live while `self` is borrowed.
        Cursor::new(self.root.map(|root| unsafe { Node::rightmost(root) }))
    }

    /// Like [`Tree::begin`] but the cursor can also erase values.
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        let node = self.begin().node();
        CursorMut::new(self, node)
    }

    /// Returns an iterator over the values in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = vec![5, 3, 8, 1, 4].into_iter().collect();
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 8]);
    /// assert_eq!(tree.iter().rev().next(), Some(&8));
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.begin().node(), self.last().node(), self.len)
    }

    /// Inserts `value` into the tree and returns a cursor at it along with whether it was
    /// inserted.
    ///
    /// With `keep_unique` set, a value equal to one already in the tree is not inserted: the
    /// cursor points at the existing value, `false` is returned and `value` is dropped. Otherwise
    /// the value always goes in, to the right of any equal values.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// let (cursor, inserted) = tree.insert("b", true);
    /// assert_eq!((cursor.get(), inserted), (Some(&"b"), true));
    ///
    /// let (cursor, inserted) = tree.insert("b", true);
    /// assert_eq!((cursor.get(), inserted), (Some(&"b"), false));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T, keep_unique: bool) -> (CursorMut<'_, T>, bool)
    where
        T: Ord,
    {
        let mut parent = None;
        let mut went_left = false;
        let mut current = self.root;
        while let Some(node) = current {
            // SAFETY: Nodes reachable from the root are live and nothing else borrows them.
            let node_ref = unsafe { node.as_ref() };
            went_left = match value.cmp(&node_ref.value) {
                Ordering::Equal if keep_unique => return (CursorMut::new(self, Some(node)), false),
                Ordering::Less => true,
                Ordering::Equal | Ordering::Greater => false,
            };
            parent = Some(node);
            current = if went_left {
                node_ref.left
            } else {
                node_ref.right
            };
        }

        let new_node = match parent {
            None => {
                let node = Node::alloc(value);
                self.root = Some(node);
                node
            }
            // SAFETY: The walk stopped because this side of `parent` is empty.
            Some(parent) if went_left => unsafe { Node::push_left(parent, value) },
            Some(parent) => unsafe { Node::push_right(parent, value) },
        };
        self.len += 1;

        if cfg!(debug_assertions) {
            // SAFETY: `new_node` and its parent were just linked and are live.
            unsafe {
                if let Some(parent) = (*new_node.as_ptr()).parent {
                    let (parent, new_node) = (parent.as_ref(), new_node.as_ref());
                    if went_left {
                        assert!(new_node.value < parent.value);
                    } else {
                        assert!(new_node.value >= parent.value);
                    }
                }
            }
        }

        (CursorMut::new(self, Some(new_node)), true)
    }

    /// Returns a cursor at a value equal to `value`, or the end position if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = vec![2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.find(&1).get(), Some(&1));
    /// assert_eq!(tree.find(&42), tree.end());
    /// ```
    pub fn find(&self, value: &T) -> Cursor<'_, T>
    where
        T: Ord,
    {
        Cursor::new(self.find_node(value))
    }

    /// Like [`Tree::find`] but the cursor can also erase the value it finds.
    pub fn find_mut(&mut self, value: &T) -> CursorMut<'_, T>
    where
        T: Ord,
    {
        let node = self.find_node(value);
        CursorMut::new(self, node)
    }

    /// Returns true if the tree holds a value equal to `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: Ord,
    {
        self.find_node(value).is_some()
    }

    /// Removes one value equal to `value` from the tree and returns it, or returns `None` if there
    /// is no such value.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_> = vec![2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&2), Some(2));
    /// assert_eq!(tree.remove(&2), None);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3]);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T>
    where
        T: Ord,
    {
        self.find_mut(value).erase()
    }

    /// Removes every value from the tree.
    ///
    /// Nodes are freed bottom up, children before their parent, without recursion, so even a
    /// tree shaped like a long list can be cleared.
    pub fn clear(&mut self) {
        self.len = 0;
        if let Some(root) = self.root.take() {
            // SAFETY: The root was just unhooked from the tree and has no parent.
            unsafe { Node::free_subtree(root) };
        }
    }

    /// Exchanges the contents of two trees. No node is moved, allocated or freed.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.root, &mut other.root);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Moves every value of `other` into `self`, dropping what `self` held before. `other` is
    /// left empty. No node is allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut a: Tree<_> = vec![1, 2].into_iter().collect();
    /// let mut b: Tree<_> = vec![7].into_iter().collect();
    ///
    /// a.move_from(&mut b);
    /// assert_eq!(a.iter().copied().collect::<Vec<_>>(), [7]);
    /// assert!(b.is_empty());
    /// ```
    pub fn move_from(&mut self, other: &mut Self) {
        self.clear();
        self.swap(other);
    }

    /// Replaces the contents of the tree with the values of `iter`, inserted in order and with
    /// duplicates kept.
    pub fn assign<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
        T: Ord,
    {
        self.clear();
        self.extend(iter);
    }

    fn find_node(&self, value: &T) -> Link<T>
    where
        T: Ord,
    {
        let mut current = self.root;
        while let Some(node) = current {
            // SAFETY: Nodes reachable from the root are live while `self` is borrowed.
            let node = unsafe { node.as_ref() };
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left,
                Ordering::Equal => return current,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Replaces the subtree rooted at `old` with the one rooted at `new` in the child slot of
    /// `old`'s parent (or as the root). `new`'s parent link is updated, `old`'s links are not.
    ///
    /// # Safety
    ///
    /// `old` must be a live node of this tree and `new` must be `None` or a live node of this
    /// tree.
    unsafe fn transplant(&mut self, old: NonNull<Node<T>>, new: Link<T>) {
        let parent = (*old.as_ptr()).parent;
        match parent {
            None => self.root = new,
            Some(parent) => Node::replace_child(parent, old, new),
        }
        if let Some(new) = new {
            (*new.as_ptr()).parent = parent;
        }
    }

    /// Takes `node` out of the tree, frees it, and returns its value. Every other node stays
    /// where it is in the in-order sequence and stays at the same address.
    ///
    /// # Safety
    ///
    /// `node` must be a live node of this tree. Nothing may use `node` afterwards.
    pub(crate) unsafe fn unlink(&mut self, node: NonNull<Node<T>>) -> T {
        let (left, right) = ((*node.as_ptr()).left, (*node.as_ptr()).right);
        match (left, right) {
            (None, _) => self.transplant(node, right),
            (_, None) => self.transplant(node, left),
            (Some(left), Some(right)) => {
                // The successor is the leftmost node of the right subtree, so it has no left child
                // and can take `node`'s place.
                let successor = Node::leftmost(right);
                if successor != right {
                    self.transplant(successor, (*successor.as_ptr()).right);
                    Node::attach_right(successor, Some(right));
                }
                self.transplant(node, Some(successor));
                Node::attach_left(successor, Some(left));

                if cfg!(debug_assertions) {
                    assert_eq!((*successor.as_ptr()).parent, (*node.as_ptr()).parent);
                    assert_eq!((*left.as_ptr()).parent, Some(successor));
                    if let Some(successor_right) = (*successor.as_ptr()).right {
                        assert_eq!((*successor_right.as_ptr()).parent, Some(successor));
                    }
                }
            }
        }

        self.len -= 1;
        Node::into_value(node)
    }
}

impl<T: Ord> Extend<T> for Tree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value, false);
        }
    }
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}
