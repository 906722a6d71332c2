//! The node type of [`Tree`][super::Tree] and the link primitives the tree is built from.
//!
//! Every node is a separate heap allocation. The `left` and `right` links own the child they
//! point to while `parent` is a plain back-reference that is never followed to free anything.
//! All of the primitives here work on `NonNull` pointers rather than `&mut Node` so that writing
//! through one node never invalidates a reference held to another.

use std::ptr::NonNull;

/// A possibly missing pointer to a node.
pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

/// Red-black coloring slot. Nodes are always created black and nothing reads or recolors them;
/// the tree does not balance itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Color {
    #[allow(dead_code)]
    Red,
    Black,
}

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    pub(crate) parent: Link<T>,
    #[allow(dead_code)]
    color: Color,
}

impl<T> Node<T> {
    /// Allocates a detached node holding `value`.
    pub(crate) fn alloc(value: T) -> NonNull<Self> {
        let node = Box::new(Node {
            value,
            left: None,
            right: None,
            parent: None,
            color: Color::Black,
        });
        NonNull::from(Box::leak(node))
    }

    /// Frees `node` and returns the value it held.
    ///
    /// # Safety
    ///
    /// `node` must have come from [`Node::alloc`], must not have been freed yet and nothing may
    /// dereference it afterwards. Its children are *not* freed: the caller must have relinked them
    /// elsewhere (or freed them) first.
    pub(crate) unsafe fn into_value(node: NonNull<Self>) -> T {
        let node = Box::from_raw(node.as_ptr());
        node.value
    }

    /// Frees `root` and every node below it, children before their parent.
    ///
    /// Needs neither recursion nor extra memory: children are detached on the way down and the
    /// parent links lead back up. The walk stops at `root`, its own parent link is never followed.
    ///
    /// # Safety
    ///
    /// `root` must be live and nothing may reach it or its descendants afterwards. In particular
    /// the caller must have unhooked it from its parent already.
    pub(crate) unsafe fn free_subtree(root: NonNull<Self>) {
        let mut current = root;
        loop {
            let node_ptr = current.as_ptr();
            if let Some(left) = (*node_ptr).left.take() {
                current = left;
            } else if let Some(right) = (*node_ptr).right.take() {
                current = right;
            } else {
                let parent = (*node_ptr).parent;
                let finished = current == root;
                drop(Self::into_value(current));
                match parent {
                    Some(parent) if !finished => current = parent,
                    _ => return,
                }
            }
        }
    }

    /// Makes `child` the left child of `parent`, overwriting the old left link, and points
    /// `child`'s parent link back at `parent`.
    ///
    /// # Safety
    ///
    /// Both pointers must be live nodes of the same tree. Whatever `parent.left` pointed at
    /// before is no longer owned by `parent`; the caller keeps track of it.
    pub(crate) unsafe fn attach_left(parent: NonNull<Self>, child: Link<T>) {
        (*parent.as_ptr()).left = child;
        if let Some(child) = child {
            (*child.as_ptr()).parent = Some(parent);
        }
    }

    /// Mirror of [`Node::attach_left`].
    ///
    /// # Safety
    ///
    /// See [`Node::attach_left`].
    pub(crate) unsafe fn attach_right(parent: NonNull<Self>, child: Link<T>) {
        (*parent.as_ptr()).right = child;
        if let Some(child) = child {
            (*child.as_ptr()).parent = Some(parent);
        }
    }

    /// Allocates a node for `value` and attaches it as the left child of `parent`.
    ///
    /// # Safety
    ///
    /// `parent` must be live and must not have a left child (it would be leaked).
    pub(crate) unsafe fn push_left(parent: NonNull<Self>, value: T) -> NonNull<Self> {
        debug_assert!((*parent.as_ptr()).left.is_none());
        let node = Self::alloc(value);
        Self::attach_left(parent, Some(node));
        node
    }

    /// Allocates a node for `value` and attaches it as the right child of `parent`.
    ///
    /// # Safety
    ///
    /// `parent` must be live and must not have a right child (it would be leaked).
    pub(crate) unsafe fn push_right(parent: NonNull<Self>, value: T) -> NonNull<Self> {
        debug_assert!((*parent.as_ptr()).right.is_none());
        let node = Self::alloc(value);
        Self::attach_right(parent, Some(node));
        node
    }

    /// Points whichever child link of `parent` currently holds `old` at `new` instead. The parent
    /// link of `new` is left alone.
    ///
    /// # Safety
    ///
    /// `parent` must be live and `old` must be one of its children.
    pub(crate) unsafe fn replace_child(parent: NonNull<Self>, old: NonNull<Self>, new: Link<T>) {
        let parent = parent.as_ptr();
        if (*parent).left == Some(old) {
            (*parent).left = new;
        } else {
            debug_assert_eq!((*parent).right, Some(old));
            (*parent).right = new;
        }
    }

    /// Returns true if `node` hangs off the left link of its parent. The root is neither a left
    /// nor a right child.
    ///
    /// # Safety
    ///
    /// `node` and its parent (if any) must be live.
    pub(crate) unsafe fn is_left_child(node: NonNull<Self>) -> bool {
        match (*node.as_ptr()).parent {
            Some(parent) => (*parent.as_ptr()).left == Some(node),
            None => false,
        }
    }

    /// Returns true if `node` hangs off the right link of its parent.
    ///
    /// # Safety
    ///
    /// `node` and its parent (if any) must be live.
    pub(crate) unsafe fn is_right_child(node: NonNull<Self>) -> bool {
        match (*node.as_ptr()).parent {
            Some(parent) => (*parent.as_ptr()).right == Some(node),
            None => false,
        }
    }

    /// Follows left links from `node` until there is no left child.
    ///
    /// # Safety
    ///
    /// `node` must be live.
    pub(crate) unsafe fn leftmost(mut node: NonNull<Self>) -> NonNull<Self> {
        while let Some(left) = (*node.as_ptr()).left {
            node = left;
        }
        node
    }

    /// Follows right links from `node` until there is no right child.
    ///
    /// # Safety
    ///
    /// `node` must be live.
    pub(crate) unsafe fn rightmost(mut node: NonNull<Self>) -> NonNull<Self> {
        while let Some(right) = (*node.as_ptr()).right {
            node = right;
        }
        node
    }
}
