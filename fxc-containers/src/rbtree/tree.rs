// FXC - fxc-containers
// Module: Red-black tree algorithm layer
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

// Node access goes through the adapter's unchecked accessors.
#![allow(unsafe_code)]

//! Red-black balancing expressed over node indices.
//!
//! Every link is a [`NodeIndex`]; [`NULL_INDEX`] plays the role of the nil
//! leaf and counts as black. The algorithm reads and writes nodes only
//! through [`FixedRedBlackTreeStorage`], so it runs unchanged over pool and
//! contiguous storage.
//!
//! Erasing from contiguous storage relocates the last node into the freed
//! slot. After every erase the tree rewires the moved node's parent and
//! children, and remaps the successor it reports, using the repositioned
//! index returned by the storage.

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;

use fxc_error::{codes, Error, ErrorCategory, Result};

use super::iter::{Iter, IterMut};
use super::node::{DedicatedColor, NodeLinks, RedBlackTreeNode};
use super::storage::{FixedRedBlackTreeStorage, Pool, StorageStrategy};
use super::types::{
    NodeColor, NodeIndex, NodeIndexAndParentIndex, SuccessorIndexAndRepositionedIndex, NULL_INDEX,
};

/// Child side, used to write each rotation and fixup case once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Leftmost node of the subtree rooted at `i`.
pub(super) fn leftmost<L: NodeLinks>(mut i: NodeIndex, links: &impl Fn(NodeIndex) -> L) -> NodeIndex {
    if i == NULL_INDEX {
        return NULL_INDEX;
    }
    loop {
        let left = links(i).left();
        if left == NULL_INDEX {
            return i;
        }
        i = left;
    }
}

/// Rightmost node of the subtree rooted at `i`.
pub(super) fn rightmost<L: NodeLinks>(mut i: NodeIndex, links: &impl Fn(NodeIndex) -> L) -> NodeIndex {
    if i == NULL_INDEX {
        return NULL_INDEX;
    }
    loop {
        let right = links(i).right();
        if right == NULL_INDEX {
            return i;
        }
        i = right;
    }
}

/// In-order successor of the live node `i`.
pub(super) fn next_in_order<L: NodeLinks>(i: NodeIndex, links: &impl Fn(NodeIndex) -> L) -> NodeIndex {
    let right = links(i).right();
    if right != NULL_INDEX {
        return leftmost(right, links);
    }
    let mut child = i;
    let mut parent = links(child).parent();
    while parent != NULL_INDEX && links(parent).right() == child {
        child = parent;
        parent = links(parent).parent();
    }
    parent
}

/// In-order predecessor of the live node `i`.
pub(super) fn prev_in_order<L: NodeLinks>(i: NodeIndex, links: &impl Fn(NodeIndex) -> L) -> NodeIndex {
    let left = links(i).left();
    if left != NULL_INDEX {
        return rightmost(left, links);
    }
    let mut child = i;
    let mut parent = links(child).parent();
    while parent != NULL_INDEX && links(parent).left() == child {
        child = parent;
        parent = links(parent).parent();
    }
    parent
}

/// Ordered key/value tree with fixed capacity `N`.
///
/// `L` selects the node encoding and `P` the storage strategy. Every index
/// reachable from the root is live; the private accessors below rely on it.
pub struct FixedRedBlackTree<K, V, const N: usize, L = DedicatedColor, P = Pool>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    pub(super) storage: FixedRedBlackTreeStorage<K, V, N, L, P>,
    pub(super) root:    NodeIndex,
}

impl<K, V, const N: usize, L, P> FixedRedBlackTree<K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    /// Creates an empty tree.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            storage: FixedRedBlackTreeStorage::new(),
            root:    NULL_INDEX,
        }
    }

    /// Number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// `true` when empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// `true` when no further entry fits.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.storage.is_full()
    }

    /// Compile-time capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Index of the root, or [`NULL_INDEX`] when empty.
    #[inline]
    #[must_use]
    pub fn root_index(&self) -> NodeIndex {
        self.root
    }

    /// Read-only access to the node storage.
    #[inline]
    #[must_use]
    pub fn storage(&self) -> &FixedRedBlackTreeStorage<K, V, N, L, P> {
        &self.storage
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.root = NULL_INDEX;
    }

    // ------------------------------------------------------------------
    // Node access. Callers pass only indices reachable from the root.
    // ------------------------------------------------------------------

    #[inline]
    fn links(&self, i: NodeIndex) -> L {
        debug_assert!(i != NULL_INDEX);
        // SAFETY: reachable indices are live
        unsafe { self.storage.node(i).links }
    }

    #[inline]
    fn links_mut(&mut self, i: NodeIndex) -> &mut L {
        debug_assert!(i != NULL_INDEX);
        // SAFETY: reachable indices are live
        unsafe { &mut self.storage.node_mut(i).links }
    }

    #[inline]
    pub(crate) fn key_of(&self, i: NodeIndex) -> &K {
        debug_assert!(i != NULL_INDEX);
        // SAFETY: reachable indices are live
        unsafe { self.storage.key(i) }
    }

    #[inline]
    pub(crate) fn value_of(&self, i: NodeIndex) -> &V {
        debug_assert!(i != NULL_INDEX);
        // SAFETY: reachable indices are live
        unsafe { self.storage.value(i) }
    }

    #[inline]
    pub(crate) fn value_of_mut(&mut self, i: NodeIndex) -> &mut V {
        debug_assert!(i != NULL_INDEX);
        // SAFETY: reachable indices are live
        unsafe { self.storage.value_mut(i) }
    }

    #[inline]
    fn left(&self, i: NodeIndex) -> NodeIndex {
        self.links(i).left()
    }

    #[inline]
    fn right(&self, i: NodeIndex) -> NodeIndex {
        self.links(i).right()
    }

    #[inline]
    fn parent(&self, i: NodeIndex) -> NodeIndex {
        self.links(i).parent()
    }

    #[inline]
    fn child(&self, i: NodeIndex, side: Side) -> NodeIndex {
        match side {
            Side::Left => self.left(i),
            Side::Right => self.right(i),
        }
    }

    /// Colour with the nil leaf counting as black.
    #[inline]
    fn color_of(&self, i: NodeIndex) -> NodeColor {
        if i == NULL_INDEX {
            NodeColor::Black
        } else {
            self.links(i).color()
        }
    }

    #[inline]
    fn set_left(&mut self, i: NodeIndex, left: NodeIndex) {
        self.links_mut(i).set_left(left);
    }

    #[inline]
    fn set_right(&mut self, i: NodeIndex, right: NodeIndex) {
        self.links_mut(i).set_right(right);
    }

    #[inline]
    fn set_parent(&mut self, i: NodeIndex, parent: NodeIndex) {
        self.links_mut(i).set_parent(parent);
    }

    #[inline]
    fn set_child(&mut self, i: NodeIndex, side: Side, child: NodeIndex) {
        match side {
            Side::Left => self.set_left(i, child),
            Side::Right => self.set_right(i, child),
        }
    }

    #[inline]
    fn set_color(&mut self, i: NodeIndex, color: NodeColor) {
        self.links_mut(i).set_color(color);
    }

    /// Side of `parent` on which `child` hangs. A nil `child` is resolved
    /// against the left link first.
    #[inline]
    fn side_of(&self, parent: NodeIndex, child: NodeIndex) -> Side {
        if self.left(parent) == child {
            Side::Left
        } else {
            Side::Right
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Index of the smallest key, or [`NULL_INDEX`].
    #[must_use]
    pub fn first_index(&self) -> NodeIndex {
        leftmost(self.root, &|i| self.links(i))
    }

    /// Index of the largest key, or [`NULL_INDEX`].
    #[must_use]
    pub fn last_index(&self) -> NodeIndex {
        rightmost(self.root, &|i| self.links(i))
    }

    pub(super) fn next_index(&self, i: NodeIndex) -> NodeIndex {
        next_in_order(i, &|j| self.links(j))
    }

    pub(super) fn prev_index(&self, i: NodeIndex) -> NodeIndex {
        prev_in_order(i, &|j| self.links(j))
    }

    /// In-order successor of `i`; [`NULL_INDEX`] for the last node or for an
    /// index that is not live.
    #[must_use]
    pub fn successor_index(&self, i: NodeIndex) -> NodeIndex {
        if self.storage.contains_at(i) {
            self.next_index(i)
        } else {
            NULL_INDEX
        }
    }

    /// In-order predecessor of `i`; [`NULL_INDEX`] for the first node or for
    /// an index that is not live.
    #[must_use]
    pub fn predecessor_index(&self, i: NodeIndex) -> NodeIndex {
        if self.storage.contains_at(i) {
            self.prev_index(i)
        } else {
            NULL_INDEX
        }
    }

    /// Key and value at a live index.
    #[must_use]
    pub fn entry_at(&self, i: NodeIndex) -> Option<(&K, &V)> {
        if self.storage.contains_at(i) {
            Some((self.key_of(i), self.value_of(i)))
        } else {
            None
        }
    }

    /// Key and value at an index obtained from navigation, which is either
    /// reachable or [`NULL_INDEX`].
    #[inline]
    pub(crate) fn reachable_entry(&self, i: NodeIndex) -> Option<(&K, &V)> {
        (i != NULL_INDEX).then(|| (self.key_of(i), self.value_of(i)))
    }

    /// In-order iterator.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, N, L, P> {
        Iter::new(self)
    }

    /// In-order iterator with mutable values.
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V, N, L, P> {
        IterMut::new(self)
    }

    // ------------------------------------------------------------------
    // Structural primitives
    // ------------------------------------------------------------------

    /// Rotates `x` down towards `side`; its child on the opposite side
    /// takes its place.
    fn rotate(&mut self, x: NodeIndex, side: Side) {
        let opposite = side.opposite();
        let y = self.child(x, opposite);
        let inner = self.child(y, side);

        self.set_child(x, opposite, inner);
        if inner != NULL_INDEX {
            self.set_parent(inner, x);
        }
        self.transplant(x, y);
        self.set_child(y, side, x);
        self.set_parent(x, y);
    }

    /// Puts `v` (possibly nil) where `u` hangs from its parent.
    fn transplant(&mut self, u: NodeIndex, v: NodeIndex) {
        let parent = self.parent(u);
        if parent == NULL_INDEX {
            self.root = v;
        } else {
            let side = self.side_of(parent, u);
            self.set_child(parent, side, v);
        }
        if v != NULL_INDEX {
            self.set_parent(v, parent);
        }
    }

    /// Rewires the neighbours of a node the storage moved from `from` to `to`.
    fn relink_moved(&mut self, from: NodeIndex, to: NodeIndex) {
        let parent = self.parent(to);
        if parent == NULL_INDEX {
            self.root = to;
        } else if self.left(parent) == from {
            self.set_left(parent, to);
        } else {
            self.set_right(parent, to);
        }
        for child in [self.left(to), self.right(to)] {
            if child != NULL_INDEX {
                self.set_parent(child, to);
            }
        }
        trace_event!(trace, from, to, "tree node repositioned");
    }

    /// Links a freshly stored red node `z` below `parent` and rebalances.
    #[track_caller]
    pub(crate) fn insert_new_at(&mut self, position: NodeIndexAndParentIndex, key: K, value: V) -> NodeIndex {
        #[cfg(feature = "tracing")]
        let _span = crate::tracing::TreeTrace::inserting(self.len(), N).entered();

        let z = self.storage.emplace_and_return_index(key, value);
        self.set_parent(z, position.parent);
        if position.parent == NULL_INDEX {
            self.root = z;
        } else if position.is_left_child {
            self.set_left(position.parent, z);
        } else {
            self.set_right(position.parent, z);
        }
        self.insert_fixup(z);
        trace_event!(trace, index = z, len = self.len(), "tree insert");
        z
    }

    fn insert_fixup(&mut self, mut z: NodeIndex) {
        loop {
            let mut parent = self.parent(z);
            if parent == NULL_INDEX || self.color_of(parent).is_black() {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let grandparent = self.parent(parent);
            let side = self.side_of(grandparent, parent);
            let uncle = self.child(grandparent, side.opposite());

            if self.color_of(uncle).is_red() {
                self.set_color(parent, NodeColor::Black);
                self.set_color(uncle, NodeColor::Black);
                self.set_color(grandparent, NodeColor::Red);
                z = grandparent;
                continue;
            }

            if self.child(parent, side.opposite()) == z {
                self.rotate(parent, side);
                z = parent;
                parent = self.parent(z);
            }
            self.set_color(parent, NodeColor::Black);
            self.set_color(grandparent, NodeColor::Red);
            self.rotate(grandparent, side.opposite());
            break;
        }
        let root = self.root;
        self.set_color(root, NodeColor::Black);
    }

    /// Unlinks the live node `z`, rebalances, and releases its slot.
    fn unlink_and_take(&mut self, z: NodeIndex) -> (RedBlackTreeNode<K, V, L>, SuccessorIndexAndRepositionedIndex) {
        #[cfg(feature = "tracing")]
        let _span = crate::tracing::TreeTrace::erasing(z, self.len()).entered();

        let mut successor = self.next_index(z);
        let mut removed_color = self.color_of(z);
        let z_left = self.left(z);
        let z_right = self.right(z);

        // `x` takes the place of the removed node; `x_parent` and `side`
        // locate it even when it is nil.
        let (x, x_parent, side);
        if z_left == NULL_INDEX || z_right == NULL_INDEX {
            x = if z_left == NULL_INDEX { z_right } else { z_left };
            x_parent = self.parent(z);
            side = if x_parent == NULL_INDEX {
                Side::Left
            } else {
                self.side_of(x_parent, z)
            };
            self.transplant(z, x);
        } else {
            let y = successor;
            removed_color = self.color_of(y);
            x = self.right(y);
            if self.parent(y) == z {
                x_parent = y;
                side = Side::Right;
            } else {
                x_parent = self.parent(y);
                side = Side::Left;
                self.transplant(y, x);
                self.set_right(y, z_right);
                self.set_parent(z_right, y);
            }
            self.transplant(z, y);
            self.set_left(y, z_left);
            self.set_parent(z_left, y);
            let z_color = self.color_of(z);
            self.set_color(y, z_color);
        }

        if removed_color.is_black() {
            self.erase_fixup(x, x_parent, side);
        }

        // SAFETY: `z` is live and no longer linked into the tree
        let (node, repositioned) = unsafe { self.storage.take_at_and_return_repositioned_index(z) };
        if repositioned != z {
            self.relink_moved(repositioned, z);
            if successor == repositioned {
                successor = z;
            }
        }
        trace_event!(trace, index = z, repositioned, len = self.len(), "tree erase");
        (node, SuccessorIndexAndRepositionedIndex {
            successor,
            repositioned,
        })
    }

    fn erase_fixup(&mut self, mut x: NodeIndex, mut x_parent: NodeIndex, mut side: Side) {
        while x != self.root && self.color_of(x).is_black() {
            let opposite = side.opposite();
            let mut sibling = self.child(x_parent, opposite);
            debug_assert!(sibling != NULL_INDEX, "doubly black node without a sibling");

            if self.color_of(sibling).is_red() {
                self.set_color(sibling, NodeColor::Black);
                self.set_color(x_parent, NodeColor::Red);
                self.rotate(x_parent, side);
                sibling = self.child(x_parent, opposite);
            }

            let near = self.child(sibling, side);
            let far = self.child(sibling, opposite);
            if self.color_of(near).is_black() && self.color_of(far).is_black() {
                self.set_color(sibling, NodeColor::Red);
                x = x_parent;
                x_parent = self.parent(x);
                if x_parent != NULL_INDEX {
                    side = self.side_of(x_parent, x);
                }
                continue;
            }

            if self.color_of(far).is_black() {
                self.set_color(near, NodeColor::Black);
                self.set_color(sibling, NodeColor::Red);
                self.rotate(sibling, opposite);
                sibling = self.child(x_parent, opposite);
            }
            let parent_color = self.color_of(x_parent);
            self.set_color(sibling, parent_color);
            self.set_color(x_parent, NodeColor::Black);
            let far = self.child(sibling, opposite);
            self.set_color(far, NodeColor::Black);
            self.rotate(x_parent, side);
            x = self.root;
        }
        if x != NULL_INDEX {
            self.set_color(x, NodeColor::Black);
        }
    }

    /// Removes the node at live index `i`.
    ///
    /// Returns `None` if `i` is not live. The reported successor is already
    /// remapped when the storage relocated it.
    pub fn erase_at(&mut self, i: NodeIndex) -> Option<SuccessorIndexAndRepositionedIndex> {
        if !self.storage.contains_at(i) {
            return None;
        }
        let (_node, result) = self.unlink_and_take(i);
        Some(result)
    }

    /// Removes and returns the smallest entry.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let i = self.first_index();
        (i != NULL_INDEX).then(|| self.unlink_and_take(i).0.into_parts())
    }

    /// Removes and returns the largest entry.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let i = self.last_index();
        (i != NULL_INDEX).then(|| self.unlink_and_take(i).0.into_parts())
    }

    /// Keeps only the entries for which `keep` returns `true`, visiting them
    /// in key order.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut i = self.first_index();
        while i != NULL_INDEX {
            // SAFETY: `i` is reachable, hence live
            let node = unsafe { self.storage.node_mut(i) };
            if keep(&node.key, &mut node.value) {
                i = self.next_index(i);
            } else {
                i = self.unlink_and_take(i).1.successor;
            }
        }
    }
}

impl<K, V, const N: usize, L, P> FixedRedBlackTree<K, V, N, L, P>
where
    K: Ord,
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    /// Locates `key`, or the parent and side a new node for it would take.
    pub fn find_index<Q>(&self, key: &Q) -> NodeIndexAndParentIndex
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut result = NodeIndexAndParentIndex::default();
        let mut i = self.root;
        while i != NULL_INDEX {
            match key.cmp(self.key_of(i).borrow()) {
                Ordering::Equal => {
                    result.i = i;
                    return result;
                }
                Ordering::Less => {
                    result.parent = i;
                    result.is_left_child = true;
                    i = self.left(i);
                }
                Ordering::Greater => {
                    result.parent = i;
                    result.is_left_child = false;
                    i = self.right(i);
                }
            }
        }
        result
    }

    /// Index holding `key`, if any.
    pub fn find<Q>(&self, key: &Q) -> Option<NodeIndex>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let i = self.find_index(key).i;
        (i != NULL_INDEX).then_some(i)
    }

    /// `true` if `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_index(key).i != NULL_INDEX
    }

    /// Value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|i| self.value_of(i))
    }

    /// Stored key and value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|i| (self.key_of(i), self.value_of(i)))
    }

    /// Mutable value for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let i = self.find(key)?;
        Some(self.value_of_mut(i))
    }

    /// Index of the first key not less than `key`, or [`NULL_INDEX`].
    pub fn lower_bound_index<Q>(&self, key: &Q) -> NodeIndex
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut best = NULL_INDEX;
        let mut i = self.root;
        while i != NULL_INDEX {
            if self.key_of(i).borrow() >= key {
                best = i;
                i = self.left(i);
            } else {
                i = self.right(i);
            }
        }
        best
    }

    /// Index of the first key greater than `key`, or [`NULL_INDEX`].
    pub fn upper_bound_index<Q>(&self, key: &Q) -> NodeIndex
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut best = NULL_INDEX;
        let mut i = self.root;
        while i != NULL_INDEX {
            if self.key_of(i).borrow() > key {
                best = i;
                i = self.left(i);
            } else {
                i = self.right(i);
            }
        }
        best
    }

    /// Inserts `key` or overwrites its value.
    ///
    /// Returns the node index and the previous value, if any.
    ///
    /// # Panics
    ///
    /// Inserting a new key into a full tree is fatal.
    #[track_caller]
    pub fn insert_or_assign(&mut self, key: K, value: V) -> (NodeIndex, Option<V>) {
        let position = self.find_index(&key);
        if position.i != NULL_INDEX {
            let old = core::mem::replace(self.value_of_mut(position.i), value);
            return (position.i, Some(old));
        }
        (self.insert_new_at(position, key, value), None)
    }

    /// Like [`FixedRedBlackTree::insert_or_assign`], but reports a full tree
    /// as an error instead of trapping.
    ///
    /// # Errors
    ///
    /// Returns a capacity error if `key` is new and the tree is full.
    pub fn try_insert_or_assign(&mut self, key: K, value: V) -> Result<(NodeIndex, Option<V>)> {
        let position = self.find_index(&key);
        if position.i != NULL_INDEX {
            let old = core::mem::replace(self.value_of_mut(position.i), value);
            return Ok((position.i, Some(old)));
        }
        if self.is_full() {
            return Err(Error::capacity_exceeded("FixedRedBlackTree capacity exceeded"));
        }
        Ok((self.insert_new_at(position, key, value), None))
    }

    /// Inserts `key` only if it is absent.
    ///
    /// Returns the index of the (new or existing) node and whether it was
    /// inserted.
    ///
    /// # Panics
    ///
    /// Inserting a new key into a full tree is fatal.
    #[track_caller]
    pub fn insert_if_absent(&mut self, key: K, value: V) -> (NodeIndex, bool) {
        let position = self.find_index(&key);
        if position.i != NULL_INDEX {
            return (position.i, false);
        }
        (self.insert_new_at(position, key, value), true)
    }

    /// Removes `key`, returning the stored key and value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let i = self.find(key)?;
        Some(self.unlink_and_take(i).0.into_parts())
    }

    /// Removes `key`, returning the successor and repositioned indices.
    pub fn erase<Q>(&mut self, key: &Q) -> Option<SuccessorIndexAndRepositionedIndex>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let i = self.find(key)?;
        Some(self.unlink_and_take(i).1)
    }

    /// Checks every red-black and structural invariant.
    ///
    /// Returns the black height (nil leaves count as one).
    ///
    /// # Errors
    ///
    /// Returns a verification error naming the first violated invariant.
    pub fn verify_invariants(&self) -> Result<usize> {
        if self.root == NULL_INDEX {
            return if self.is_empty() {
                Ok(1)
            } else {
                Err(fxc_error::size_mismatch_error())
            };
        }
        if !self.storage.contains_at(self.root) {
            return Err(dead_link_error());
        }
        if self.color_of(self.root).is_red() {
            return Err(fxc_error::red_root_error());
        }
        if self.parent(self.root) != NULL_INDEX {
            return Err(fxc_error::parent_link_error());
        }

        let mut visited = 0;
        let black_height = self.verify_subtree(self.root, &mut visited)?;
        if visited != self.len() {
            return Err(fxc_error::size_mismatch_error());
        }

        let mut i = self.first_index();
        let mut next = self.next_index(i);
        while next != NULL_INDEX {
            if self.key_of(i) >= self.key_of(next) {
                return Err(fxc_error::key_order_error());
            }
            i = next;
            next = self.next_index(i);
        }
        Ok(black_height)
    }

    fn verify_subtree(&self, i: NodeIndex, visited: &mut usize) -> Result<usize> {
        if i == NULL_INDEX {
            return Ok(1);
        }
        *visited += 1;
        if *visited > self.len() {
            // More reachable nodes than stored ones: a cycle.
            return Err(fxc_error::size_mismatch_error());
        }

        let left = self.left(i);
        let right = self.right(i);
        for child in [left, right] {
            if child == NULL_INDEX {
                continue;
            }
            if !self.storage.contains_at(child) {
                return Err(dead_link_error());
            }
            if self.parent(child) != i {
                return Err(fxc_error::parent_link_error());
            }
        }

        let red = self.color_of(i).is_red();
        if red && (self.color_of(left).is_red() || self.color_of(right).is_red()) {
            return Err(fxc_error::red_red_error());
        }
        if left != NULL_INDEX && self.key_of(left) >= self.key_of(i) {
            return Err(fxc_error::key_order_error());
        }
        if right != NULL_INDEX && self.key_of(right) <= self.key_of(i) {
            return Err(fxc_error::key_order_error());
        }

        let left_height = self.verify_subtree(left, visited)?;
        let right_height = self.verify_subtree(right, visited)?;
        if left_height != right_height {
            return Err(fxc_error::black_height_error());
        }
        Ok(left_height + usize::from(!red))
    }
}

const fn dead_link_error() -> Error {
    Error::new(ErrorCategory::Access, codes::DEAD_SLOT_ACCESS, "Tree links a dead slot")
}

impl<K, V, const N: usize, L, P> Default for FixedRedBlackTree<K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, const N: usize, L, P> Clone for FixedRedBlackTree<K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
    P::Storage: Clone,
{
    /// Slot-for-slot copy: node indices are identical in the clone.
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            root:    self.root,
        }
    }
}

impl<K, V, const N: usize, L, P> fmt::Debug for FixedRedBlackTree<K, V, N, L, P>
where
    K: fmt::Debug,
    V: fmt::Debug,
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
