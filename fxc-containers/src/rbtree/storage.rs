// FXC - fxc-containers
// Module: Red-black tree storage adapter
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

// Forwards the unchecked accessors of the backing storage.
#![allow(unsafe_code)]

//! Binds an index-based storage strategy to red-black node records.
//!
//! The adapter owns one storage and nothing else. The tree algorithm touches
//! node memory only through the accessors here, so switching between
//! [`Pool`] and [`Contiguous`] changes no balancing code.

use core::fmt;

use super::node::{DedicatedColor, NodeLinks, RedBlackTreeNode};
use super::types::{NodeColor, NodeIndex, NULL_INDEX};
use crate::contiguous::FixedIndexContiguousStorage;
use crate::pool::FixedIndexPoolStorage;
use crate::storage::IndexBasedStorage;

/// Selects the concrete storage for `N` values of type `T`.
pub trait StorageStrategy<T, const N: usize> {
    /// The storage type.
    type Storage: IndexBasedStorage<Item = T>;
}

/// Index-stable free-list storage ([`FixedIndexPoolStorage`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pool;

/// Dense compacting storage ([`FixedIndexContiguousStorage`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contiguous;

impl<T, const N: usize> StorageStrategy<T, N> for Pool {
    type Storage = FixedIndexPoolStorage<T, N>;
}

impl<T, const N: usize> StorageStrategy<T, N> for Contiguous {
    type Storage = FixedIndexContiguousStorage<T, N>;
}

/// Red-black node storage over a chosen strategy `P` and link encoding `L`.
///
/// Per-index accessors are `unsafe`: the index must be live. Use
/// [`FixedRedBlackTreeStorage::contains_at`] or
/// [`FixedRedBlackTreeStorage::get`] when liveness is not known.
pub struct FixedRedBlackTreeStorage<K, V, const N: usize, L = DedicatedColor, P = Pool>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    storage: P::Storage,
}

impl<K, V, const N: usize, L, P> FixedRedBlackTreeStorage<K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    const CAPACITY_FITS_ENCODING: () = assert!(
        N <= L::INDEX_LIMIT,
        "capacity exceeds the index range of the node encoding"
    );

    /// Creates an empty adapter.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        let () = Self::CAPACITY_FITS_ENCODING;
        Self {
            storage: <P::Storage as IndexBasedStorage>::EMPTY,
        }
    }

    /// Number of live nodes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// `true` when no node is live.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// `true` when every slot holds a node.
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

    /// Drops every node.
    pub fn clear(&mut self) {
        trace_event!(debug, len = self.storage.len(), "tree storage clear");
        self.storage.clear();
    }

    /// `true` if `index` is a live node. [`NULL_INDEX`] is never live.
    ///
    /// O(1) for contiguous storage, O(N) for pool storage.
    #[inline]
    #[must_use]
    pub fn contains_at(&self, index: NodeIndex) -> bool {
        index != NULL_INDEX && self.storage.contains_at(index)
    }

    /// Checked node view.
    #[must_use]
    pub fn get(&self, index: NodeIndex) -> Option<NodeView<'_, K, V, L>> {
        if self.contains_at(index) {
            // SAFETY: liveness just checked
            Some(unsafe { self.at(index) })
        } else {
            None
        }
    }

    /// Node view at `index`.
    ///
    /// # Safety
    ///
    /// `index` must be live.
    #[inline]
    pub unsafe fn at(&self, index: NodeIndex) -> NodeView<'_, K, V, L> {
        NodeView {
            index,
            // SAFETY: forwarded from the caller
            node: unsafe { self.storage.at(index) },
        }
    }

    /// The node at `index`.
    ///
    /// # Safety
    ///
    /// `index` must be live.
    #[inline]
    pub unsafe fn node(&self, index: NodeIndex) -> &RedBlackTreeNode<K, V, L> {
        // SAFETY: forwarded from the caller
        unsafe { self.storage.at(index) }
    }

    /// The node at `index`, mutably.
    ///
    /// # Safety
    ///
    /// `index` must be live.
    #[inline]
    pub unsafe fn node_mut(&mut self, index: NodeIndex) -> &mut RedBlackTreeNode<K, V, L> {
        // SAFETY: forwarded from the caller
        unsafe { self.storage.at_mut(index) }
    }

    /// Raw pointer to the node slot at `index`, derived without a reference
    /// to the adapter.
    ///
    /// # Safety
    ///
    /// `this` must be valid and `index < N`.
    #[inline]
    pub(crate) unsafe fn node_ptr(this: *mut Self, index: NodeIndex) -> *mut RedBlackTreeNode<K, V, L> {
        // SAFETY: forwarded from the caller
        unsafe {
            <P::Storage as IndexBasedStorage>::slot_ptr(core::ptr::addr_of_mut!((*this).storage), index)
        }
    }

    /// Key at `index`.
    ///
    /// # Safety
    ///
    /// `index` must be live.
    #[inline]
    pub unsafe fn key(&self, index: NodeIndex) -> &K {
        // SAFETY: forwarded from the caller
        unsafe { &self.node(index).key }
    }

    /// Value at `index`.
    ///
    /// # Safety
    ///
    /// `index` must be live.
    #[inline]
    pub unsafe fn value(&self, index: NodeIndex) -> &V {
        // SAFETY: forwarded from the caller
        unsafe { &self.node(index).value }
    }

    /// Value at `index`, mutably.
    ///
    /// # Safety
    ///
    /// `index` must be live.
    #[inline]
    pub unsafe fn value_mut(&mut self, index: NodeIndex) -> &mut V {
        // SAFETY: forwarded from the caller
        unsafe { &mut self.node_mut(index).value }
    }

    /// Left child of `index`.
    ///
    /// # Safety
    ///
    /// `index` must be live.
    #[inline]
    pub unsafe fn left_index(&self, index: NodeIndex) -> NodeIndex {
        // SAFETY: forwarded from the caller
        unsafe { self.node(index).links.left() }
    }

    /// Right child of `index`.
    ///
    /// # Safety
    ///
    /// `index` must be live.
    #[inline]
    pub unsafe fn right_index(&self, index: NodeIndex) -> NodeIndex {
        // SAFETY: forwarded from the caller
        unsafe { self.node(index).links.right() }
    }

    /// Parent of `index`.
    ///
    /// # Safety
    ///
    /// `index` must be live.
    #[inline]
    pub unsafe fn parent_index(&self, index: NodeIndex) -> NodeIndex {
        // SAFETY: forwarded from the caller
        unsafe { self.node(index).links.parent() }
    }

    /// Colour of `index`.
    ///
    /// # Safety
    ///
    /// `index` must be live.
    #[inline]
    pub unsafe fn color(&self, index: NodeIndex) -> NodeColor {
        // SAFETY: forwarded from the caller
        unsafe { self.node(index).links.color() }
    }

    /// Sets the left child of `index`.
    ///
    /// # Safety
    ///
    /// `index` must be live.
    #[inline]
    pub unsafe fn set_left_index(&mut self, index: NodeIndex, left: NodeIndex) {
        // SAFETY: forwarded from the caller
        unsafe { self.node_mut(index).links.set_left(left) }
    }

    /// Sets the right child of `index`.
    ///
    /// # Safety
    ///
    /// `index` must be live.
    #[inline]
    pub unsafe fn set_right_index(&mut self, index: NodeIndex, right: NodeIndex) {
        // SAFETY: forwarded from the caller
        unsafe { self.node_mut(index).links.set_right(right) }
    }

    /// Sets the parent of `index`.
    ///
    /// # Safety
    ///
    /// `index` must be live.
    #[inline]
    #[track_caller]
    pub unsafe fn set_parent_index(&mut self, index: NodeIndex, parent: NodeIndex) {
        // SAFETY: forwarded from the caller
        unsafe { self.node_mut(index).links.set_parent(parent) }
    }

    /// Sets the colour of `index`.
    ///
    /// # Safety
    ///
    /// `index` must be live.
    #[inline]
    pub unsafe fn set_color(&mut self, index: NodeIndex, color: NodeColor) {
        // SAFETY: forwarded from the caller
        unsafe { self.node_mut(index).links.set_color(color) }
    }

    /// Stores an unlinked red node and returns its index.
    ///
    /// # Panics
    ///
    /// Fatal when full.
    #[inline]
    #[track_caller]
    pub fn emplace_and_return_index(&mut self, key: K, value: V) -> NodeIndex {
        self.storage.emplace_and_return_index(RedBlackTreeNode::new(key, value))
    }

    /// Moves the node at `index` out of storage.
    ///
    /// # Safety
    ///
    /// `index` must be live.
    #[inline]
    pub unsafe fn take_at_and_return_repositioned_index(
        &mut self,
        index: NodeIndex,
    ) -> (RedBlackTreeNode<K, V, L>, NodeIndex) {
        // SAFETY: forwarded from the caller
        unsafe { self.storage.take_at_and_return_repositioned_index(index) }
    }

    /// Drops the node at `index`; see
    /// [`IndexBasedStorage::delete_at_and_return_repositioned_index`].
    ///
    /// # Safety
    ///
    /// `index` must be live.
    #[inline]
    pub unsafe fn delete_at_and_return_repositioned_index(&mut self, index: NodeIndex) -> NodeIndex {
        // SAFETY: forwarded from the caller
        unsafe { self.storage.delete_at_and_return_repositioned_index(index) }
    }
}

impl<K, V, const N: usize, L, P> Default for FixedRedBlackTreeStorage<K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, const N: usize, L, P> Clone for FixedRedBlackTreeStorage<K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
    P::Storage: Clone,
{
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
        }
    }
}

impl<K, V, const N: usize, L, P> fmt::Debug for FixedRedBlackTreeStorage<K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
    P::Storage: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedRedBlackTreeStorage")
            .field("storage", &self.storage)
            .finish()
    }
}

/// Read-only view of one live node.
pub struct NodeView<'a, K, V, L> {
    index: NodeIndex,
    node:  &'a RedBlackTreeNode<K, V, L>,
}

impl<'a, K, V, L: NodeLinks> NodeView<'a, K, V, L> {
    /// Index of the node.
    #[inline]
    #[must_use]
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// The key.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &'a K {
        &self.node.key
    }

    /// The value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &'a V {
        &self.node.value
    }

    /// Left child.
    #[inline]
    #[must_use]
    pub fn left_index(&self) -> NodeIndex {
        self.node.links.left()
    }

    /// Right child.
    #[inline]
    #[must_use]
    pub fn right_index(&self) -> NodeIndex {
        self.node.links.right()
    }

    /// Parent.
    #[inline]
    #[must_use]
    pub fn parent_index(&self) -> NodeIndex {
        self.node.links.parent()
    }

    /// Colour.
    #[inline]
    #[must_use]
    pub fn color(&self) -> NodeColor {
        self.node.links.color()
    }
}

impl<K, V, L> Clone for NodeView<'_, K, V, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, L> Copy for NodeView<'_, K, V, L> {}

impl<K: fmt::Debug, V: fmt::Debug, L: NodeLinks> fmt::Debug for NodeView<'_, K, V, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeView")
            .field("index", &self.index)
            .field("key", &self.node.key)
            .field("value", &self.node.value)
            .field("links", &self.node.links)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbtree::node::EmbeddedColor;

    type PoolStorage = FixedRedBlackTreeStorage<u32, &'static str, 8, DedicatedColor, Pool>;
    type DenseStorage = FixedRedBlackTreeStorage<u32, &'static str, 8, EmbeddedColor, Contiguous>;

    #[test]
    fn test_null_index_is_never_contained() {
        let mut storage = PoolStorage::new();
        assert!(!storage.contains_at(NULL_INDEX));
        let i = storage.emplace_and_return_index(1, "one");
        assert!(storage.contains_at(i));
        assert!(!storage.contains_at(NULL_INDEX));
        assert!(storage.get(NULL_INDEX).is_none());
    }

    #[test]
    fn test_accessors_round_trip() {
        let mut storage = DenseStorage::new();
        let a = storage.emplace_and_return_index(10, "ten");
        let b = storage.emplace_and_return_index(20, "twenty");
        // SAFETY: `a` and `b` are live
        unsafe {
            assert_eq!(storage.color(a), NodeColor::Red);
            storage.set_left_index(a, b);
            storage.set_parent_index(b, a);
            storage.set_color(a, NodeColor::Black);
            *storage.value_mut(b) = "TWENTY";

            assert_eq!(storage.left_index(a), b);
            assert_eq!(storage.right_index(a), NULL_INDEX);
            assert_eq!(storage.parent_index(b), a);
            assert_eq!(storage.color(a), NodeColor::Black);
            assert_eq!(storage.color(b), NodeColor::Red);
            assert_eq!(*storage.key(b), 20);
            assert_eq!(*storage.value(b), "TWENTY");
        }
    }

    #[test]
    fn test_node_view() {
        let mut storage = PoolStorage::new();
        let i = storage.emplace_and_return_index(3, "three");
        let view = storage.get(i).unwrap();
        assert_eq!(view.index(), i);
        assert_eq!(*view.key(), 3);
        assert_eq!(*view.value(), "three");
        assert_eq!(view.parent_index(), NULL_INDEX);
        assert_eq!(view.color(), NodeColor::Red);
    }

    #[test]
    fn test_delete_forwards_repositioned_index() {
        let mut pool = PoolStorage::new();
        let mut dense = DenseStorage::new();
        for k in 0..3 {
            pool.emplace_and_return_index(k, "");
            dense.emplace_and_return_index(k, "");
        }
        // SAFETY: index 0 is live in both
        unsafe {
            assert_eq!(pool.delete_at_and_return_repositioned_index(0), 0);
            assert_eq!(dense.delete_at_and_return_repositioned_index(0), 2);
            assert_eq!(*dense.key(0), 2);
        }
    }

    #[test]
    fn test_clear() {
        let mut storage = DenseStorage::new();
        storage.emplace_and_return_index(1, "a");
        storage.clear();
        assert!(storage.is_empty());
        assert_eq!(storage.capacity(), 8);
    }
}
