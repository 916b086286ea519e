// FXC - fxc-containers
// Module: FixedSet - ordered set with inline storage
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Ordered set with compile-time capacity.
//!
//! A `FixedSet` is a [`FixedRedBlackTree`] whose value type is `()`, so nodes
//! carry no value storage.

use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::panic::Location;

use fxc_error::Result;

use crate::checking::{SetAbortChecking, SetChecking};
use crate::rbtree::{
    Contiguous, DedicatedColor, EmbeddedColor, FixedRedBlackTree, IntoIter as TreeIntoIter,
    Iter as TreeIter, NodeLinks, Pool, RedBlackTreeNode, StorageStrategy, NULL_INDEX,
};

/// An ordered set with compile-time capacity and inline storage.
///
/// # Examples
///
/// ```
/// use fxc_containers::FixedSet;
///
/// let mut set: FixedSet<i32, 4> = FixedSet::new();
/// assert!(set.insert(3));
/// assert!(set.insert(1));
/// assert!(!set.insert(3));
///
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3]);
/// ```
pub struct FixedSet<K, const N: usize, L = DedicatedColor, P = Pool, C = SetAbortChecking>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
{
    tree:      FixedRedBlackTree<K, (), N, L, P>,
    _checking: PhantomData<fn() -> C>,
}

/// Set with the colour packed into the parent index.
pub type CompactFixedSet<K, const N: usize> = FixedSet<K, N, EmbeddedColor, Pool>;

/// Set over compacting contiguous storage.
pub type ContiguousFixedSet<K, const N: usize> = FixedSet<K, N, DedicatedColor, Contiguous>;

/// Set over contiguous storage with packed colour.
pub type CompactContiguousFixedSet<K, const N: usize> = FixedSet<K, N, EmbeddedColor, Contiguous>;

impl<K, const N: usize, L, P, C> FixedSet<K, N, L, P, C>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
{
    /// Creates an empty set.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree:      FixedRedBlackTree::new(),
            _checking: PhantomData,
        }
    }

    /// Number of keys.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// `true` when empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// `true` when no further key fits.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.tree.is_full()
    }

    /// Compile-time capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Removes every key.
    #[inline]
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// The underlying tree, for index-level inspection.
    #[inline]
    #[must_use]
    pub fn tree(&self) -> &FixedRedBlackTree<K, (), N, L, P> {
        &self.tree
    }

    /// Keys in ascending order.
    #[inline]
    pub fn iter(&self) -> SetIter<'_, K, N, L, P> {
        SetIter {
            inner: self.tree.iter(),
        }
    }

    /// Smallest key.
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.tree.reachable_entry(self.tree.first_index()).map(|(k, ())| k)
    }

    /// Largest key.
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.tree.reachable_entry(self.tree.last_index()).map(|(k, ())| k)
    }

    /// Removes and returns the smallest key.
    #[inline]
    pub fn pop_first(&mut self) -> Option<K> {
        self.tree.pop_first().map(|(k, ())| k)
    }

    /// Removes and returns the largest key.
    #[inline]
    pub fn pop_last(&mut self) -> Option<K> {
        self.tree.pop_last().map(|(k, ())| k)
    }

    /// Keeps only the keys for which `keep` returns `true`.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K) -> bool,
    {
        self.tree.retain(|k, ()| keep(k));
    }
}

impl<K, const N: usize, L, P, C> FixedSet<K, N, L, P, C>
where
    K: Ord,
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
    C: SetChecking,
{
    /// Builds a set from an array; duplicates collapse.
    ///
    /// # Panics
    ///
    /// Invokes the length-error policy if the distinct keys exceed `N`.
    #[track_caller]
    pub fn from_array<const M: usize>(keys: [K; M]) -> Self {
        let mut set = Self::new();
        for key in keys {
            set.insert(key);
        }
        set
    }

    /// Adds `key`; returns `false` if it was already present.
    ///
    /// # Panics
    ///
    /// Invokes the length-error policy when a new key does not fit.
    #[track_caller]
    pub fn insert(&mut self, key: K) -> bool {
        let position = self.tree.find_index(&key);
        if position.i != NULL_INDEX {
            return false;
        }
        if self.tree.is_full() {
            C::length_error(N.saturating_add(1), Location::caller());
        }
        self.tree.insert_new_at(position, key, ());
        true
    }

    /// Adds `key`, reporting a full set as an error.
    ///
    /// # Errors
    ///
    /// Returns a capacity error when a new key does not fit.
    pub fn try_insert(&mut self, key: K) -> Result<bool> {
        self.tree
            .try_insert_or_assign(key, ())
            .map(|(_, previous)| previous.is_none())
    }

    /// `true` if `key` is present.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains_key(key)
    }

    /// The stored key equal to `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get_key_value(key).map(|(k, ())| k)
    }

    /// Removes `key`; returns whether it was present.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.erase(key).is_some()
    }

    /// Removes and returns the stored key equal to `key`.
    #[inline]
    pub fn take<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(key).map(|(k, ())| k)
    }

    /// First key not less than `key`.
    pub fn lower_bound<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.reachable_entry(self.tree.lower_bound_index(key)).map(|(k, ())| k)
    }

    /// First key greater than `key`.
    pub fn upper_bound<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.reachable_entry(self.tree.upper_bound_index(key)).map(|(k, ())| k)
    }
}

/// Borrowing iterator over the keys of a [`FixedSet`].
pub struct SetIter<'a, K, const N: usize, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
{
    inner: TreeIter<'a, K, (), N, L, P>,
}

impl<'a, K, const N: usize, L, P> Iterator for SetIter<'a, K, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
{
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, ())| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, const N: usize, L, P> DoubleEndedIterator for SetIter<'_, K, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, ())| k)
    }
}

impl<K, const N: usize, L, P> ExactSizeIterator for SetIter<'_, K, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
{
}

impl<K, const N: usize, L, P> FusedIterator for SetIter<'_, K, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
{
}

/// Owning iterator over the keys of a [`FixedSet`].
pub struct SetIntoIter<K, const N: usize, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
{
    inner: TreeIntoIter<K, (), N, L, P>,
}

impl<K, const N: usize, L, P> Iterator for SetIntoIter<K, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
{
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, ())| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, const N: usize, L, P> DoubleEndedIterator for SetIntoIter<K, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
{
    #[inline]
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(k, ())| k)
    }
}

impl<K, const N: usize, L, P> ExactSizeIterator for SetIntoIter<K, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
{
}

impl<K, const N: usize, L, P, C> Default for FixedSet<K, N, L, P, C>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, const N: usize, L, P, C> Clone for FixedSet<K, N, L, P, C>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
    P::Storage: Clone,
{
    fn clone(&self) -> Self {
        Self {
            tree:      self.tree.clone(),
            _checking: PhantomData,
        }
    }
}

impl<K, const N: usize, L, P, C> PartialEq for FixedSet<K, N, L, P, C>
where
    K: PartialEq,
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, const N: usize, L, P, C> Eq for FixedSet<K, N, L, P, C>
where
    K: Eq,
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
{
}

impl<K, const N: usize, L, P, C> fmt::Debug for FixedSet<K, N, L, P, C>
where
    K: fmt::Debug,
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, const N: usize, L, P, C> Extend<K> for FixedSet<K, N, L, P, C>
where
    K: Ord,
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
    C: SetChecking,
{
    #[track_caller]
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K, const N: usize, L, P, C> FromIterator<K> for FixedSet<K, N, L, P, C>
where
    K: Ord,
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
    C: SetChecking,
{
    #[track_caller]
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K, const N: usize, L, P, C> IntoIterator for FixedSet<K, N, L, P, C>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
{
    type Item = K;
    type IntoIter = SetIntoIter<K, N, L, P>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        SetIntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

impl<'a, K, const N: usize, L, P, C> IntoIterator for &'a FixedSet<K, N, L, P, C>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, (), L>, N>,
{
    type Item = &'a K;
    type IntoIter = SetIter<'a, K, N, L, P>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
