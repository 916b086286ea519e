// FXC - fxc-containers
// Module: FixedMap - ordered map with inline storage
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Ordered map with compile-time capacity.
//!
//! `FixedMap` composes a [`FixedRedBlackTree`] with a [`MapChecking`] policy.
//! The type parameters after the capacity select the node encoding, the
//! storage strategy and the policy:
//!
//! | Alias | Encoding | Storage |
//! |-------|----------|---------|
//! | [`FixedMap`] (defaults) | [`DedicatedColor`] | [`Pool`] |
//! | [`CompactFixedMap`] | [`EmbeddedColor`] | [`Pool`] |
//! | [`ContiguousFixedMap`] | [`DedicatedColor`] | [`Contiguous`] |
//! | [`CompactContiguousFixedMap`] | [`EmbeddedColor`] | [`Contiguous`] |

use core::borrow::Borrow;
use core::fmt;
use core::marker::PhantomData;
use core::ops::Index;
use core::panic::Location;

use fxc_error::{Error, Result};

use crate::checking::{MapAbortChecking, MapChecking};
use crate::rbtree::{
    Contiguous, DedicatedColor, EmbeddedColor, FixedRedBlackTree, IntoIter, Iter, IterMut,
    NodeLinks, Pool, RedBlackTreeNode, StorageStrategy, NULL_INDEX,
};

/// An ordered map with compile-time capacity and inline storage.
///
/// # Examples
///
/// ```
/// use fxc_containers::FixedMap;
///
/// let mut map: FixedMap<u32, &str, 8> = FixedMap::new();
/// map.insert(3, "three");
/// map.insert(1, "one");
///
/// assert_eq!(map.get(&1), Some(&"one"));
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 3]);
/// ```
pub struct FixedMap<K, V, const N: usize, L = DedicatedColor, P = Pool, C = MapAbortChecking>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    tree:      FixedRedBlackTree<K, V, N, L, P>,
    _checking: PhantomData<fn() -> C>,
}

/// Map with the colour packed into the parent index.
pub type CompactFixedMap<K, V, const N: usize> = FixedMap<K, V, N, EmbeddedColor, Pool>;

/// Map over compacting contiguous storage.
pub type ContiguousFixedMap<K, V, const N: usize> = FixedMap<K, V, N, DedicatedColor, Contiguous>;

/// Map over contiguous storage with packed colour.
pub type CompactContiguousFixedMap<K, V, const N: usize> =
    FixedMap<K, V, N, EmbeddedColor, Contiguous>;

impl<K, V, const N: usize, L, P, C> FixedMap<K, V, N, L, P, C>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    /// Creates an empty map.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree:      FixedRedBlackTree::new(),
            _checking: PhantomData,
        }
    }

    /// Number of entries.
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

    /// Removes every entry.
    #[inline]
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// The underlying tree, for index-level inspection.
    #[inline]
    #[must_use]
    pub fn tree(&self) -> &FixedRedBlackTree<K, V, N, L, P> {
        &self.tree
    }

    /// Iterator over entries in key order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V, N, L, P> {
        self.tree.iter()
    }

    /// Iterator over entries in key order with mutable values.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V, N, L, P> {
        self.tree.iter_mut()
    }

    /// Keys in order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.tree.iter().map(|(k, _)| k)
    }

    /// Values in key order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.tree.iter().map(|(_, v)| v)
    }

    /// Mutable values in key order.
    pub fn values_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut V> + ExactSizeIterator {
        self.tree.iter_mut().map(|(_, v)| v)
    }

    /// Smallest entry.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.reachable_entry(self.tree.first_index())
    }

    /// Largest entry.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.reachable_entry(self.tree.last_index())
    }

    /// Removes and returns the smallest entry.
    #[inline]
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.tree.pop_first()
    }

    /// Removes and returns the largest entry.
    #[inline]
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.tree.pop_last()
    }

    /// Keeps only the entries for which `keep` returns `true`.
    #[inline]
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.tree.retain(keep);
    }
}

impl<K, V, const N: usize, L, P, C> FixedMap<K, V, N, L, P, C>
where
    K: Ord,
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
    C: MapChecking,
{
    /// Builds a map from an array of pairs; later duplicates overwrite
    /// earlier ones.
    ///
    /// # Panics
    ///
    /// Invokes the length-error policy if the distinct keys exceed `N`.
    #[track_caller]
    pub fn from_array<const M: usize>(entries: [(K, V); M]) -> Self {
        let mut map = Self::new();
        for (key, value) in entries {
            map.insert(key, value);
        }
        map
    }

    /// Inserts or overwrites, returning the previous value.
    ///
    /// # Panics
    ///
    /// Invokes the length-error policy when a new key does not fit.
    #[track_caller]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let position = self.tree.find_index(&key);
        if position.i != NULL_INDEX {
            let slot = self.tree.value_of_mut(position.i);
            return Some(core::mem::replace(slot, value));
        }
        if self.tree.is_full() {
            C::length_error(N.saturating_add(1), Location::caller());
        }
        self.tree.insert_new_at(position, key, value);
        None
    }

    /// Inserts or overwrites, reporting a full map as an error.
    ///
    /// # Errors
    ///
    /// Returns a capacity error when a new key does not fit; the map is left
    /// unchanged.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        self.tree.try_insert_or_assign(key, value).map(|(_, old)| old)
    }

    /// Value for `key`.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(key)
    }

    /// Stored key and value for `key`.
    #[inline]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get_key_value(key)
    }

    /// Mutable value for `key`.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get_mut(key)
    }

    /// Value for a key that must be present.
    ///
    /// # Panics
    ///
    /// Invokes the out-of-range policy when `key` is missing.
    #[track_caller]
    pub fn at<Q>(&self, key: &Q) -> &V
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.tree.find(key) {
            Some(i) => self.tree.value_of(i),
            None => C::out_of_range(key, self.len(), Location::caller()),
        }
    }

    /// Mutable value for a key that must be present.
    ///
    /// # Panics
    ///
    /// Invokes the out-of-range policy when `key` is missing.
    #[track_caller]
    pub fn at_mut<Q>(&mut self, key: &Q) -> &mut V
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.tree.find(key) {
            Some(i) => self.tree.value_of_mut(i),
            None => C::out_of_range(key, self.len(), Location::caller()),
        }
    }

    /// Value for `key`, reporting a missing key as an error instead of
    /// invoking the checking policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KEY_NOT_FOUND`] when `key` is missing.
    pub fn try_at<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(key).ok_or(Error::KEY_NOT_FOUND)
    }

    /// Mutable counterpart of [`try_at`](Self::try_at).
    ///
    /// # Errors
    ///
    /// Returns [`Error::KEY_NOT_FOUND`] when `key` is missing.
    pub fn try_at_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get_mut(key).ok_or(Error::KEY_NOT_FOUND)
    }

    /// `true` if `key` is present.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains_key(key)
    }

    /// Removes `key`, returning its value.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(key).map(|(_, v)| v)
    }

    /// Removes `key`, returning the stored key and value.
    #[inline]
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(key)
    }

    /// First entry whose key is not less than `key`.
    pub fn lower_bound<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.reachable_entry(self.tree.lower_bound_index(key))
    }

    /// First entry whose key is greater than `key`.
    pub fn upper_bound<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.reachable_entry(self.tree.upper_bound_index(key))
    }
}

impl<K, V, const N: usize, L, P, C> Default for FixedMap<K, V, N, L, P, C>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, const N: usize, L, P, C> Clone for FixedMap<K, V, N, L, P, C>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
    P::Storage: Clone,
{
    fn clone(&self) -> Self {
        Self {
            tree:      self.tree.clone(),
            _checking: PhantomData,
        }
    }
}

impl<K, V, const N: usize, L, P, C> PartialEq for FixedMap<K, V, N, L, P, C>
where
    K: PartialEq,
    V: PartialEq,
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V, const N: usize, L, P, C> Eq for FixedMap<K, V, N, L, P, C>
where
    K: Eq,
    V: Eq,
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
}

impl<K, V, const N: usize, L, P, C> fmt::Debug for FixedMap<K, V, N, L, P, C>
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

impl<K, Q, V, const N: usize, L, P, C> Index<&Q> for FixedMap<K, V, N, L, P, C>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
    C: MapChecking,
{
    type Output = V;

    #[track_caller]
    fn index(&self, key: &Q) -> &V {
        self.at(key)
    }
}

impl<K, V, const N: usize, L, P, C> Extend<(K, V)> for FixedMap<K, V, N, L, P, C>
where
    K: Ord,
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
    C: MapChecking,
{
    #[track_caller]
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, const N: usize, L, P, C> FromIterator<(K, V)> for FixedMap<K, V, N, L, P, C>
where
    K: Ord,
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
    C: MapChecking,
{
    #[track_caller]
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, const N: usize, L, P, C> IntoIterator for FixedMap<K, V, N, L, P, C>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, N, L, P>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, K, V, const N: usize, L, P, C> IntoIterator for &'a FixedMap<K, V, N, L, P, C>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, N, L, P>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, const N: usize, L, P, C> IntoIterator for &'a mut FixedMap<K, V, N, L, P, C>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V, N, L, P>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::{String, ToString};
    use std::vec::Vec;

    #[test]
    fn test_insert_get_remove() {
        let mut map: FixedMap<u32, String, 8> = FixedMap::new();
        assert!(map.insert(2, "two".to_string()).is_none());
        assert!(map.insert(1, "one".to_string()).is_none());
        assert_eq!(map.insert(2, "TWO".to_string()), Some("two".to_string()));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&2).map(String::as_str), Some("TWO"));
        assert_eq!(map.remove(&1), Some("one".to_string()));
        assert!(map.remove(&1).is_none());
        assert!(!map.contains_key(&1));
    }

    #[test]
    fn test_usable_as_static() {
        static EMPTY: CompactContiguousFixedMap<u8, u8, 4> = FixedMap::new();
        assert!(EMPTY.is_empty());
        assert_eq!(EMPTY.capacity(), 4);
    }

    #[test]
    fn test_at_and_index() {
        let mut map = ContiguousFixedMap::<&str, i32, 4>::from_array([("a", 1), ("b", 2)]);
        assert_eq!(*map.at("a"), 1);
        assert_eq!(map["b"], 2);
        *map.at_mut("b") += 40;
        assert_eq!(map["b"], 42);
    }

    #[test]
    #[should_panic(expected = "key out of range")]
    fn test_at_missing_key_invokes_policy() {
        let map: FixedMap<u8, u8, 2> = FixedMap::new();
        let _ = map.at(&9);
    }

    #[test]
    fn test_try_at_reports_missing_key() {
        let mut map: CompactFixedMap<u8, u8, 2> = FixedMap::from_array([(1, 10)]);
        assert_eq!(map.try_at(&1), Ok(&10));
        *map.try_at_mut(&1).unwrap() += 1;
        assert_eq!(map[&1], 11);

        let error = map.try_at(&2).unwrap_err();
        assert_eq!(error, Error::KEY_NOT_FOUND);
        assert!(error.is_access_error());
        assert_eq!(map.try_at_mut(&2).unwrap_err().code, fxc_error::codes::KEY_NOT_FOUND);
        assert_eq!(map.len(), 1);
    }

    #[test]
    #[should_panic(expected = "map length error")]
    fn test_insert_past_capacity_invokes_policy() {
        let mut map: CompactFixedMap<u8, u8, 2> = FixedMap::new();
        map.insert(1, 1);
        map.insert(2, 2);
        map.insert(3, 3);
    }

    #[test]
    fn test_overwrite_in_full_map_is_allowed() {
        let mut map: FixedMap<u8, u8, 2> = FixedMap::from_array([(1, 1), (2, 2)]);
        assert!(map.is_full());
        assert_eq!(map.insert(2, 20), Some(2));
        assert_eq!(map.try_insert(1, 10).unwrap(), Some(1));
    }

    #[test]
    fn test_try_insert_full_is_error() {
        let mut map: ContiguousFixedMap<u8, u8, 1> = FixedMap::new();
        assert!(map.try_insert(1, 1).unwrap().is_none());
        let error = map.try_insert(2, 2).unwrap_err();
        assert!(error.is_capacity_error());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_ordered_views() {
        let map: FixedMap<i32, char, 8> = [(3, 'c'), (1, 'a'), (5, 'e')].into_iter().collect();
        assert_eq!(map.first_key_value(), Some((&1, &'a')));
        assert_eq!(map.last_key_value(), Some((&5, &'e')));
        assert_eq!(map.lower_bound(&2), Some((&3, &'c')));
        assert_eq!(map.upper_bound(&3), Some((&5, &'e')));
        assert_eq!(map.upper_bound(&5), None);
        assert_eq!(map.keys().rev().copied().collect::<Vec<_>>(), [5, 3, 1]);
        assert_eq!(map.values().collect::<String>(), "ace");
    }

    #[test]
    fn test_values_mut_and_retain() {
        let mut map: CompactContiguousFixedMap<u32, u32, 16> = (0..10).map(|k| (k, k)).collect();
        for v in map.values_mut() {
            *v *= 10;
        }
        map.retain(|k, _| k % 2 == 1);
        assert_eq!(map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(), [
            (1, 10),
            (3, 30),
            (5, 50),
            (7, 70),
            (9, 90)
        ]);
        map.tree().verify_invariants().unwrap();
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a: FixedMap<u8, u8, 4> = FixedMap::from_array([(1, 1), (2, 2), (3, 3)]);
        let mut b: FixedMap<u8, u8, 4> = FixedMap::from_array([(3, 3), (1, 1), (2, 2)]);
        assert_eq!(a, b);
        b.insert(4, 4);
        assert_ne!(a, b);
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn test_debug_and_into_iter() {
        let map: FixedMap<u8, &str, 4> = FixedMap::from_array([(2, "b"), (1, "a")]);
        assert_eq!(std::format!("{map:?}"), r#"{1: "a", 2: "b"}"#);
        let drained: Vec<(u8, &str)> = map.into_iter().collect();
        assert_eq!(drained, [(1, "a"), (2, "b")]);
    }

    #[test]
    fn test_pop_and_clear() {
        let mut map: ContiguousFixedMap<u8, u8, 4> = FixedMap::from_array([(1, 1), (2, 2), (3, 3)]);
        assert_eq!(map.pop_first(), Some((1, 1)));
        assert_eq!(map.pop_last(), Some((3, 3)));
        map.clear();
        assert!(map.is_empty());
        assert!(map.first_key_value().is_none());
    }
}
