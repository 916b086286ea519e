// FXC - fxc-containers
// Module: Red-black tree iterators
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

// IterMut walks the tree through raw node pointers.
#![allow(unsafe_code)]

//! In-order iterators over a [`FixedRedBlackTree`].
//!
//! Both ends advance by successor/predecessor navigation over node indices
//! and stop once `remaining` reaches zero, so the iterators are
//! double-ended and exact-size.

use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ptr::{self, NonNull};

use super::node::{NodeLinks, RedBlackTreeNode};
use super::storage::{FixedRedBlackTreeStorage, StorageStrategy};
use super::tree::{next_in_order, prev_in_order, FixedRedBlackTree};
use super::types::NodeIndex;

/// Borrowing in-order iterator.
pub struct Iter<'a, K, V, const N: usize, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    tree:      &'a FixedRedBlackTree<K, V, N, L, P>,
    front:     NodeIndex,
    back:      NodeIndex,
    remaining: usize,
}

impl<'a, K, V, const N: usize, L, P> Iter<'a, K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    pub(super) fn new(tree: &'a FixedRedBlackTree<K, V, N, L, P>) -> Self {
        Self {
            tree,
            front: tree.first_index(),
            back: tree.last_index(),
            remaining: tree.len(),
        }
    }

    fn entry(&self, i: NodeIndex) -> (&'a K, &'a V) {
        let tree: &'a FixedRedBlackTree<K, V, N, L, P> = self.tree;
        (tree.key_of(i), tree.value_of(i))
    }
}

impl<'a, K, V, const N: usize, L, P> Iterator for Iter<'a, K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.front;
        self.remaining -= 1;
        self.front = self.tree.next_index(i);
        Some(self.entry(i))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, const N: usize, L, P> DoubleEndedIterator for Iter<'_, K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.back;
        self.remaining -= 1;
        self.back = self.tree.prev_index(i);
        Some(self.entry(i))
    }
}

impl<K, V, const N: usize, L, P> ExactSizeIterator for Iter<'_, K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
}

impl<K, V, const N: usize, L, P> FusedIterator for Iter<'_, K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
}

impl<K, V, const N: usize, L, P> Clone for Iter<'_, K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    fn clone(&self) -> Self {
        Self {
            tree:      self.tree,
            front:     self.front,
            back:      self.back,
            remaining: self.remaining,
        }
    }
}

/// In-order iterator yielding mutable values.
///
/// Holds a raw pointer to the tree instead of `&mut`, so that yielded
/// `&mut V` borrows never overlap a reference the iterator creates later.
/// Navigation reads only the link fields of nodes.
pub struct IterMut<'a, K, V, const N: usize, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    tree:      NonNull<FixedRedBlackTree<K, V, N, L, P>>,
    front:     NodeIndex,
    back:      NodeIndex,
    remaining: usize,
    _marker:   PhantomData<&'a mut FixedRedBlackTree<K, V, N, L, P>>,
}

// SAFETY: `IterMut` behaves as `&'a mut` tree that hands out `&K` and
// `&mut V` and only reads the links, so these bounds mirror `&mut` borrows
// of the parts it exposes.
unsafe impl<K, V, const N: usize, L, P> Send for IterMut<'_, K, V, N, L, P>
where
    K: Sync,
    V: Send,
    L: NodeLinks + Sync,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
}

// SAFETY: shared access to the iterator exposes nothing beyond `&K`, `&V`
// and link reads.
unsafe impl<K, V, const N: usize, L, P> Sync for IterMut<'_, K, V, N, L, P>
where
    K: Sync,
    V: Sync,
    L: NodeLinks + Sync,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
}

impl<'a, K, V, const N: usize, L, P> IterMut<'a, K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    pub(super) fn new(tree: &'a mut FixedRedBlackTree<K, V, N, L, P>) -> Self {
        let front = tree.first_index();
        let back = tree.last_index();
        let remaining = tree.len();
        Self {
            tree: NonNull::from(tree),
            front,
            back,
            remaining,
            _marker: PhantomData,
        }
    }

    fn node_ptr(&self, i: NodeIndex) -> *mut RedBlackTreeNode<K, V, L> {
        let tree = self.tree.as_ptr();
        // SAFETY: the tree outlives 'a and `i` is a reachable, in-range index
        unsafe { FixedRedBlackTreeStorage::node_ptr(ptr::addr_of_mut!((*tree).storage), i) }
    }

    fn links(&self, i: NodeIndex) -> L {
        let node = self.node_ptr(i);
        // SAFETY: `i` is live; only the links field is read, which no
        // yielded borrow covers
        unsafe { ptr::addr_of!((*node).links).read() }
    }

    fn entry(&self, i: NodeIndex) -> (&'a K, &'a mut V) {
        let node = self.node_ptr(i);
        // SAFETY: `i` is live and yielded at most once, since `remaining`
        // bounds the two ends from crossing
        unsafe { (&*ptr::addr_of!((*node).key), &mut *ptr::addr_of_mut!((*node).value)) }
    }
}

impl<'a, K, V, const N: usize, L, P> Iterator for IterMut<'a, K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.front;
        self.remaining -= 1;
        let next = next_in_order(i, &|j| self.links(j));
        self.front = next;
        Some(self.entry(i))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, const N: usize, L, P> DoubleEndedIterator for IterMut<'_, K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.back;
        self.remaining -= 1;
        let prev = prev_in_order(i, &|j| self.links(j));
        self.back = prev;
        Some(self.entry(i))
    }
}

impl<K, V, const N: usize, L, P> ExactSizeIterator for IterMut<'_, K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
}

impl<K, V, const N: usize, L, P> FusedIterator for IterMut<'_, K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
}

/// Owning in-order iterator; each step removes the smallest (or largest)
/// entry from the tree it owns.
pub struct IntoIter<K, V, const N: usize, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    tree: FixedRedBlackTree<K, V, N, L, P>,
}

impl<K, V, const N: usize, L, P> Iterator for IntoIter<K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<(K, V)> {
        self.tree.pop_first()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<K, V, const N: usize, L, P> DoubleEndedIterator for IntoIter<K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    #[inline]
    fn next_back(&mut self) -> Option<(K, V)> {
        self.tree.pop_last()
    }
}

impl<K, V, const N: usize, L, P> ExactSizeIterator for IntoIter<K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
}

impl<K, V, const N: usize, L, P> FusedIterator for IntoIter<K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
}

impl<K, V, const N: usize, L, P> IntoIterator for FixedRedBlackTree<K, V, N, L, P>
where
    L: NodeLinks,
    P: StorageStrategy<RedBlackTreeNode<K, V, L>, N>,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, N, L, P>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { tree: self }
    }
}

impl<'a, K, V, const N: usize, L, P> IntoIterator for &'a FixedRedBlackTree<K, V, N, L, P>
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

impl<'a, K, V, const N: usize, L, P> IntoIterator for &'a mut FixedRedBlackTree<K, V, N, L, P>
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
    use crate::rbtree::node::{DedicatedColor, EmbeddedColor};
    use crate::rbtree::storage::{Contiguous, Pool};
    use crate::rbtree::tree::FixedRedBlackTree;
    use std::vec::Vec;

    #[test]
    fn test_iter_is_sorted_and_exact_size() {
        let mut tree: FixedRedBlackTree<u32, char, 8, DedicatedColor, Pool> = FixedRedBlackTree::new();
        for (k, v) in [(3, 'c'), (1, 'a'), (2, 'b')] {
            tree.insert_or_assign(k, v);
        }
        let iter = tree.iter();
        assert_eq!(iter.len(), 3);
        let pairs: Vec<_> = iter.map(|(k, v)| (*k, *v)).collect();
        assert_eq!(pairs, [(1, 'a'), (2, 'b'), (3, 'c')]);
    }

    #[test]
    fn test_iter_from_both_ends_meets_once() {
        let mut tree: FixedRedBlackTree<u32, (), 8, EmbeddedColor, Contiguous> = FixedRedBlackTree::new();
        for k in 0..5 {
            tree.insert_or_assign(k, ());
        }
        let mut iter = tree.iter();
        assert_eq!(iter.next().map(|(k, _)| *k), Some(0));
        assert_eq!(iter.next_back().map(|(k, _)| *k), Some(4));
        assert_eq!(iter.next_back().map(|(k, _)| *k), Some(3));
        assert_eq!(iter.next().map(|(k, _)| *k), Some(1));
        assert_eq!(iter.next().map(|(k, _)| *k), Some(2));
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());
    }

    #[test]
    fn test_iter_rev() {
        let mut tree: FixedRedBlackTree<i8, i8, 4> = FixedRedBlackTree::new();
        for k in [2, 4, 1, 3] {
            tree.insert_or_assign(k, -k);
        }
        let keys: Vec<i8> = tree.iter().rev().map(|(k, _)| *k).collect();
        assert_eq!(keys, [4, 3, 2, 1]);
    }

    #[test]
    fn test_iter_mut_updates_values_in_place() {
        let mut tree: FixedRedBlackTree<u32, u32, 16, EmbeddedColor, Contiguous> = FixedRedBlackTree::new();
        for k in 0..10 {
            tree.insert_or_assign(k, 0);
        }
        let mut held: Vec<&mut u32> = Vec::new();
        for (k, v) in tree.iter_mut() {
            *v = k * 2;
            held.push(v);
        }
        // Every yielded borrow stays usable at once.
        for v in held {
            *v += 1;
        }
        assert!(tree.iter().all(|(k, v)| *v == k * 2 + 1));
        tree.verify_invariants().unwrap();
    }

    #[test]
    fn test_into_iter_drains_in_order() {
        let mut tree: FixedRedBlackTree<u8, std::string::String, 8, EmbeddedColor, Contiguous> =
            FixedRedBlackTree::new();
        for k in [5, 1, 3, 2, 4] {
            tree.insert_or_assign(k, std::format!("v{k}"));
        }
        let mut iter = tree.into_iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next_back().map(|(k, _)| k), Some(5));
        let rest: Vec<u8> = iter.map(|(k, _)| k).collect();
        assert_eq!(rest, [1, 2, 3, 4]);
    }

    #[test]
    fn test_iter_mut_double_ended() {
        let mut tree: FixedRedBlackTree<u8, u8, 4> = FixedRedBlackTree::new();
        for k in 0..4 {
            tree.insert_or_assign(k, k);
        }
        let mut iter = tree.iter_mut();
        assert_eq!(iter.len(), 4);
        if let Some((_, v)) = iter.next_back() {
            *v = 99;
        }
        assert_eq!(iter.len(), 3);
        drop(iter);
        assert_eq!(tree.get(&3), Some(&99));
    }

    #[test]
    fn test_iter_mut_crosses_threads() {
        fn assert_send_sync<T: Send + Sync>(_: &T) {}

        let mut tree: FixedRedBlackTree<u16, u16, 8, EmbeddedColor, Pool> = FixedRedBlackTree::new();
        for k in 0..6 {
            tree.insert_or_assign(k, 0);
        }
        let iter = tree.iter_mut();
        assert_send_sync(&iter);
        std::thread::scope(|scope| {
            scope.spawn(move || {
                for (k, v) in iter {
                    *v = k + 100;
                }
            });
        });
        assert!(tree.iter().all(|(k, v)| *v == k + 100));
    }
}
