// FXC - fxc-containers
// Module: FixedIndexPoolStorage - free-list slot pool
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

// Slots are untagged unions; liveness comes from the free list.
#![allow(unsafe_code)]

//! Index-stable pool storage with an intrusive free list.
//!
//! Free slots hold the index of the next free slot, threaded through the
//! slot array itself. A fresh pool links slot `i` to `i + 1`; the chain ends
//! at `N`, which is never dereferenced because allocation stops at
//! `len == N`.
//!
//! # Characteristics
//!
//! - **Zero allocation**: `[IndexOrValue<T>; N]` inline
//! - **O(1) emplace and delete**: pop/push on the free list
//! - **Index stability**: deleting never moves another element
//! - **LIFO reuse**: the most recently freed slot is allocated next

use core::fmt;
use core::mem;

use crate::slot::IndexOrValue;
use crate::storage::IndexBasedStorage;
use crate::trap;

/// Fixed-capacity slot pool.
///
/// # Invariants
///
/// 1. `len <= N`
/// 2. Exactly `N - len` slots are free, and all of them are reachable by
///    following the links from `next_free_index`
/// 3. Free slots hold the index member, live slots the value member
pub struct FixedIndexPoolStorage<T, const N: usize> {
    slots:           [IndexOrValue<T>; N],
    next_free_index: usize,
    len:             usize,
}

impl<T, const N: usize> FixedIndexPoolStorage<T, N> {
    /// Creates an empty pool with the whole slot array on the free list.
    #[must_use]
    pub const fn new() -> Self {
        let mut slots = [const { IndexOrValue::free(0) }; N];
        let mut i = 0;
        while i < N {
            slots[i] = IndexOrValue::free(i + 1);
            i += 1;
        }
        Self {
            slots,
            next_free_index: 0,
            len: 0,
        }
    }

    /// Returns the number of live elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no element is live.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if every slot is live.
    #[inline]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// Returns the compile-time capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns the head of the free list (`N` when full).
    #[inline]
    #[must_use]
    pub const fn next_free_index(&self) -> usize {
        self.next_free_index
    }

    /// Follows the free-list link stored in slot `index`.
    ///
    /// # Safety
    ///
    /// `index` must be on the free list.
    #[inline]
    unsafe fn link(&self, index: usize) -> usize {
        // SAFETY: caller guarantees the index member is active
        unsafe { self.slots[index].next_free() }
    }

    /// Reorders the free list so it visits slots in ascending index order.
    ///
    /// Bottom-up merge sort over the links themselves: no scratch space, and
    /// the set of free slots is unchanged. Returns the new head.
    fn sort_free_list(&mut self) -> usize {
        let mut list = self.next_free_index;
        let mut run = 1;
        loop {
            let mut p = list;
            let mut tail = N;
            let mut merges = 0;
            list = N;
            while p != N {
                merges += 1;
                let mut q = p;
                let mut p_len = 0;
                while p_len < run && q != N {
                    p_len += 1;
                    // SAFETY: `q` was reached by following free-list links
                    q = unsafe { self.link(q) };
                }
                let mut q_len = run;
                while p_len > 0 || (q_len > 0 && q != N) {
                    let take_p = q_len == 0 || q == N || (p_len > 0 && p <= q);
                    let next = if take_p { p } else { q };
                    // SAFETY: `next` is a node of the free list being merged
                    let after = unsafe { self.link(next) };
                    if take_p {
                        p = after;
                        p_len -= 1;
                    } else {
                        q = after;
                        q_len -= 1;
                    }
                    if tail == N {
                        list = next;
                    } else {
                        self.slots[tail].set_next_free(next);
                    }
                    tail = next;
                }
                p = q;
            }
            if tail != N {
                self.slots[tail].set_next_free(N);
            }
            if merges <= 1 {
                self.next_free_index = list;
                return list;
            }
            run *= 2;
        }
    }

    /// Drops every live value, visiting slots in index order.
    ///
    /// The free list is left sorted but otherwise intact. If a destructor
    /// panics the remaining live values are leaked, never dropped twice, as
    /// long as the caller resets the slots afterwards.
    fn drop_live_values(&mut self) {
        if !mem::needs_drop::<T>() || self.len == 0 {
            return;
        }
        let mut next_free = self.sort_free_list();
        for i in 0..N {
            if i == next_free {
                // SAFETY: `i` is the next slot of the sorted free list
                next_free = unsafe { self.link(i) };
            } else {
                // SAFETY: not on the free list, so the value member is active
                unsafe { self.slots[i].drop_value() };
            }
        }
    }

    /// Re-chains slot `i` to `i + 1` and forgets every value.
    fn reset_free_list(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.set_next_free(i + 1);
        }
        self.next_free_index = 0;
        self.len = 0;
    }
}

/// Empties the pool when dropped, including while unwinding out of a
/// panicking destructor.
struct ResetOnDrop<'a, T, const N: usize>(&'a mut FixedIndexPoolStorage<T, N>);

impl<T, const N: usize> Drop for ResetOnDrop<'_, T, N> {
    fn drop(&mut self) {
        self.0.reset_free_list();
    }
}

impl<T, const N: usize> IndexBasedStorage for FixedIndexPoolStorage<T, N> {
    type Item = T;

    const CAPACITY: usize = N;
    const EMPTY: Self = Self::new();

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn contains_at(&self, index: usize) -> bool {
        if index >= N {
            return false;
        }
        let mut free = self.next_free_index;
        for _ in 0..(N - self.len) {
            if free == index {
                return false;
            }
            // SAFETY: every slot reached from the free-list head within
            // `N - len` steps is free (invariant 2)
            free = unsafe { self.link(free) };
        }
        true
    }

    #[inline]
    unsafe fn at(&self, index: usize) -> &T {
        // SAFETY: caller guarantees `index` is live
        unsafe { self.slots[index].value() }
    }

    #[inline]
    unsafe fn at_mut(&mut self, index: usize) -> &mut T {
        // SAFETY: caller guarantees `index` is live
        unsafe { self.slots[index].value_mut() }
    }

    #[inline]
    unsafe fn slot_ptr(this: *mut Self, index: usize) -> *mut T {
        // SAFETY: `this` is valid and `index < N`; IndexOrValue is repr(C),
        // so the value member sits at the start of each slot
        unsafe {
            core::ptr::addr_of_mut!((*this).slots)
                .cast::<IndexOrValue<T>>()
                .add(index)
                .cast::<T>()
        }
    }

    fn emplace_and_return_index(&mut self, value: T) -> usize {
        if self.is_full() {
            trap::capacity_exhausted("FixedIndexPoolStorage", N);
        }
        let index = self.next_free_index;
        // SAFETY: not full, so the head of the free list is a free slot
        self.next_free_index = unsafe { self.slots[index].next_free() };
        self.slots[index].write(value);
        self.len += 1;
        trace_event!(trace, index, len = self.len, "pool emplace");
        index
    }

    unsafe fn take_at_and_return_repositioned_index(&mut self, index: usize) -> (T, usize) {
        // SAFETY: caller guarantees `index` is live
        let value = unsafe { self.slots[index].take_value() };
        self.slots[index].set_next_free(self.next_free_index);
        self.next_free_index = index;
        self.len -= 1;
        trace_event!(trace, index, len = self.len, "pool delete");
        // Pool storage never relocates: the deleted index is its own
        // repositioned index.
        (value, index)
    }

    fn clear(&mut self) {
        let mut guard = ResetOnDrop(self);
        guard.0.drop_live_values();
    }
}

impl<T, const N: usize> Drop for FixedIndexPoolStorage<T, N> {
    fn drop(&mut self) {
        self.drop_live_values();
    }
}

impl<T, const N: usize> Default for FixedIndexPoolStorage<T, N> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for FixedIndexPoolStorage<T, N> {
    /// Clones slot-for-slot, so every live index and the free-list order are
    /// preserved in the copy.
    fn clone(&self) -> Self {
        // Free slots of the copy are first marked with an out-of-range link;
        // every slot of `out` holds its index member until visited below.
        const FREE_MARK: usize = usize::MAX;
        let mut out = Self::new();
        let mut free = self.next_free_index;
        for _ in 0..(N - self.len) {
            out.slots[free].set_next_free(FREE_MARK);
            // SAFETY: reached from the free-list head within `N - len` steps
            free = unsafe { self.link(free) };
        }
        for i in 0..N {
            // SAFETY: slot `i` of `out` has not been overwritten yet
            out.slots[i] = if unsafe { out.link(i) } == FREE_MARK {
                // SAFETY: marked free, so the index member is active in `self`
                IndexOrValue::free(unsafe { self.link(i) })
            } else {
                // SAFETY: live slot, value member active
                unsafe { self.slots[i].clone_value() }
            };
        }
        // `out.len` stays 0 until every slot is populated, so a panicking
        // `T::clone` leaks the finished clones instead of dropping garbage.
        out.next_free_index = self.next_free_index;
        out.len = self.len;
        out
    }
}

impl<T, const N: usize> fmt::Debug for FixedIndexPoolStorage<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedIndexPoolStorage")
            .field("len", &self.len)
            .field("capacity", &N)
            .field("next_free_index", &self.next_free_index)
            .finish()
    }
}

// ============================================================================
// KANI Formal Verification
// ============================================================================

#[cfg(kani)]
mod verification {
    use super::*;

    #[kani::proof]
    #[kani::unwind(6)]
    fn verify_free_list_accounting() {
        let mut pool: FixedIndexPoolStorage<u32, 4> = FixedIndexPoolStorage::new();
        let a = pool.emplace_and_return_index(kani::any());
        let b = pool.emplace_and_return_index(kani::any());
        assert!(a != b);
        // SAFETY: `a` is live
        let repositioned = unsafe { pool.delete_at_and_return_repositioned_index(a) };
        assert!(repositioned == a);
        assert!(pool.len() == 1);
        assert!(pool.emplace_and_return_index(kani::any()) == a);
    }
}

// ============================================================================
// Tests
// ============================================================================
