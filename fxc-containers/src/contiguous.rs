// FXC - fxc-containers
// Module: FixedIndexContiguousStorage - compacting dense storage
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

// Unchecked indexing into the packed vector.
#![allow(unsafe_code)]

//! Dense index-based storage that compacts on delete.
//!
//! Live elements always occupy `[0, len)`. Deleting index `i` moves the last
//! element into `i`, so the delete call returns the *new length*: that is the
//! index the moved element used to occupy, and it equals `i` exactly when no
//! element moved.

use core::fmt;

use crate::storage::IndexBasedStorage;
use crate::vec::FixedVec;

/// Fixed-capacity storage with no free list.
///
/// # Invariants
///
/// 1. Indices `[0, len)` are exactly the live set
/// 2. A delete invalidates only the deleted index and the former last index
pub struct FixedIndexContiguousStorage<T, const N: usize> {
    array: FixedVec<T, N>,
}

impl<T, const N: usize> FixedIndexContiguousStorage<T, N> {
    /// Creates an empty storage.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            array: FixedVec::new(),
        }
    }

    /// Returns the number of live elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.array.len()
    }

    /// Returns `true` if no element is live.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// Returns `true` if the storage is at capacity.
    #[inline]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.array.is_full()
    }

    /// Returns the live elements in storage order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.array.as_slice()
    }
}

impl<T, const N: usize> IndexBasedStorage for FixedIndexContiguousStorage<T, N> {
    type Item = T;

    const CAPACITY: usize = N;
    const EMPTY: Self = Self::new();

    #[inline]
    fn len(&self) -> usize {
        self.array.len()
    }

    #[inline]
    fn contains_at(&self, index: usize) -> bool {
        index < self.array.len()
    }

    #[inline]
    unsafe fn at(&self, index: usize) -> &T {
        // SAFETY: caller guarantees `index < len`
        unsafe { self.array.as_slice().get_unchecked(index) }
    }

    #[inline]
    unsafe fn at_mut(&mut self, index: usize) -> &mut T {
        // SAFETY: caller guarantees `index < len`
        unsafe { self.array.as_mut_slice().get_unchecked_mut(index) }
    }

    #[inline]
    unsafe fn slot_ptr(this: *mut Self, index: usize) -> *mut T {
        // SAFETY: forwarded from the caller
        unsafe { FixedVec::slot_ptr(core::ptr::addr_of_mut!((*this).array), index) }
    }

    #[track_caller]
    fn emplace_and_return_index(&mut self, value: T) -> usize {
        self.array.push(value);
        let index = self.array.len() - 1;
        trace_event!(trace, index, "contiguous emplace");
        index
    }

    unsafe fn take_at_and_return_repositioned_index(&mut self, index: usize) -> (T, usize) {
        let value = self.array.swap_remove(index);
        let new_len = self.array.len();
        trace_event!(trace, index, moved_from = new_len, "contiguous delete");
        (value, new_len)
    }

    #[inline]
    fn clear(&mut self) {
        self.array.clear();
    }
}

impl<T, const N: usize> Default for FixedIndexContiguousStorage<T, N> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for FixedIndexContiguousStorage<T, N> {
    fn clone(&self) -> Self {
        Self {
            array: self.array.clone(),
        }
    }
}

impl<T, const N: usize> fmt::Debug for FixedIndexContiguousStorage<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedIndexContiguousStorage")
            .field("len", &self.array.len())
            .field("capacity", &N)
            .finish()
    }
}

#[cfg(kani)]
mod verification {
    use super::*;

    #[kani::proof]
    #[kani::unwind(5)]
    fn verify_delete_returns_new_len() {
        let mut storage: FixedIndexContiguousStorage<u8, 3> = FixedIndexContiguousStorage::new();
        storage.emplace_and_return_index(kani::any());
        storage.emplace_and_return_index(kani::any());
        storage.emplace_and_return_index(kani::any());
        let index: usize = kani::any();
        kani::assume(index < 3);
        // SAFETY: `index < len`
        let repositioned = unsafe { storage.delete_at_and_return_repositioned_index(index) };
        assert!(repositioned == 2);
        assert!(storage.len() == 2);
    }
}
