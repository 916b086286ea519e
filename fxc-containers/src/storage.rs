// FXC - fxc-containers
// Module: Index-based storage contract
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

// Declares `unsafe` accessors; implementations document their invariants.
#![allow(unsafe_code)]

//! The contract shared by every index-based storage strategy.
//!
//! Two strategies implement it:
//!
//! | Strategy | Delete cost | Moves other elements | Index stability |
//! |----------|-------------|----------------------|-----------------|
//! | [`FixedIndexPoolStorage`](crate::FixedIndexPoolStorage) | O(1) | never | all surviving indices |
//! | [`FixedIndexContiguousStorage`](crate::FixedIndexContiguousStorage) | O(1) | the last element | all but the former last |
//!
//! Code written against [`IndexBasedStorage`] (the red-black tree in
//! particular) must treat the index returned by
//! [`IndexBasedStorage::delete_at_and_return_repositioned_index`] as
//! authoritative: when it differs from the deleted index, the element that
//! lived at the returned index now lives at the deleted one.

/// Fixed-capacity storage addressed by `usize` indices.
///
/// Liveness is not checked by accessors: reading a free index is undefined
/// behavior, hence the `unsafe` signatures. Capacity exhaustion is fatal.
pub trait IndexBasedStorage: Sized {
    /// Element type held in each live slot.
    type Item;

    /// Compile-time capacity.
    const CAPACITY: usize;

    /// An empty storage, usable in `const` contexts.
    const EMPTY: Self;

    /// Number of live elements.
    fn len(&self) -> usize;

    /// `true` when no element is live.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` when every slot is live.
    #[inline]
    fn is_full(&self) -> bool {
        self.len() == Self::CAPACITY
    }

    /// Returns `true` if `index` currently holds a live element.
    fn contains_at(&self, index: usize) -> bool;

    /// Returns a reference to the element at `index`.
    ///
    /// # Safety
    ///
    /// `index` must be live.
    unsafe fn at(&self, index: usize) -> &Self::Item;

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Safety
    ///
    /// `index` must be live.
    unsafe fn at_mut(&mut self, index: usize) -> &mut Self::Item;

    /// Returns a raw pointer to the element slot at `index` without creating
    /// a reference to the storage.
    ///
    /// # Safety
    ///
    /// `this` must point to a valid storage and `index` must be below
    /// [`IndexBasedStorage::CAPACITY`]. The pointee is initialized only if
    /// `index` is live.
    unsafe fn slot_ptr(this: *mut Self, index: usize) -> *mut Self::Item;

    /// Stores `value` in a free slot and returns that slot's index.
    ///
    /// # Panics
    ///
    /// Panics when the storage is full; this is a fatal condition.
    fn emplace_and_return_index(&mut self, value: Self::Item) -> usize;

    /// Moves the element at `index` out and frees its slot.
    ///
    /// Returns the element and the repositioned index (see
    /// [`IndexBasedStorage::delete_at_and_return_repositioned_index`]).
    ///
    /// # Safety
    ///
    /// `index` must be live.
    unsafe fn take_at_and_return_repositioned_index(&mut self, index: usize)
        -> (Self::Item, usize);

    /// Drops the element at `index` and frees its slot.
    ///
    /// The returned index tells the caller which element, if any, moved:
    /// when it differs from `index`, the element previously stored there now
    /// lives at `index`.
    ///
    /// # Safety
    ///
    /// `index` must be live.
    #[inline]
    unsafe fn delete_at_and_return_repositioned_index(&mut self, index: usize) -> usize {
        // SAFETY: forwarded from the caller
        let (_dropped, repositioned) = unsafe { self.take_at_and_return_repositioned_index(index) };
        repositioned
    }

    /// Drops every live element and returns to the empty state.
    fn clear(&mut self);
}
