// FXC - fxc-containers
// Module: IndexOrValue - untagged free-list/value cell
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

// Union field access is inherently unsafe; every read is gated by the owning
// storage's liveness bookkeeping.
#![allow(unsafe_code)]

//! A storage cell that holds either a live value or a free-list link.
//!
//! The cell carries no discriminant. Which member is active is known only to
//! the owning storage (through its free list and live count), so every read
//! of either member is `unsafe` and documents which member must be active.
//!
//! # Triviality
//!
//! `IndexOrValue<T>` has no drop glue for any `T` and is `Copy` exactly when
//! `T: Copy`. Cloning a non-`Copy` payload needs liveness information the
//! cell does not have, so it is offered only as the `unsafe`
//! [`IndexOrValue::clone_value`]. Dropping a live payload is likewise the
//! owner's job ([`IndexOrValue::drop_value`]).

use core::fmt;
use core::mem::ManuallyDrop;

/// Untagged union of a free-list link and a value.
///
/// `#[repr(C)]` places both members at offset 0, so a pointer to the cell is
/// also a pointer to the value when the value is active.
#[repr(C)]
pub union IndexOrValue<T> {
    index: usize,
    value: ManuallyDrop<T>,
}

impl<T> IndexOrValue<T> {
    /// Creates a free cell linking to `next`.
    #[inline]
    #[must_use]
    pub const fn free(next: usize) -> Self {
        Self { index: next }
    }

    /// Creates a cell holding a live value.
    #[inline]
    #[must_use]
    pub const fn with_value(value: T) -> Self {
        Self {
            value: ManuallyDrop::new(value),
        }
    }

    /// Turns the cell into a free-list link.
    ///
    /// A live value is overwritten without being dropped; drop it first with
    /// [`IndexOrValue::drop_value`] or move it out with
    /// [`IndexOrValue::take_value`].
    #[inline]
    pub fn set_next_free(&mut self, next: usize) {
        self.index = next;
    }

    /// Writes a value into the cell without dropping what was there.
    #[inline]
    pub fn write(&mut self, value: T) {
        self.value = ManuallyDrop::new(value);
    }

    /// Returns the free-list link.
    ///
    /// # Safety
    ///
    /// The index member must be active (the cell is on the free list).
    #[inline]
    #[must_use]
    pub unsafe fn next_free(&self) -> usize {
        // SAFETY: caller guarantees the index member is active
        unsafe { self.index }
    }

    /// Returns a reference to the value.
    ///
    /// # Safety
    ///
    /// The value member must be active (the cell is live).
    #[inline]
    #[must_use]
    pub unsafe fn value(&self) -> &T {
        // SAFETY: caller guarantees the value member is active
        unsafe { &self.value }
    }

    /// Returns a mutable reference to the value.
    ///
    /// # Safety
    ///
    /// The value member must be active (the cell is live).
    #[inline]
    #[must_use]
    pub unsafe fn value_mut(&mut self) -> &mut T {
        // SAFETY: caller guarantees the value member is active
        unsafe { &mut self.value }
    }

    /// Moves the value out, leaving the cell logically uninitialized.
    ///
    /// # Safety
    ///
    /// The value member must be active. Afterwards the cell must be treated
    /// as free: the value may not be read or dropped again.
    #[inline]
    #[must_use]
    pub unsafe fn take_value(&mut self) -> T {
        // SAFETY: caller guarantees the value member is active and is not
        // used again
        unsafe { ManuallyDrop::take(&mut self.value) }
    }

    /// Drops the value in place.
    ///
    /// # Safety
    ///
    /// Same contract as [`IndexOrValue::take_value`].
    #[inline]
    pub unsafe fn drop_value(&mut self) {
        // SAFETY: caller guarantees the value member is active and is not
        // used again
        unsafe { ManuallyDrop::drop(&mut self.value) }
    }

    /// Clones the cell, treating the value member as active.
    ///
    /// # Safety
    ///
    /// The value member must be active.
    #[inline]
    #[must_use]
    pub unsafe fn clone_value(&self) -> Self
    where
        T: Clone,
    {
        // SAFETY: forwarded from the caller
        Self::with_value(unsafe { self.value() }.clone())
    }
}

impl<T: Copy> Clone for IndexOrValue<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Copy> Copy for IndexOrValue<T> {}

impl<T> fmt::Debug for IndexOrValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The active member is unknown here.
        f.debug_struct("IndexOrValue").finish_non_exhaustive()
    }
}
