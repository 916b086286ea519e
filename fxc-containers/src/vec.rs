// FXC - fxc-containers
// Module: FixedVec - Inline-storage vector
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

// Allow unsafe code for MaybeUninit operations
#![allow(unsafe_code)]

//! Fixed-capacity vector with inline storage.
//!
//! `FixedVec<T, N>` is the dense backing store of
//! [`FixedIndexContiguousStorage`](crate::FixedIndexContiguousStorage), and is
//! usable on its own.
//!
//! # Characteristics
//!
//! - **Zero allocation**: All memory is inline `[MaybeUninit<T>; N]`
//! - **O(1) push, pop and swap-remove**
//! - **RAII cleanup**: live elements are dropped with the vector
//! - **Slice access**: `Deref<Target = [T]>`

use core::fmt;
use core::mem::{self, MaybeUninit};
use core::ops::{Deref, DerefMut};
use core::ptr;

use fxc_error::{Error, Result};

use crate::trap;

/// A vector with compile-time capacity and inline storage.
///
/// # Invariants
///
/// 1. `len <= N` always holds
/// 2. Elements `[0, len)` are initialized
/// 3. Elements `[len, N)` are uninitialized
///
/// # Examples
///
/// ```
/// use fxc_containers::FixedVec;
///
/// let mut vec = FixedVec::<u32, 4>::new();
/// vec.push(1);
/// vec.push(2);
/// vec.push(3);
///
/// assert_eq!(vec.swap_remove(0), 1);
/// assert_eq!(&vec[..], &[3, 2]);
/// ```
pub struct FixedVec<T, const N: usize> {
    data: [MaybeUninit<T>; N],
    len:  usize,
}

impl<T, const N: usize> FixedVec<T, N> {
    /// Creates a new empty vector.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data: [const { MaybeUninit::uninit() }; N],
            len:  0,
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector holds no element.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the vector is at capacity.
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

    /// Appends an element.
    ///
    /// # Panics
    ///
    /// Pushing into a full vector is fatal.
    #[inline]
    #[track_caller]
    pub fn push(&mut self, value: T) {
        if self.is_full() {
            trap::capacity_exhausted("FixedVec", N);
        }
        self.data[self.len].write(value);
        self.len += 1;
    }

    /// Appends an element, reporting a full vector as an error.
    ///
    /// # Errors
    ///
    /// Returns a capacity error if the vector is full. The value is dropped.
    #[inline]
    pub fn try_push(&mut self, value: T) -> Result<()> {
        if self.is_full() {
            return Err(Error::capacity_exceeded("FixedVec capacity exceeded"));
        }
        self.push(value);
        Ok(())
    }

    /// Removes and returns the last element.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: element `len` was initialized and is now outside the live
        // range, so it is read exactly once
        Some(unsafe { self.data[self.len].assume_init_read() })
    }

    /// Removes the element at `index` by moving the last element into its
    /// place.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[track_caller]
    pub fn swap_remove(&mut self, index: usize) -> T {
        let len = self.len;
        assert!(index < len, "swap_remove index {index} out of bounds (len {len})");
        let last = len - 1;
        // SAFETY: both indices are in the live range; `last` leaves the live
        // range before anything else reads it
        unsafe {
            let base = self.data.as_mut_ptr().cast::<T>();
            let removed = ptr::read(base.add(index));
            if index != last {
                ptr::copy_nonoverlapping(base.add(last), base.add(index), 1);
            }
            self.len = last;
            removed
        }
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        let len = self.len;
        // Zero first so a panicking destructor cannot cause a double drop.
        self.len = 0;
        if mem::needs_drop::<T>() {
            // SAFETY: `[0, len)` was initialized and is no longer reachable
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    self.data.as_mut_ptr().cast::<T>(),
                    len,
                ));
            }
        }
    }

    /// Returns the live elements as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` is initialized
        unsafe { core::slice::from_raw_parts(self.data.as_ptr().cast::<T>(), self.len) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: `[0, len)` is initialized
        unsafe { core::slice::from_raw_parts_mut(self.data.as_mut_ptr().cast::<T>(), self.len) }
    }

    /// Returns a raw pointer to element slot `index` without creating a
    /// reference to the vector.
    ///
    /// # Safety
    ///
    /// `this` must point to a valid vector and `index` must be below `N`.
    #[inline]
    pub(crate) unsafe fn slot_ptr(this: *mut Self, index: usize) -> *mut T {
        // SAFETY: forwarded from the caller; MaybeUninit<T> has T's layout
        unsafe { ptr::addr_of_mut!((*this).data).cast::<T>().add(index) }
    }
}

impl<T, const N: usize> Drop for FixedVec<T, N> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, const N: usize> Default for FixedVec<T, N> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Deref for FixedVec<T, N> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize> DerefMut for FixedVec<T, N> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone, const N: usize> Clone for FixedVec<T, N> {
    fn clone(&self) -> Self {
        let mut out = Self::new();
        for item in self.iter() {
            out.push(item.clone());
        }
        out
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for FixedVec<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const N: usize> PartialEq for FixedVec<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, const N: usize> Eq for FixedVec<T, N> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_push_pop() {
        let mut vec = FixedVec::<u32, 3>::new();
        vec.push(1);
        vec.push(2);
        assert_eq!(vec.len(), 2);
        assert_eq!(vec.pop(), Some(2));
        assert_eq!(vec.pop(), Some(1));
        assert_eq!(vec.pop(), None);
    }

    #[test]
    fn test_try_push_full() {
        let mut vec = FixedVec::<u8, 2>::new();
        assert!(vec.try_push(1).is_ok());
        assert!(vec.try_push(2).is_ok());
        let error = vec.try_push(3).unwrap_err();
        assert!(error.is_capacity_error());
        assert_eq!(vec.len(), 2);
    }

    #[test]
    #[should_panic(expected = "emplace into full storage")]
    fn test_push_full_is_fatal() {
        let mut vec = FixedVec::<u8, 1>::new();
        vec.push(1);
        vec.push(2);
    }

    #[test]
    fn test_swap_remove_moves_last() {
        let mut vec = FixedVec::<u32, 4>::new();
        for v in [10, 20, 30, 40] {
            vec.push(v);
        }
        assert_eq!(vec.swap_remove(1), 20);
        assert_eq!(&vec[..], &[10, 40, 30]);
        assert_eq!(vec.swap_remove(2), 30);
        assert_eq!(&vec[..], &[10, 40]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_swap_remove_out_of_bounds() {
        let mut vec = FixedVec::<u32, 4>::new();
        vec.push(1);
        vec.swap_remove(1);
    }

    #[test]
    fn test_drop_and_clear_release_elements() {
        let tracker = Rc::new(());
        let mut vec = FixedVec::<Rc<()>, 4>::new();
        vec.push(Rc::clone(&tracker));
        vec.push(Rc::clone(&tracker));
        vec.clear();
        assert_eq!(Rc::strong_count(&tracker), 1);

        vec.push(Rc::clone(&tracker));
        drop(vec);
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn test_clone_and_eq() {
        let mut vec = FixedVec::<std::string::String, 3>::new();
        vec.push("a".into());
        vec.push("b".into());
        let copy = vec.clone();
        assert_eq!(vec, copy);
        assert_eq!(std::format!("{copy:?}"), r#"["a", "b"]"#);
    }
}
