// FXC - fxc-containers
// Module: Crate root
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Fixed-capacity, allocation-free containers.
//!
//! Every container in this crate keeps its elements inline in an array whose
//! length is a const generic, so the whole structure can live on the stack,
//! in a `static`, or inside another fixed-size object. Nothing allocates.
//!
//! The crate is layered:
//! - [`IndexOrValue`]: a slot holding either a live element or a free-list link
//! - [`IndexBasedStorage`] and its two engines, [`FixedIndexPoolStorage`]
//!   (stable indices, LIFO reuse) and [`FixedIndexContiguousStorage`]
//!   (dense, swap-remove relocation)
//! - [`rbtree`]: node encodings, the storage adapter and the index-based
//!   red-black tree algorithm
//! - [`FixedMap`] and [`FixedSet`]: ordered containers with pluggable
//!   [checking policies](checking)
//!
//! # Feature Flags
//!
//! - `std`: `std::error::Error` for the shared error type
//! - `tracing`: structured events for slot allocation, repositioning and
//!   rebalancing
//! - Default: pure `no_std`
//!
//! # Failure model
//!
//! Emplacing into a full storage and dereferencing a dead slot are contract
//! violations. The first traps; the second is excluded by the `unsafe`
//! contract of the accessors. Fallible `try_*` methods return
//! [`fxc_error::Error`] for callers that prefer to handle a full container.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

#[cfg(any(feature = "std", test))]
extern crate std;

#[macro_use]
mod macros;

mod trap;

pub mod checking;
pub mod contiguous;
pub mod map;
pub mod pool;
pub mod prelude;
pub mod rbtree;
pub mod set;
pub mod slot;
pub mod storage;
pub mod tracing;
pub mod vec;

pub use checking::{MapAbortChecking, MapChecking, SetAbortChecking, SetChecking};
pub use contiguous::FixedIndexContiguousStorage;
pub use map::{CompactContiguousFixedMap, CompactFixedMap, ContiguousFixedMap, FixedMap};
pub use pool::FixedIndexPoolStorage;
pub use rbtree::{
    Contiguous, DedicatedColor, EmbeddedColor, FixedRedBlackTree, FixedRedBlackTreeStorage,
    IndexWithEmbeddedColor, NodeColor, NodeIndex, NodeLinks, Pool, RedBlackTreeNode,
    StorageStrategy, NULL_INDEX,
};
pub use set::{
    CompactContiguousFixedSet, CompactFixedSet, ContiguousFixedSet, FixedSet, SetIntoIter, SetIter,
};
pub use slot::IndexOrValue;
pub use storage::IndexBasedStorage;
pub use vec::FixedVec;

pub use fxc_error::{codes, Error, ErrorCategory, Result};
