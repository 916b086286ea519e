// FXC - fxc-containers
// Module: Red-black tree engine
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Index-based red-black tree: node encodings, the storage adapter and the
//! balancing algorithm.

pub mod iter;
pub mod node;
pub mod storage;
pub mod tree;
pub mod types;

pub use iter::{IntoIter, Iter, IterMut};
pub use node::{DedicatedColor, EmbeddedColor, NodeLinks, RedBlackTreeNode};
pub use storage::{Contiguous, FixedRedBlackTreeStorage, NodeView, Pool, StorageStrategy};
pub use tree::FixedRedBlackTree;
pub use types::{
    IndexWithEmbeddedColor, NodeColor, NodeIndex, NodeIndexAndParentIndex,
    SuccessorIndexAndRepositionedIndex, NULL_INDEX,
};
