// FXC - fxc-containers
// Module: Prelude
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Common imports for users of the container library.
//!
//! ```
//! use fxc_containers::prelude::*;
//!
//! let mut map: FixedMap<u8, u8, 4> = FixedMap::new();
//! map.insert(1, 2);
//! assert_eq!(map.len(), 1);
//! ```

pub use crate::checking::{MapAbortChecking, MapChecking, SetAbortChecking, SetChecking};
pub use crate::map::{CompactContiguousFixedMap, CompactFixedMap, ContiguousFixedMap, FixedMap};
pub use crate::rbtree::{
    Contiguous, DedicatedColor, EmbeddedColor, FixedRedBlackTree, NodeIndex, NodeLinks, Pool,
    StorageStrategy, NULL_INDEX,
};
pub use crate::set::{CompactContiguousFixedSet, CompactFixedSet, ContiguousFixedSet, FixedSet};
pub use crate::storage::IndexBasedStorage;
pub use crate::vec::FixedVec;
pub use crate::{FixedIndexContiguousStorage, FixedIndexPoolStorage, IndexOrValue};

pub use fxc_error::{Error, ErrorCategory, Result};
