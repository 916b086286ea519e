// FXC - fxc-containers
// Module: Red-black tree primitive types
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Node indices, colours and the colour-in-index packing.

use core::fmt;

/// Handle of a tree node inside its storage.
pub type NodeIndex = usize;

/// Sentinel for "no node". Lies outside every valid `[0, N)` range.
pub const NULL_INDEX: NodeIndex = NodeIndex::MAX;

/// Colour of a red-black tree node. The null sentinel counts as black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum NodeColor {
    /// Black node
    #[default]
    Black = 0,
    /// Red node
    Red   = 1,
}

impl NodeColor {
    /// `true` for [`NodeColor::Red`].
    #[inline]
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Self::Red)
    }

    /// `true` for [`NodeColor::Black`].
    #[inline]
    #[must_use]
    pub const fn is_black(self) -> bool {
        matches!(self, Self::Black)
    }
}

/// A node index and a colour packed into one `usize`.
///
/// The most significant bit holds the colour (set means red). The remaining
/// bits hold the index, with the all-ones pattern standing in for
/// [`NULL_INDEX`]. Addressable indices are therefore one bit narrower than
/// `usize`: `[0, NULL_INDEX >> 1)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct IndexWithEmbeddedColor(usize);

impl IndexWithEmbeddedColor {
    const SHIFT: u32 = usize::BITS - 1;
    const MASK: usize = 1 << Self::SHIFT;
    const LOCAL_NULL_INDEX: usize = NULL_INDEX >> 1;

    /// Largest index the packing can hold, exclusive.
    pub const INDEX_LIMIT: usize = Self::LOCAL_NULL_INDEX;

    /// Packs `index` and `color`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is neither [`NULL_INDEX`] nor below
    /// [`IndexWithEmbeddedColor::INDEX_LIMIT`].
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(index: NodeIndex, color: NodeColor) -> Self {
        let mut packed = Self(0);
        packed.set_index(index);
        packed.set_color(color);
        packed
    }

    /// Returns the index, mapping the packed null back to [`NULL_INDEX`].
    #[inline]
    #[must_use]
    pub const fn index(self) -> NodeIndex {
        let index = self.0 & !Self::MASK;
        if index == Self::LOCAL_NULL_INDEX {
            NULL_INDEX
        } else {
            index
        }
    }

    /// Replaces the index, leaving the colour bit untouched.
    ///
    /// # Panics
    ///
    /// Panics if a non-null `index` would collide with the packed null or
    /// spill into the colour bit.
    #[inline]
    #[track_caller]
    pub const fn set_index(&mut self, index: NodeIndex) {
        let local = if index == NULL_INDEX {
            Self::LOCAL_NULL_INDEX
        } else {
            assert!(
                index < Self::LOCAL_NULL_INDEX,
                "node index does not fit beside the embedded colour bit"
            );
            index
        };
        self.0 = (self.0 & Self::MASK) | local;
    }

    /// Returns the colour bit.
    #[inline]
    #[must_use]
    pub const fn color(self) -> NodeColor {
        if self.0 & Self::MASK == Self::MASK {
            NodeColor::Red
        } else {
            NodeColor::Black
        }
    }

    /// Replaces the colour, leaving the index bits untouched.
    #[inline]
    pub const fn set_color(&mut self, color: NodeColor) {
        self.0 = (self.0 & !Self::MASK) | ((color as usize) << Self::SHIFT);
    }

    /// Returns the raw packed word.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> usize {
        self.0
    }
}

impl Default for IndexWithEmbeddedColor {
    /// Null index, black.
    #[inline]
    fn default() -> Self {
        Self::new(NULL_INDEX, NodeColor::Black)
    }
}

impl fmt::Debug for IndexWithEmbeddedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexWithEmbeddedColor")
            .field("index", &self.index())
            .field("color", &self.color())
            .finish()
    }
}

/// Result of a key search: where the key is, or where it would be linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeIndexAndParentIndex {
    /// Index holding the key, or [`NULL_INDEX`] when absent.
    pub i:             NodeIndex,
    /// Parent of `i`, or the would-be parent of a new node for the key.
    pub parent:        NodeIndex,
    /// Whether `i` is (or would be) the left child of `parent`.
    pub is_left_child: bool,
}

impl Default for NodeIndexAndParentIndex {
    #[inline]
    fn default() -> Self {
        Self {
            i:             NULL_INDEX,
            parent:        NULL_INDEX,
            is_left_child: false,
        }
    }
}

/// Result of an erase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuccessorIndexAndRepositionedIndex {
    /// In-order successor of the erased node, remapped if it moved.
    pub successor:    NodeIndex,
    /// Index returned by the storage delete (see
    /// [`IndexBasedStorage`](crate::IndexBasedStorage)).
    pub repositioned: NodeIndex,
}

#[cfg(kani)]
mod verification {
    use super::*;

    #[kani::proof]
    fn verify_index_color_round_trip() {
        let index: usize = kani::any();
        kani::assume(index < IndexWithEmbeddedColor::INDEX_LIMIT || index == NULL_INDEX);
        let red: bool = kani::any();
        let color = if red { NodeColor::Red } else { NodeColor::Black };

        let mut packed = IndexWithEmbeddedColor::default();
        packed.set_index(index);
        packed.set_color(color);
        assert!(packed.index() == index);
        assert!(packed.color() == color);
    }
}
