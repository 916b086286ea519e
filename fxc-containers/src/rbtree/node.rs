// FXC - fxc-containers
// Module: Red-black tree node encodings
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Node records and the two physical encodings of their links.
//!
//! | Encoding | Layout | Index range |
//! |----------|--------|-------------|
//! | [`DedicatedColor`] | three indices plus a colour byte | `[0, usize::MAX)` |
//! | [`EmbeddedColor`] | three indices, colour in the parent's top bit | `[0, usize::MAX >> 1)` |
//!
//! Both present the same [`NodeLinks`] accessors, so the tree algorithm cannot
//! tell them apart.

use core::fmt::Debug;

use super::types::{IndexWithEmbeddedColor, NodeColor, NodeIndex, NULL_INDEX};

/// Parent/child links and colour of one node.
pub trait NodeLinks: Copy + Default + Debug {
    /// Capacity bound imposed by the encoding (exclusive upper index).
    const INDEX_LIMIT: usize;

    /// Links of a freshly inserted node: unlinked and red.
    const DETACHED_RED: Self;

    /// Left child.
    fn left(&self) -> NodeIndex;
    /// Right child.
    fn right(&self) -> NodeIndex;
    /// Parent.
    fn parent(&self) -> NodeIndex;
    /// Colour.
    fn color(&self) -> NodeColor;

    /// Sets the left child.
    fn set_left(&mut self, index: NodeIndex);
    /// Sets the right child.
    fn set_right(&mut self, index: NodeIndex);
    /// Sets the parent.
    fn set_parent(&mut self, index: NodeIndex);
    /// Sets the colour.
    fn set_color(&mut self, color: NodeColor);
}

/// Links with the colour in its own field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedicatedColor {
    left:   NodeIndex,
    right:  NodeIndex,
    parent: NodeIndex,
    color:  NodeColor,
}

impl Default for DedicatedColor {
    #[inline]
    fn default() -> Self {
        Self {
            left:   NULL_INDEX,
            right:  NULL_INDEX,
            parent: NULL_INDEX,
            color:  NodeColor::Black,
        }
    }
}

impl NodeLinks for DedicatedColor {
    const INDEX_LIMIT: usize = NULL_INDEX;
    const DETACHED_RED: Self = Self {
        left:   NULL_INDEX,
        right:  NULL_INDEX,
        parent: NULL_INDEX,
        color:  NodeColor::Red,
    };

    #[inline]
    fn left(&self) -> NodeIndex {
        self.left
    }
    #[inline]
    fn right(&self) -> NodeIndex {
        self.right
    }
    #[inline]
    fn parent(&self) -> NodeIndex {
        self.parent
    }
    #[inline]
    fn color(&self) -> NodeColor {
        self.color
    }

    #[inline]
    fn set_left(&mut self, index: NodeIndex) {
        self.left = index;
    }
    #[inline]
    fn set_right(&mut self, index: NodeIndex) {
        self.right = index;
    }
    #[inline]
    fn set_parent(&mut self, index: NodeIndex) {
        self.parent = index;
    }
    #[inline]
    fn set_color(&mut self, color: NodeColor) {
        self.color = color;
    }
}

/// Links with the colour packed into the parent index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedColor {
    left:             NodeIndex,
    right:            NodeIndex,
    parent_and_color: IndexWithEmbeddedColor,
}

impl Default for EmbeddedColor {
    #[inline]
    fn default() -> Self {
        Self {
            left:             NULL_INDEX,
            right:            NULL_INDEX,
            parent_and_color: IndexWithEmbeddedColor::new(NULL_INDEX, NodeColor::Black),
        }
    }
}

impl NodeLinks for EmbeddedColor {
    const INDEX_LIMIT: usize = IndexWithEmbeddedColor::INDEX_LIMIT;
    const DETACHED_RED: Self = Self {
        left:             NULL_INDEX,
        right:            NULL_INDEX,
        parent_and_color: IndexWithEmbeddedColor::new(NULL_INDEX, NodeColor::Red),
    };

    #[inline]
    fn left(&self) -> NodeIndex {
        self.left
    }
    #[inline]
    fn right(&self) -> NodeIndex {
        self.right
    }
    #[inline]
    fn parent(&self) -> NodeIndex {
        self.parent_and_color.index()
    }
    #[inline]
    fn color(&self) -> NodeColor {
        self.parent_and_color.color()
    }

    #[inline]
    fn set_left(&mut self, index: NodeIndex) {
        self.left = index;
    }
    #[inline]
    fn set_right(&mut self, index: NodeIndex) {
        self.right = index;
    }
    #[inline]
    #[track_caller]
    fn set_parent(&mut self, index: NodeIndex) {
        self.parent_and_color.set_index(index);
    }
    #[inline]
    fn set_color(&mut self, color: NodeColor) {
        self.parent_and_color.set_color(color);
    }
}

/// A tree node: key, value and links.
///
/// Sets instantiate `V = ()`, which occupies no space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedBlackTreeNode<K, V, L = DedicatedColor> {
    pub(crate) key:   K,
    pub(crate) value: V,
    pub(crate) links: L,
}

impl<K, V, L: NodeLinks> RedBlackTreeNode<K, V, L> {
    /// Creates an unlinked red node.
    #[inline]
    #[must_use]
    pub const fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            links: L::DETACHED_RED,
        }
    }

    /// The key.
    #[inline]
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// The value.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// The value, mutably. Keys are never handed out mutably.
    #[inline]
    #[must_use]
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// The links.
    #[inline]
    #[must_use]
    pub const fn links(&self) -> &L {
        &self.links
    }

    /// Splits the node into key and value.
    #[inline]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise_links<L: NodeLinks>() {
        let mut links = L::DETACHED_RED;
        assert_eq!(links.left(), NULL_INDEX);
        assert_eq!(links.right(), NULL_INDEX);
        assert_eq!(links.parent(), NULL_INDEX);
        assert_eq!(links.color(), NodeColor::Red);

        links.set_left(1);
        links.set_right(2);
        links.set_parent(3);
        links.set_color(NodeColor::Black);
        assert_eq!((links.left(), links.right(), links.parent()), (1, 2, 3));
        assert_eq!(links.color(), NodeColor::Black);

        links.set_parent(NULL_INDEX);
        assert_eq!(links.parent(), NULL_INDEX);
        assert_eq!(links.color(), NodeColor::Black);

        assert_eq!(L::default().color(), NodeColor::Black);
    }

    #[test]
    fn test_dedicated_links() {
        exercise_links::<DedicatedColor>();
    }

    #[test]
    fn test_embedded_links() {
        exercise_links::<EmbeddedColor>();
    }

    #[test]
    fn test_embedded_encoding_is_smaller() {
        assert!(
            core::mem::size_of::<EmbeddedColor>() < core::mem::size_of::<DedicatedColor>()
        );
        assert_eq!(core::mem::size_of::<EmbeddedColor>(), 3 * core::mem::size_of::<usize>());
    }

    #[test]
    fn test_set_node_has_no_value_storage() {
        assert_eq!(
            core::mem::size_of::<RedBlackTreeNode<u64, (), EmbeddedColor>>(),
            core::mem::size_of::<u64>() + core::mem::size_of::<EmbeddedColor>()
        );
    }

    #[test]
    fn test_new_node_is_detached_red() {
        let node: RedBlackTreeNode<u8, &str> = RedBlackTreeNode::new(4, "four");
        assert_eq!(*node.key(), 4);
        assert_eq!(*node.value(), "four");
        assert_eq!(node.links().color(), NodeColor::Red);
        assert_eq!(node.into_parts(), (4, "four"));
    }
}
