// FXC - fxc-error
// Module: Error Codes
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error codes for FXC

// Capacity error codes (1000-1099)
/// Insertion into a container that is already full
pub const CAPACITY_EXCEEDED: u16 = 1000;

// Access error codes (1100-1199)
/// Key not present in the container
pub const KEY_NOT_FOUND: u16 = 1100;
/// Tree link refers to a free slot
pub const DEAD_SLOT_ACCESS: u16 = 1102;

// Verification error codes (1200-1299)
/// Root node of a non-empty tree is red
pub const RED_ROOT: u16 = 1200;
/// A red node has a red child
pub const RED_NODE_WITH_RED_CHILD: u16 = 1201;
/// Two null-terminated paths carry a different number of black nodes
pub const BLACK_HEIGHT_MISMATCH: u16 = 1202;
/// In-order traversal is not strictly ascending
pub const KEY_ORDER_VIOLATION: u16 = 1203;
/// A child does not point back at its parent
pub const PARENT_LINK_MISMATCH: u16 = 1204;
/// Reachable node count differs from the storage size
pub const SIZE_MISMATCH: u16 = 1205;
