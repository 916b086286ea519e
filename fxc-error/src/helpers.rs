// FXC - fxc-error
// Module: Error Helpers
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Free-function constructors for the verification errors.
//!
//! These are what invariant checkers return; keeping them here gives every
//! checker the same message for the same broken invariant.

use crate::{codes, Error, ErrorCategory};

/// Create a red-root error
#[must_use]
pub const fn red_root_error() -> Error {
    Error::new(ErrorCategory::Verification, codes::RED_ROOT, "Root node is red")
}

/// Create a red-node-with-red-child error
#[must_use]
pub const fn red_red_error() -> Error {
    Error::new(
        ErrorCategory::Verification,
        codes::RED_NODE_WITH_RED_CHILD,
        "Red node has a red child",
    )
}

/// Create a black-height mismatch error
#[must_use]
pub const fn black_height_error() -> Error {
    Error::new(
        ErrorCategory::Verification,
        codes::BLACK_HEIGHT_MISMATCH,
        "Paths to null carry different black heights",
    )
}

/// Create a key-order violation error
#[must_use]
pub const fn key_order_error() -> Error {
    Error::new(
        ErrorCategory::Verification,
        codes::KEY_ORDER_VIOLATION,
        "In-order keys are not strictly ascending",
    )
}

/// Create a parent-link mismatch error
#[must_use]
pub const fn parent_link_error() -> Error {
    Error::new(
        ErrorCategory::Verification,
        codes::PARENT_LINK_MISMATCH,
        "Child does not link back to its parent",
    )
}

/// Create a size mismatch error
#[must_use]
pub const fn size_mismatch_error() -> Error {
    Error::new(
        ErrorCategory::Verification,
        codes::SIZE_MISMATCH,
        "Reachable node count differs from storage size",
    )
}
