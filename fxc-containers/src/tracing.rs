// FXC - fxc-containers
// Module: Tracing integration
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Tracing support for the container library.
//!
//! Wraps the `tracing` crate so that structural mutations (slot allocation,
//! node repositioning, rebalancing) can be observed when debugging. Only
//! compiled with the `tracing` feature; without it every event site in the
//! crate expands to nothing.

#![cfg(feature = "tracing")]

pub use ::tracing::{debug, error, info, trace, warn};
pub use ::tracing::{debug_span, trace_span, Level, Span};

/// Spans for tree-level operations.
#[derive(Debug, Clone)]
pub struct TreeTrace;

impl TreeTrace {
    /// Create a span for an insertion
    #[inline]
    pub fn inserting(len: usize, capacity: usize) -> Span {
        trace_span!("tree_insert", len = %len, capacity = %capacity)
    }

    /// Create a span for an erasure
    #[inline]
    pub fn erasing(index: usize, len: usize) -> Span {
        trace_span!("tree_erase", index = %index, len = %len)
    }
}
