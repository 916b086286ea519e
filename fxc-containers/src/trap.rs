// FXC - fxc-containers
// Module: Fatal traps
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Fatal, non-recoverable failure paths of the core.
//!
//! The core never reports these as values. Graceful handling belongs to the
//! checking policy of the wrapping container.
//!
//! A trap is a panic, and whether it terminates depends on the final
//! binary's panic strategy. This workspace builds its dev and release
//! profiles with `panic = "abort"`, but profiles do not propagate to
//! dependents: a downstream crate must set `panic = "abort"` in its own
//! profiles for a trap to be uncatchable. Under `panic = "unwind"` a trap can
//! be caught with `catch_unwind`, which only the test profile relies on.

/// Emplacement into a full storage.
#[cold]
#[inline(never)]
#[track_caller]
#[allow(clippy::panic)]
pub(crate) fn capacity_exhausted(storage: &'static str, capacity: usize) -> ! {
    trace_event!(error, storage, capacity, "emplace into full storage");
    panic!("{storage}: emplace into full storage (capacity {capacity})")
}
