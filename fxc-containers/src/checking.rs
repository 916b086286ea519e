// FXC - fxc-containers
// Module: Checking policies
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Pluggable handlers for contract violations in [`FixedMap`](crate::FixedMap)
//! and [`FixedSet`](crate::FixedSet).
//!
//! The core traps; these policies decide what a wrapping container does
//! first. Handlers never return. The default policies log through the
//! `tracing` feature and then panic, which aborts under the workspace
//! profiles.

use core::any::type_name;
use core::panic::Location;

/// Violation handlers for maps.
pub trait MapChecking {
    /// A lookup by [`FixedMap::at`](crate::FixedMap::at) found no entry.
    fn out_of_range<Q: ?Sized>(key: &Q, size: usize, location: &'static Location<'static>) -> !;

    /// An insertion needed more than the fixed capacity.
    fn length_error(target_capacity: usize, location: &'static Location<'static>) -> !;
}

/// Violation handlers for sets.
pub trait SetChecking {
    /// An insertion needed more than the fixed capacity.
    fn length_error(target_capacity: usize, location: &'static Location<'static>) -> !;
}

/// Default map policy: terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapAbortChecking;

/// Default set policy: terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetAbortChecking;

impl MapChecking for MapAbortChecking {
    #[cold]
    #[allow(clippy::panic)]
    fn out_of_range<Q: ?Sized>(_key: &Q, size: usize, location: &'static Location<'static>) -> ! {
        trace_event!(error, size, %location, key_type = type_name::<Q>(), "map key out of range");
        panic!("{}: key out of range (size {size}) at {location}", type_name::<Q>())
    }

    #[cold]
    #[allow(clippy::panic)]
    fn length_error(target_capacity: usize, location: &'static Location<'static>) -> ! {
        trace_event!(error, target_capacity, %location, "map length error");
        panic!("map length error: capacity {target_capacity} required at {location}")
    }
}

impl SetChecking for SetAbortChecking {
    #[cold]
    #[allow(clippy::panic)]
    fn length_error(target_capacity: usize, location: &'static Location<'static>) -> ! {
        trace_event!(error, target_capacity, %location, "set length error");
        panic!("set length error: capacity {target_capacity} required at {location}")
    }
}
