// FXC - fxc-containers
// Module: Internal logging macros
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Logging macros that compile to nothing without the `tracing` feature.

/// Emits a `tracing` event at the given level when the feature is enabled.
///
/// ```ignore
/// trace_event!(trace, index, len = self.len(), "emplaced");
/// ```
macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            $crate::tracing::$level!($($arg)+);
        }
    };
}
