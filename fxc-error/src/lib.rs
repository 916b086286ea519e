// FXC - fxc-error
// Module: Error Handling
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error handling for the fixed-capacity container library.
//!
//! Every fallible operation in the workspace reports an [`Error`]: a small
//! `Copy` value made of an [`ErrorCategory`], a numeric code from [`codes`]
//! and a static message. Nothing here allocates, so the same type is used in
//! `no_std` builds and in hosted ones.
//!
//! # Error Categories
//!
//! ## Capacity Errors (1000-1099)
//! - Insertion into a full container
//!
//! ## Access Errors (1100-1199)
//! - Lookup of a missing key
//! - Tree link to a free slot
//!
//! ## Verification Errors (1200-1299)
//! - Red-black tree invariant violations
//! - Broken parent/child linkage
//!
//! # Usage
//!
//! ```
//! use fxc_error::{codes, Error, ErrorCategory};
//!
//! let error = Error::capacity_exceeded("FixedMap capacity exceeded");
//! assert_eq!(error.category, ErrorCategory::Capacity);
//! assert_eq!(error.code, codes::CAPACITY_EXCEEDED);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

#[cfg(feature = "std")]
extern crate std;

/// Error codes
pub mod codes;
/// Error and error category types
pub mod errors;
pub mod helpers;

pub use errors::{Error, ErrorCategory};
pub use helpers::*;

/// A specialized `Result` type for container operations.
pub type Result<T> = core::result::Result<T, Error>;
