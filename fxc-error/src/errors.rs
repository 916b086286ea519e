// FXC - fxc-error
// Module: Error Types
//
// Copyright (c) 2025 The FXC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

use core::fmt;

use crate::codes;

/// `Error` categories for container operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// Capacity errors (full container)
    Capacity     = 1,
    /// Access errors (missing key, dead slot)
    Access       = 2,
    /// Verification errors (broken structural invariants)
    Verification = 3,
}

/// FXC `Error` type
///
/// Categorized error with a numeric code and a static message. The type is
/// `Copy` and never allocates.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Error {
    /// `Error` category
    pub category: ErrorCategory,
    /// `Error` code
    pub code:     u16,
    /// `Error` message
    pub message:  &'static str,
}

impl Error {
    /// Key lookup failed
    pub const KEY_NOT_FOUND: Self =
        Self::new(ErrorCategory::Access, codes::KEY_NOT_FOUND, "Key not found");

    /// Create a new error.
    #[must_use]
    pub const fn new(category: ErrorCategory, code: u16, message: &'static str) -> Self {
        Self {
            category,
            code,
            message,
        }
    }

    /// Create a capacity exceeded error
    #[must_use]
    pub const fn capacity_exceeded(message: &'static str) -> Self {
        Self::new(ErrorCategory::Capacity, codes::CAPACITY_EXCEEDED, message)
    }

    /// Check if this is a capacity error
    #[must_use]
    pub fn is_capacity_error(&self) -> bool {
        self.category == ErrorCategory::Capacity
    }

    /// Check if this is an access error
    #[must_use]
    pub fn is_access_error(&self) -> bool {
        self.category == ErrorCategory::Access
    }

    /// Check if this is a verification error
    #[must_use]
    pub fn is_verification_error(&self) -> bool {
        self.category == ErrorCategory::Verification
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}][E{:04X}] {}", self.category, self.code, self.message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_error_fields() {
        let error = Error::capacity_exceeded("full");
        assert_eq!(error.category, ErrorCategory::Capacity);
        assert_eq!(error.code, codes::CAPACITY_EXCEEDED);
        assert_eq!(error.message, "full");
        assert!(error.is_capacity_error());
        assert!(!error.is_access_error());
    }

    #[test]
    fn test_key_not_found_constant() {
        let error = Error::KEY_NOT_FOUND;
        assert_eq!(error.code, codes::KEY_NOT_FOUND);
        assert!(error.is_access_error());
        assert!(!error.is_verification_error());
    }

    #[test]
    fn test_verification_helpers_are_categorized() {
        let errors = [
            crate::red_root_error(),
            crate::red_red_error(),
            crate::black_height_error(),
            crate::key_order_error(),
            crate::parent_link_error(),
            crate::size_mismatch_error(),
        ];
        for error in &errors {
            assert!(error.is_verification_error());
        }
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_display_format() {
        let error = Error::capacity_exceeded("FixedMap capacity exceeded");
        assert_eq!(std::format!("{error}"), "[Capacity][E03E8] FixedMap capacity exceeded");
    }
}
