//! Error code uniqueness and range checks.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use fxc_error::{codes, Error, ErrorCategory};

    #[test]
    fn test_all_error_constants_are_unique() {
        let mut seen_codes = HashSet::new();

        let capacity_codes = [codes::CAPACITY_EXCEEDED];
        for code in &capacity_codes {
            assert!(seen_codes.insert(*code), "Duplicate error code: {}", code);
            assert!((1000..1100).contains(code), "Capacity code {} out of range", code);
        }

        let access_codes = [codes::KEY_NOT_FOUND, codes::DEAD_SLOT_ACCESS];
        for code in &access_codes {
            assert!(seen_codes.insert(*code), "Duplicate error code: {}", code);
            assert!((1100..1200).contains(code), "Access code {} out of range", code);
        }

        let verification_codes = [
            codes::RED_ROOT,
            codes::RED_NODE_WITH_RED_CHILD,
            codes::BLACK_HEIGHT_MISMATCH,
            codes::KEY_ORDER_VIOLATION,
            codes::PARENT_LINK_MISMATCH,
            codes::SIZE_MISMATCH,
        ];
        for code in &verification_codes {
            assert!(seen_codes.insert(*code), "Duplicate error code: {}", code);
            assert!((1200..1300).contains(code), "Verification code {} out of range", code);
        }
    }

    #[test]
    fn test_constructors_pick_matching_codes() {
        let full = Error::capacity_exceeded("full");
        assert_eq!(full.code, codes::CAPACITY_EXCEEDED);
        assert_eq!(full.category, ErrorCategory::Capacity);

        assert_eq!(Error::KEY_NOT_FOUND.code, codes::KEY_NOT_FOUND);
        assert_eq!(Error::KEY_NOT_FOUND.category, ErrorCategory::Access);
        assert_eq!(fxc_error::red_root_error().category, ErrorCategory::Verification);
    }

    #[test]
    fn test_errors_compare_by_value() {
        let same = Error::new(ErrorCategory::Access, codes::KEY_NOT_FOUND, "Key not found");
        let other = Error::new(ErrorCategory::Access, codes::KEY_NOT_FOUND, "other");
        assert_eq!(Error::KEY_NOT_FOUND, same);
        assert_ne!(Error::KEY_NOT_FOUND, other);
    }
}
