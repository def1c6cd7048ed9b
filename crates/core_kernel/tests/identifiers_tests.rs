//! Unit tests for the Identifiers module
//!
//! Tests cover creation, parsing, conversion, ordering, and serialization
//! of claim identifiers.

use core_kernel::ClaimId;
use proptest::prelude::*;

mod claim_id_tests {
    use super::*;

    #[test]
    fn test_value_round_trips() {
        let id = ClaimId::new(1234);
        assert_eq!(id.value(), 1234);
    }

    #[test]
    fn test_ordering_follows_key() {
        assert!(ClaimId::new(1) < ClaimId::new(2));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let result = "not-a-number".parse::<ClaimId>();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not-a-number"));
    }

    #[test]
    fn test_parse_rejects_empty_after_prefix() {
        assert!("CLM-".parse::<ClaimId>().is_err());
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&ClaimId::new(5)).unwrap();
        assert_eq!(json, "5");

        let back: ClaimId = serde_json::from_str("5").unwrap();
        assert_eq!(back, ClaimId::new(5));
    }
}

proptest! {
    #[test]
    fn display_then_parse_is_identity(raw in any::<i64>()) {
        let id = ClaimId::new(raw);
        let parsed: ClaimId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);

        let from_reference: ClaimId = id.reference().parse().unwrap();
        prop_assert_eq!(from_reference, id);
    }
}
