//! Property-Based Test Generators
//!
//! Proptest strategies for claim inputs.

use proptest::prelude::*;

use domain_claims::ClaimStatus;

/// Words the default classifier reacts to
pub const TRIAGE_KEYWORDS: &[&str] = &["missing", "damaged", "faulty", "spam", "test claim", "junk"];

/// Strategy for non-empty customer ids
pub fn customer_id_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{1,4}-?[0-9]{1,6}"
}

/// Strategy for non-empty descriptions drawn from letters no keyword can form
///
/// Every keyword contains one of `a`, `e`, `i`, `u`, so omitting those vowels
/// guarantees a neutral description.
pub fn neutral_description_strategy() -> impl Strategy<Value = String> {
    "[b-dfghj-np-tv-z ]{0,40}[b-dfghj-np-tv-z]"
}

/// Strategy for descriptions with a keyword embedded in neutral text
pub fn keyword_description_strategy() -> impl Strategy<Value = (String, &'static str)> {
    (
        neutral_description_strategy(),
        proptest::sample::select(TRIAGE_KEYWORDS),
        neutral_description_strategy(),
    )
        .prop_map(|(head, keyword, tail)| (format!("{} {} {}", head, keyword, tail), keyword))
}

/// Strategy for known statuses
pub fn known_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Submitted),
        Just(ClaimStatus::PendingManualReview),
        Just(ClaimStatus::Validated),
        Just(ClaimStatus::Rejected),
    ]
}

/// Strategy for any status token a manual update may carry, known or not
pub fn any_status_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => known_status_strategy().prop_map(String::from),
        1 => "[a-z_]{1,20}",
        1 => "[a-z_]{51,120}",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn neutral_descriptions_avoid_keywords(description in neutral_description_strategy()) {
            let lower = description.to_lowercase();
            for keyword in TRIAGE_KEYWORDS {
                prop_assert!(!lower.contains(keyword));
            }
            prop_assert!(!description.trim().is_empty());
        }

        #[test]
        fn keyword_descriptions_contain_their_keyword((description, keyword) in keyword_description_strategy()) {
            prop_assert!(description.contains(keyword));
        }
    }
}
