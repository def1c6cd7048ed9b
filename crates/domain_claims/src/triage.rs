//! Auto-triage classification
//!
//! Triage maps a claim description to a proposed status and a reason that is
//! written to the audit trail. The [`Classifier`] trait is the seam where a
//! smarter model can replace the keyword rules; the lifecycle engine only
//! sees the resulting [`TriageOutcome`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::status::ClaimStatus;

/// Status proposed by a classifier, with the reason recorded in the audit log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageOutcome {
    pub status: ClaimStatus,
    pub reason: String,
}

impl TriageOutcome {
    pub fn new(status: ClaimStatus, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
        }
    }
}

/// Deterministic classification of a claim description
pub trait Classifier: Send + Sync {
    fn classify(&self, description: &str) -> TriageOutcome;
}

impl<F> Classifier for F
where
    F: Fn(&str) -> TriageOutcome + Send + Sync,
{
    fn classify(&self, description: &str) -> TriageOutcome {
        self(description)
    }
}

/// A group of keywords that resolves to one outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    /// Lower-case fragments; any one of them matching is enough
    pub keywords: Vec<String>,
    pub outcome: TriageOutcome,
}

impl KeywordRule {
    pub fn new<I, S>(keywords: I, status: ClaimStatus, reason: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
            outcome: TriageOutcome::new(status, reason),
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

/// Keyword classifier: first matching rule wins, otherwise the fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordClassifier {
    rules: Vec<KeywordRule>,
    fallback: TriageOutcome,
}

impl KeywordClassifier {
    /// Builds a classifier from ordered rules
    pub fn new(rules: Vec<KeywordRule>, fallback: TriageOutcome) -> Self {
        Self { rules, fallback }
    }
}

impl Default for KeywordClassifier {
    /// Damage-style keywords are checked before spam keywords
    fn default() -> Self {
        Self::new(
            vec![
                KeywordRule::new(
                    ["missing", "damaged", "faulty"],
                    ClaimStatus::Validated,
                    "Keywords detected (missing/damaged/faulty)",
                ),
                KeywordRule::new(
                    ["spam", "test claim", "junk"],
                    ClaimStatus::Rejected,
                    "Flagged as spam/test/junk",
                ),
            ],
            TriageOutcome::new(
                ClaimStatus::PendingManualReview,
                "No clear keywords, requires manual review",
            ),
        )
    }
}

impl Classifier for KeywordClassifier {
    fn classify(&self, description: &str) -> TriageOutcome {
        let lowered = description.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.outcome.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

impl fmt::Display for TriageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.status, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classify(description: &str) -> ClaimStatus {
        KeywordClassifier::default().classify(description).status
    }

    #[test]
    fn test_damage_keywords_validate() {
        assert_eq!(classify("Item arrived damaged"), ClaimStatus::Validated);
        assert_eq!(classify("one part MISSING"), ClaimStatus::Validated);
        assert_eq!(classify("faulty charger"), ClaimStatus::Validated);
    }

    #[test]
    fn test_spam_keywords_reject() {
        assert_eq!(classify("this is spam"), ClaimStatus::Rejected);
        assert_eq!(classify("Test Claim please ignore"), ClaimStatus::Rejected);
        assert_eq!(classify("junk"), ClaimStatus::Rejected);
    }

    #[test]
    fn test_no_keywords_needs_review() {
        let outcome = KeywordClassifier::default().classify("no relevant words");
        assert_eq!(outcome.status, ClaimStatus::PendingManualReview);
        assert_eq!(outcome.reason, "No clear keywords, requires manual review");
    }

    #[test]
    fn test_first_rule_group_wins() {
        let outcome = KeywordClassifier::default().classify("damaged spam");
        assert_eq!(outcome.status, ClaimStatus::Validated);
        assert_eq!(outcome.reason, "Keywords detected (missing/damaged/faulty)");
    }

    #[test]
    fn test_plain_test_word_is_not_spam() {
        assert_eq!(classify("test of the product"), ClaimStatus::PendingManualReview);
    }

    #[test]
    fn test_closure_is_a_classifier() {
        let always_reject = |_: &str| TriageOutcome::new(ClaimStatus::Rejected, "closed for intake");
        assert_eq!(always_reject.classify("damaged").status, ClaimStatus::Rejected);
    }

    #[test]
    fn test_custom_rules_are_lowercased() {
        let classifier = KeywordClassifier::new(
            vec![KeywordRule::new(["Broken"], ClaimStatus::Validated, "broken")],
            TriageOutcome::new(ClaimStatus::Rejected, "nothing matched"),
        );
        assert_eq!(classifier.classify("BROKEN lid").status, ClaimStatus::Validated);
        assert_eq!(classifier.classify("damaged").status, ClaimStatus::Rejected);
    }

    proptest! {
        #[test]
        fn damage_keyword_always_validates(
            prefix in "[a-z ]{0,20}",
            keyword in prop::sample::select(vec!["missing", "damaged", "faulty"]),
            suffix in "[a-z ]{0,20}",
        ) {
            let description = format!("{}{}{}", prefix, keyword.to_uppercase(), suffix);
            prop_assert_eq!(classify(&description), ClaimStatus::Validated);
        }

        #[test]
        fn classification_is_deterministic(description in ".{0,60}") {
            let classifier = KeywordClassifier::default();
            prop_assert_eq!(classifier.classify(&description), classifier.classify(&description));
        }
    }
}
