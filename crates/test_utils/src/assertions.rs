//! Custom Test Assertions
//!
//! Assertion helpers for claims that print the whole audit trail on failure.

use domain_claims::{Claim, ClaimStatus};

fn actions(claim: &Claim) -> Vec<&str> {
    claim.audit_log.iter().map(|e| e.action.as_str()).collect()
}

/// Asserts the audit log holds exactly these actions, in order
pub fn assert_audit_actions(claim: &Claim, expected: &[&str]) {
    assert_eq!(
        actions(claim),
        expected,
        "Audit trail mismatch for claim {}",
        claim.id
    );
}

/// Asserts the claim is freshly submitted: one "Claim Submitted" entry
pub fn assert_freshly_submitted(claim: &Claim) {
    assert_eq!(claim.status, ClaimStatus::Submitted, "claim {} status", claim.id);
    assert_audit_actions(claim, &["Claim Submitted"]);
    assert_eq!(
        claim.audit_log[0].detail_str("customer_id"),
        Some(claim.customer_id.as_str()),
        "seed entry must name the customer"
    );
}

/// Asserts the last audit entry is a manual move from `from` to `to`
pub fn assert_last_manual_update(claim: &Claim, from: &str, to: &str) {
    let entry = claim
        .last_entry()
        .unwrap_or_else(|| panic!("claim {} has an empty audit log", claim.id));

    assert_eq!(entry.action, format!("Status Updated to {}", to));
    assert_eq!(entry.detail_str("previous_status"), Some(from));
    assert_eq!(entry.detail_str("new_status"), Some(to));
    assert_eq!(claim.status.as_str(), to);
}

/// Asserts the last audit entry is a triage to `status` with `reason`
pub fn assert_last_triage(claim: &Claim, status: &ClaimStatus, reason: &str) {
    let entry = claim
        .last_entry()
        .unwrap_or_else(|| panic!("claim {} has an empty audit log", claim.id));

    assert_eq!(
        entry.action,
        format!("AI Triage/Validation: Status changed to {}", status)
    );
    assert_eq!(entry.detail_str("validation_reason"), Some(reason));
    assert_eq!(&claim.status, status);
}

/// Asserts audit timestamps never go backwards
pub fn assert_audit_chronological(claim: &Claim) {
    for pair in claim.audit_log.windows(2) {
        assert!(
            pair[0].timestamp <= pair[1].timestamp,
            "audit entries out of order for claim {}: {:?}",
            claim.id,
            actions(claim)
        );
    }
}
