//! Claim aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;
use crate::audit::AuditLogEntry;
use crate::error::ClaimError;
use crate::status::ClaimStatus;
use crate::triage::TriageOutcome;

/// A customer claim and its audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Store-assigned identifier
    pub id: ClaimId,
    /// Customer who raised the claim
    pub customer_id: String,
    /// Free-text account of the problem
    pub description: String,
    /// Current lifecycle status
    pub status: ClaimStatus,
    /// When the claim was stored
    pub submission_date: DateTime<Utc>,
    /// Reserved for the resolution workflow
    pub root_cause: Option<String>,
    /// Reserved for the resolution workflow
    pub resolution_type: Option<String>,
    /// Reserved for the resolution workflow
    pub refund_amount: Option<Decimal>,
    /// Append-only history of lifecycle events
    pub audit_log: Vec<AuditLogEntry>,
}

impl Claim {
    /// Moves the claim to any status and records the override
    ///
    /// Manual updates are unconstrained: every current status may move to
    /// every status string, known or not. Known tokens always land on their
    /// own variant.
    pub fn set_status_manually(&mut self, new_status: impl Into<ClaimStatus>) -> &AuditLogEntry {
        let new_status = new_status.into().normalized();
        let entry = AuditLogEntry::status_updated(&self.status, &new_status);
        self.transition(new_status, entry)
    }

    /// Applies a triage outcome
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::InvalidTransition` unless the claim is
    /// `submitted` or `pending_manual_review`. The claim is left untouched.
    pub fn apply_triage(&mut self, outcome: TriageOutcome) -> Result<&AuditLogEntry, ClaimError> {
        self.ensure_triageable()?;
        let entry = AuditLogEntry::triaged(&outcome);
        Ok(self.transition(outcome.status, entry))
    }

    /// Checks the auto-triage precondition
    pub fn ensure_triageable(&self) -> Result<(), ClaimError> {
        if self.status.is_triageable() {
            Ok(())
        } else {
            Err(ClaimError::InvalidTransition {
                id: self.id,
                status: self.status.clone(),
            })
        }
    }

    /// Most recent audit entry
    pub fn last_entry(&self) -> Option<&AuditLogEntry> {
        self.audit_log.last()
    }

    fn transition(&mut self, status: ClaimStatus, entry: AuditLogEntry) -> &AuditLogEntry {
        self.status = status;
        self.audit_log.push(entry);
        &self.audit_log[self.audit_log.len() - 1]
    }
}

/// Data for submitting a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClaim {
    pub customer_id: String,
    pub description: String,
}

impl NewClaim {
    pub fn new(customer_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            description: description.into(),
        }
    }

    /// Status every claim starts in
    pub fn initial_status(&self) -> ClaimStatus {
        ClaimStatus::Submitted
    }

    /// Audit log every claim starts with
    pub fn initial_audit_log(&self) -> Vec<AuditLogEntry> {
        vec![AuditLogEntry::claim_submitted(&self.customer_id)]
    }

    /// Builds the stored claim once the store has assigned an id
    pub fn into_claim(self, id: ClaimId, submission_date: DateTime<Utc>) -> Claim {
        Claim {
            id,
            status: self.initial_status(),
            audit_log: self.initial_audit_log(),
            customer_id: self.customer_id,
            description: self.description,
            submission_date,
            root_cause: None,
            resolution_type: None,
            refund_amount: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submitted_claim() -> Claim {
        NewClaim::new("C1", "box arrived empty").into_claim(ClaimId::new(1), Utc::now())
    }

    #[test]
    fn test_new_claim_starts_submitted() {
        let claim = submitted_claim();
        assert_eq!(claim.status, ClaimStatus::Submitted);
        assert_eq!(claim.audit_log.len(), 1);
        assert_eq!(claim.audit_log[0].action, "Claim Submitted");
        assert_eq!(claim.audit_log[0].detail_str("customer_id"), Some("C1"));
    }

    #[test]
    fn test_manual_update_appends_entry() {
        let mut claim = submitted_claim();
        claim.set_status_manually(ClaimStatus::Validated);

        assert_eq!(claim.status, ClaimStatus::Validated);
        assert_eq!(claim.audit_log.len(), 2);
        let entry = claim.last_entry().unwrap();
        assert_eq!(entry.detail_str("previous_status"), Some("submitted"));
        assert_eq!(entry.detail_str("new_status"), Some("validated"));
    }

    #[test]
    fn test_manual_update_allowed_from_end_state() {
        let mut claim = submitted_claim();
        claim.set_status_manually(ClaimStatus::Rejected);
        claim.set_status_manually(ClaimStatus::Submitted);
        assert_eq!(claim.status, ClaimStatus::Submitted);
        assert_eq!(claim.audit_log.len(), 3);
    }

    #[test]
    fn test_triage_from_validated_is_rejected() {
        let mut claim = submitted_claim();
        claim.set_status_manually(ClaimStatus::Validated);
        let before = claim.clone();

        let result = claim.apply_triage(TriageOutcome::new(ClaimStatus::Rejected, "spam"));
        assert!(matches!(
            result,
            Err(ClaimError::InvalidTransition { status: ClaimStatus::Validated, .. })
        ));
        assert_eq!(claim, before);
    }

    #[test]
    fn test_manual_update_normalizes_known_token() {
        let mut claim = submitted_claim();
        claim.set_status_manually(ClaimStatus::Other("pending_manual_review".to_string()));
        assert_eq!(claim.status, ClaimStatus::PendingManualReview);

        let entry = claim
            .apply_triage(TriageOutcome::new(ClaimStatus::Validated, "damaged"))
            .unwrap();
        assert_eq!(entry.detail_str("validation_reason"), Some("damaged"));
        assert_eq!(claim.status, ClaimStatus::Validated);
    }

    #[test]
    fn test_triage_records_reason() {
        let mut claim = submitted_claim();
        let entry = claim
            .apply_triage(TriageOutcome::new(ClaimStatus::PendingManualReview, "unclear"))
            .unwrap();
        assert_eq!(
            entry.action,
            "AI Triage/Validation: Status changed to pending_manual_review"
        );
        assert_eq!(entry.detail_str("validation_reason"), Some("unclear"));
        assert_eq!(claim.status, ClaimStatus::PendingManualReview);
    }
}
