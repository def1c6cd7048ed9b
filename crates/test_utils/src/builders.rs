//! Test Data Builders
//!
//! Fluent builder for claims in an arbitrary lifecycle state, for tests that
//! need to seed a store without going through the service.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimStatus, NewClaim};

use crate::fixtures::{ClaimFixtures, DescriptionFixtures};

/// Builder for [`Claim`] values
///
/// Starts from a freshly submitted claim. Every `with_status` call records a
/// manual status change, so the audit log always matches the status history.
#[derive(Debug, Clone)]
pub struct ClaimBuilder {
    id: ClaimId,
    customer_id: String,
    description: String,
    submission_date: DateTime<Utc>,
    statuses: Vec<ClaimStatus>,
    refund_amount: Option<Decimal>,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    /// Creates a builder with default test values
    pub fn new() -> Self {
        Self {
            id: ClaimId::new(1),
            customer_id: ClaimFixtures::customer_id().to_string(),
            description: DescriptionFixtures::unclear().to_string(),
            submission_date: ClaimFixtures::submission_date(),
            statuses: Vec::new(),
            refund_amount: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = ClaimId::new(id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_submission_date(mut self, date: DateTime<Utc>) -> Self {
        self.submission_date = date;
        self
    }

    /// Appends a manual move to `status`
    pub fn with_status(mut self, status: impl Into<ClaimStatus>) -> Self {
        self.statuses.push(status.into());
        self
    }

    pub fn with_refund_amount(mut self, amount: Decimal) -> Self {
        self.refund_amount = Some(amount);
        self
    }

    /// Builds the claim
    pub fn build(self) -> Claim {
        let mut claim = NewClaim::new(self.customer_id, self.description)
            .into_claim(self.id, self.submission_date);
        for status in self.statuses {
            claim.set_status_manually(status);
        }
        claim.refund_amount = self.refund_amount;
        claim
    }
}
