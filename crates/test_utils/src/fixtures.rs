//! Pre-built Test Fixtures
//!
//! Ready-to-use claim data. Descriptions are chosen so each one lands in a
//! known branch of the default keyword classifier.

use chrono::{DateTime, TimeZone, Utc};
use fake::Fake;
use serde_json::{json, Value};

use core_kernel::ClaimId;
use domain_claims::{Claim, NewClaim};

/// Fixture for claim descriptions
pub struct DescriptionFixtures;

impl DescriptionFixtures {
    /// Classified as `validated`
    pub fn missing_item() -> &'static str {
        "item missing from box"
    }

    /// Classified as `validated`
    pub fn damaged_item() -> &'static str {
        "Screen arrived DAMAGED and cracked"
    }

    /// Classified as `rejected`
    pub fn spam() -> &'static str {
        "buy cheap watches, totally not spam"
    }

    /// Classified as `validated` since the validated rule is checked first
    pub fn damaged_and_spam() -> &'static str {
        "damaged spam"
    }

    /// Classified as `pending_manual_review`
    pub fn unclear() -> &'static str {
        "the colour is not what I expected"
    }
}

/// Fixture for claim identities and timestamps
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// A stable customer id
    pub fn customer_id() -> &'static str {
        "C1"
    }

    /// A random customer id in the `CUST-nnnnn` shape
    pub fn random_customer_id() -> String {
        format!("CUST-{}", (10_000u32..99_999u32).fake::<u32>())
    }

    /// Fixed submission time for deterministic claims
    pub fn submission_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    /// A new-claim request with an unclear description
    pub fn new_claim() -> NewClaim {
        NewClaim::new(Self::customer_id(), DescriptionFixtures::unclear())
    }

    /// A freshly submitted claim with id 1
    pub fn submitted() -> Claim {
        Self::new_claim().into_claim(ClaimId::new(1), Self::submission_date())
    }
}

/// Fixture for stored audit log JSON
pub struct AuditLogFixtures;

impl AuditLogFixtures {
    /// Audit log as written by older deployments: naive timestamps, no zone
    pub fn legacy_json() -> Value {
        json!([
            {
                "timestamp": "2024-03-01T09:30:00.123456",
                "action": "Claim Submitted",
                "details": {"customer_id": "C1"}
            },
            {
                "timestamp": "2024-03-01T10:00:00",
                "action": "Status Updated to validated",
                "details": {"previous_status": "submitted", "new_status": "validated"}
            }
        ])
    }
}
