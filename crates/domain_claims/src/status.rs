//! Claim status tokens

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a claim
///
/// The four known tokens drive auto-triage. Manual updates may set any
/// string, which is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClaimStatus {
    /// Initial status of every new claim
    Submitted,
    /// Triage could not decide; a human has to look at it
    PendingManualReview,
    /// Accepted by triage or a reviewer
    Validated,
    /// Refused by triage or a reviewer
    Rejected,
    /// Any other status set through a manual update
    Other(String),
}

impl ClaimStatus {
    /// Returns the storage/wire token
    pub fn as_str(&self) -> &str {
        match self {
            ClaimStatus::Submitted => "submitted",
            ClaimStatus::PendingManualReview => "pending_manual_review",
            ClaimStatus::Validated => "validated",
            ClaimStatus::Rejected => "rejected",
            ClaimStatus::Other(token) => token,
        }
    }

    /// Maps an `Other` holding a known token onto its variant
    pub fn normalized(self) -> Self {
        ClaimStatus::from(String::from(self))
    }

    /// Whether auto-triage may run from this status
    pub fn is_triageable(&self) -> bool {
        matches!(self.as_str(), "submitted" | "pending_manual_review")
    }

    /// Whether this is one of the known tokens
    pub fn is_known(&self) -> bool {
        !matches!(ClaimStatus::from(self.as_str()), ClaimStatus::Other(_))
    }
}

impl From<&str> for ClaimStatus {
    fn from(token: &str) -> Self {
        match token {
            "submitted" => ClaimStatus::Submitted,
            "pending_manual_review" => ClaimStatus::PendingManualReview,
            "validated" => ClaimStatus::Validated,
            "rejected" => ClaimStatus::Rejected,
            other => ClaimStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for ClaimStatus {
    fn from(token: String) -> Self {
        match ClaimStatus::from(token.as_str()) {
            ClaimStatus::Other(_) => ClaimStatus::Other(token),
            known => known,
        }
    }
}

impl From<ClaimStatus> for String {
    fn from(status: ClaimStatus) -> String {
        match status {
            ClaimStatus::Other(token) => token,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
