//! Audit trail entries
//!
//! Every lifecycle event on a claim is recorded as an [`AuditLogEntry`].
//! Entries are never edited once appended; the claim's audit log only grows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::status::ClaimStatus;
use crate::triage::TriageOutcome;

/// Free-form key/value context attached to an audit entry
pub type AuditDetails = Map<String, Value>;

/// Action recorded when a claim is first stored
pub const ACTION_CLAIM_SUBMITTED: &str = "Claim Submitted";

/// One immutable lifecycle event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// When the event was captured
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    /// What happened
    pub action: String,
    /// Context for the event, e.g. previous and new status
    #[serde(default)]
    pub details: Option<AuditDetails>,
}

impl AuditLogEntry {
    /// Creates an entry stamped with the current time
    pub fn new(action: impl Into<String>, details: Option<AuditDetails>) -> Self {
        Self {
            timestamp: Utc::now(),
            action: action.into(),
            details,
        }
    }

    /// Entry seeded into every new claim
    pub fn claim_submitted(customer_id: &str) -> Self {
        let mut details = AuditDetails::new();
        details.insert("customer_id".to_string(), Value::from(customer_id));
        Self::new(ACTION_CLAIM_SUBMITTED, Some(details))
    }

    /// Entry for a manual status override
    pub fn status_updated(previous: &ClaimStatus, new: &ClaimStatus) -> Self {
        let mut details = AuditDetails::new();
        details.insert("previous_status".to_string(), Value::from(previous.as_str()));
        details.insert("new_status".to_string(), Value::from(new.as_str()));
        Self::new(format!("Status Updated to {}", new), Some(details))
    }

    /// Entry for an auto-triage decision
    pub fn triaged(outcome: &TriageOutcome) -> Self {
        let mut details = AuditDetails::new();
        details.insert(
            "validation_reason".to_string(),
            Value::from(outcome.reason.as_str()),
        );
        Self::new(
            format!("AI Triage/Validation: Status changed to {}", outcome.status),
            Some(details),
        )
    }

    /// Looks up a string value in the details payload
    pub fn detail_str(&self, key: &str) -> Option<&str> {
        self.details.as_ref()?.get(key)?.as_str()
    }
}

/// RFC 3339 on output; on input also accepts the naive ISO-8601 stamps
/// (no offset) found in older rows, read as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|e| de::Error::custom(format!("invalid audit timestamp '{}': {}", raw, e)))
    }
}
