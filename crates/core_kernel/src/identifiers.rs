//! Strongly-typed identifiers for domain entities
//!
//! Claims are keyed by a store-assigned serial number. Wrapping it in a
//! newtype keeps raw integers from leaking into signatures where a claim
//! reference is meant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Prefix accepted (but not required) when parsing a claim reference
const CLAIM_PREFIX: &str = "CLM-";

/// Identifier of a claim, assigned by the claim store on insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(i64);

impl ClaimId {
    /// Wraps a store-assigned key
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying key
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Returns the human-facing reference, e.g. `CLM-42`
    pub fn reference(&self) -> String {
        format!("{}{}", CLAIM_PREFIX, self.0)
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a string is not a valid claim identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid claim id '{input}': {source}")]
pub struct ParseClaimIdError {
    input: String,
    #[source]
    source: ParseIntError,
}

impl FromStr for ClaimId {
    type Err = ParseClaimIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix(CLAIM_PREFIX).unwrap_or(s);
        raw.parse::<i64>()
            .map(Self)
            .map_err(|source| ParseClaimIdError {
                input: s.to_string(),
                source,
            })
    }
}

impl From<i64> for ClaimId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ClaimId> for i64 {
    fn from(id: ClaimId) -> i64 {
        id.0
    }
}
