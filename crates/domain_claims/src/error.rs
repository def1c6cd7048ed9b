//! Claims domain errors

use thiserror::Error;

use core_kernel::{ClaimId, PortError};
use crate::status::ClaimStatus;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    NotFound(ClaimId),

    #[error("Claim {id} cannot be validated from status '{status}'")]
    InvalidTransition { id: ClaimId, status: ClaimStatus },

    #[error("Storage error: {0}")]
    Storage(#[source] PortError),
}

impl ClaimError {
    /// Maps a store failure for a specific claim, keeping not-found distinct
    pub fn from_port(id: ClaimId, error: PortError) -> Self {
        if error.is_not_found() {
            ClaimError::NotFound(id)
        } else {
            ClaimError::Storage(error)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClaimError::NotFound(_))
    }

    /// Whether the caller (not the server) is at fault
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ClaimError::Storage(_))
    }
}

impl From<PortError> for ClaimError {
    fn from(error: PortError) -> Self {
        ClaimError::Storage(error)
    }
}
