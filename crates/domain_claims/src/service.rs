//! Claim lifecycle service
//!
//! The [`ClaimService`] is the entry point for every claim operation. It
//! validates preconditions, computes the next status and audit entry on the
//! [`Claim`] aggregate, and hands the persisted mutation to the
//! [`ClaimStore`], which makes it atomic.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use core_kernel::{ClaimId, HealthCheckResult, PortError};

use crate::claim::{Claim, NewClaim};
use crate::error::ClaimError;
use crate::ports::ClaimStore;
use crate::status::ClaimStatus;
use crate::triage::{Classifier, KeywordClassifier};

/// Lifecycle engine for claims
///
/// Every status change runs inside one locked store transaction: fetch for
/// update, append exactly one audit entry, commit. Nothing is retried; an
/// operation either commits fully or leaves the claim as it was.
#[derive(Clone)]
pub struct ClaimService {
    store: Arc<dyn ClaimStore>,
    classifier: Arc<dyn Classifier>,
}

impl ClaimService {
    /// Creates a service using the default keyword classifier
    ///
    /// # Arguments
    ///
    /// * `store` - The claim store all operations persist through
    pub fn new(store: Arc<dyn ClaimStore>) -> Self {
        Self {
            store,
            classifier: Arc::new(KeywordClassifier::default()),
        }
    }

    /// Replaces the triage classifier
    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Submits a new claim
    ///
    /// Input validation (non-empty fields) belongs to the caller's request layer.
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::Storage` if the claim cannot be stored
    #[instrument(skip(self, customer_id, description), fields(customer_id = %customer_id))]
    pub async fn submit(&self, customer_id: &str, description: &str) -> Result<Claim, ClaimError> {
        let claim = self
            .store
            .insert(NewClaim::new(customer_id, description))
            .await
            .map_err(|e| log_storage_failure("submit", e))?;

        info!(claim_id = %claim.id, "Claim submitted");
        Ok(claim)
    }

    /// Retrieves a claim
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::NotFound` if no claim has this id
    #[instrument(skip(self))]
    pub async fn get(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        self.store
            .fetch(id)
            .await
            .map_err(|e| ClaimError::from_port(id, e))
            .map_err(log_claim_failure)
    }

    /// Lists all claims, ordered by id
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Claim>, ClaimError> {
        self.store
            .fetch_all()
            .await
            .map_err(|e| log_storage_failure("list", e))
    }

    /// Sets any status on any existing claim (human override)
    ///
    /// Accepts a `ClaimStatus` or a raw status token.
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::NotFound` if no claim has this id, or
    /// `ClaimError::Storage` if the transaction fails (nothing is written)
    #[instrument(skip(self, new_status))]
    pub async fn set_status_manually(
        &self,
        id: ClaimId,
        new_status: impl Into<ClaimStatus>,
    ) -> Result<Claim, ClaimError> {
        let new_status = new_status.into();
        let lock = self
            .store
            .fetch_for_update(id)
            .await
            .map_err(|e| log_claim_failure(ClaimError::from_port(id, e)))?;

        let mut claim = lock.claim().clone();
        let previous = claim.status.clone();
        claim.set_status_manually(new_status);

        let saved = lock
            .commit(claim.status, claim.audit_log)
            .await
            .map_err(|e| log_claim_failure(ClaimError::from_port(id, e)))?;

        if !saved.status.is_known() {
            warn!(claim_id = %id, status = %saved.status, "Claim moved to a status outside the known set");
        }
        info!(claim_id = %id, from = %previous, to = %saved.status, "Claim status updated manually");
        Ok(saved)
    }

    /// Classifies the claim description and moves the claim to the proposed status
    ///
    /// # Errors
    ///
    /// - `ClaimError::NotFound` if no claim has this id
    /// - `ClaimError::InvalidTransition` unless the claim is `submitted` or
    ///   `pending_manual_review`; the claim is left unchanged
    /// - `ClaimError::Storage` if the transaction fails
    #[instrument(skip(self))]
    pub async fn auto_triage(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        let lock = self
            .store
            .fetch_for_update(id)
            .await
            .map_err(|e| log_claim_failure(ClaimError::from_port(id, e)))?;

        let mut claim = lock.claim().clone();
        if let Err(rejected) = claim.ensure_triageable() {
            if let Err(e) = lock.rollback().await {
                warn!(claim_id = %id, error = %e, "Rollback after rejected triage failed");
            }
            return Err(log_claim_failure(rejected));
        }

        let outcome = self.classifier.classify(&claim.description);
        claim.apply_triage(outcome)?;

        let saved = lock
            .commit(claim.status, claim.audit_log)
            .await
            .map_err(|e| log_claim_failure(ClaimError::from_port(id, e)))?;

        info!(claim_id = %id, status = %saved.status, "Claim triaged");
        Ok(saved)
    }

    /// Reports whether the underlying store is reachable
    pub async fn health_check(&self) -> HealthCheckResult {
        self.store.health_check().await
    }
}

fn log_storage_failure(operation: &str, error: PortError) -> ClaimError {
    error!(operation, error = %error, "Claim store operation failed");
    ClaimError::Storage(error)
}

fn log_claim_failure(error: ClaimError) -> ClaimError {
    match &error {
        ClaimError::Storage(source) => error!(error = %source, "Claim store operation failed"),
        other => warn!(error = %other, "Claim operation rejected"),
    }
    error
}
