//! PostgreSQL Claim Store
//!
//! The internal (database) adapter for the claims domain, implementing
//! `ClaimStore` through the `ClaimsRepository`.
//!
//! Locked updates map onto one PostgreSQL transaction: `fetch_for_update`
//! opens it and runs `SELECT ... FOR UPDATE`; the returned [`PgClaimLock`]
//! owns the transaction until it commits or rolls back. SQLx rolls back a
//! dropped transaction, so an abandoned lock never writes.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use infra_db::adapters::PostgresClaimStore;
//! use domain_claims::ClaimService;
//!
//! let store = Arc::new(PostgresClaimStore::new(pool));
//! let service = ClaimService::new(store);
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument, warn};

use core_kernel::{
    AdapterHealth, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_claims::{AuditLogEntry, Claim, ClaimLock, ClaimStatus, ClaimStore, NewClaim};

use crate::error::DatabaseError;
use crate::repositories::claims::{ClaimRow, ClaimsRepository, NewClaimRow};

const ADAPTER_ID: &str = "postgres-claim-store";

/// PostgreSQL-backed implementation of the ClaimStore port
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants:
/// - missing rows -> `PortError::NotFound`
/// - connection and pool failures -> `PortError::Connection`
/// - undecodable audit logs -> `PortError::Transformation`
/// - other errors -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresClaimStore {
    repository: ClaimsRepository,
    pool: PgPool,
}

impl PostgresClaimStore {
    /// Creates a new PostgreSQL claim store
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimsRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresClaimStore {}

#[async_trait]
impl HealthCheckable for PostgresClaimStore {
    /// Runs `SELECT 1` against the pool
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(_) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
        };

        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ClaimStore for PostgresClaimStore {
    #[instrument(skip(self, claim), fields(customer_id = %claim.customer_id))]
    async fn insert(&self, claim: NewClaim) -> Result<Claim, PortError> {
        let row = NewClaimRow {
            status: claim.initial_status().to_string(),
            audit_log: encode_audit_log(&claim.initial_audit_log())?,
            customer_id: claim.customer_id,
            description: claim.description,
        };

        let stored = self.repository.insert(row).await.map_err(PortError::from)?;
        row_to_claim(stored)
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn fetch(&self, id: ClaimId) -> Result<Claim, PortError> {
        debug!("Fetching claim by ID");

        let row = self
            .repository
            .get_by_id(id.value())
            .await
            .map_err(|e| db_to_port_error(id, e))?;

        row_to_claim(row)
    }

    #[instrument(skip(self))]
    async fn fetch_all(&self) -> Result<Vec<Claim>, PortError> {
        self.repository
            .list_all()
            .await
            .map_err(PortError::from)?
            .into_iter()
            .map(row_to_claim)
            .collect()
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn fetch_for_update(&self, id: ClaimId) -> Result<Box<dyn ClaimLock>, PortError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| PortError::from(DatabaseError::transaction(e)))?;

        // On error the transaction is dropped here and rolled back
        let row = ClaimsRepository::lock_for_update(&mut *tx, id.value())
            .await
            .map_err(|e| db_to_port_error(id, e))?;
        let claim = row_to_claim(row)?;

        Ok(Box::new(PgClaimLock { tx, claim }))
    }
}

/// A claim row held by `SELECT ... FOR UPDATE` in an open transaction
pub struct PgClaimLock {
    tx: Transaction<'static, Postgres>,
    claim: Claim,
}

#[async_trait]
impl ClaimLock for PgClaimLock {
    fn claim(&self) -> &Claim {
        &self.claim
    }

    async fn commit(
        self: Box<Self>,
        status: ClaimStatus,
        audit_log: Vec<AuditLogEntry>,
    ) -> Result<Claim, PortError> {
        let PgClaimLock { mut tx, claim } = *self;
        let encoded = encode_audit_log(&audit_log)?;

        let row = ClaimsRepository::update_status_and_audit(
            &mut *tx,
            claim.id.value(),
            status.as_str(),
            &encoded,
        )
        .await
        .map_err(|e| db_to_port_error(claim.id, e))?;

        tx.commit()
            .await
            .map_err(|e| PortError::from(DatabaseError::transaction(e)))?;

        row_to_claim(row)
    }

    async fn rollback(self: Box<Self>) -> Result<(), PortError> {
        let claim_id = self.claim.id;
        self.tx.rollback().await.map_err(|e| {
            warn!(claim_id = %claim_id, error = %e, "Rollback failed");
            PortError::from(DatabaseError::transaction(e))
        })
    }
}

/// Converts a database error, naming the claim when the row is missing
fn db_to_port_error(id: ClaimId, error: DatabaseError) -> PortError {
    if error.is_not_found() {
        PortError::not_found("Claim", id)
    } else {
        PortError::from(error)
    }
}

fn encode_audit_log(entries: &[AuditLogEntry]) -> Result<serde_json::Value, PortError> {
    serde_json::to_value(entries).map_err(|e| PortError::from(DatabaseError::from(e)))
}

fn decode_audit_log(id: i64, value: serde_json::Value) -> Result<Vec<AuditLogEntry>, PortError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(value).map_err(|e| {
        PortError::transformation(format!("claim {} has an unreadable audit log: {}", id, e))
    })
}

fn row_to_claim(row: ClaimRow) -> Result<Claim, PortError> {
    Ok(Claim {
        id: ClaimId::new(row.id),
        audit_log: decode_audit_log(row.id, row.audit_log)?,
        customer_id: row.customer_id,
        description: row.description,
        status: ClaimStatus::from(row.status),
        submission_date: row.submission_date,
        root_cause: row.root_cause,
        resolution_type: row.resolution_type,
        refund_amount: row.refund_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn row(audit_log: serde_json::Value) -> ClaimRow {
        ClaimRow {
            id: 5,
            customer_id: "C1".into(),
            description: "lid cracked".into(),
            status: "pending_manual_review".into(),
            submission_date: Utc::now(),
            root_cause: None,
            resolution_type: None,
            refund_amount: Some(Decimal::new(1999, 2)),
            audit_log,
        }
    }

    #[test]
    fn test_row_to_claim_decodes_audit_log() {
        let claim = row_to_claim(row(json!([
            {
                "timestamp": "2024-03-01T09:30:00.123456",
                "action": "Claim Submitted",
                "details": {"customer_id": "C1"}
            },
            {
                "timestamp": "2024-03-01T09:31:00Z",
                "action": "AI Triage/Validation: Status changed to pending_manual_review",
                "details": {"validation_reason": "No clear keywords, requires manual review"}
            }
        ])))
        .unwrap();

        assert_eq!(claim.id, ClaimId::new(5));
        assert_eq!(claim.status, ClaimStatus::PendingManualReview);
        assert_eq!(claim.audit_log.len(), 2);
        assert_eq!(claim.audit_log[0].detail_str("customer_id"), Some("C1"));
        assert_eq!(claim.refund_amount, Some(Decimal::new(1999, 2)));
    }

    #[test]
    fn test_null_audit_log_is_empty() {
        let claim = row_to_claim(row(serde_json::Value::Null)).unwrap();
        assert!(claim.audit_log.is_empty());
    }

    #[test]
    fn test_malformed_audit_log_is_transformation_error() {
        let err = row_to_claim(row(json!({"not": "a list"}))).unwrap_err();
        assert!(matches!(err, PortError::Transformation { .. }));
    }

    #[test]
    fn test_missing_row_names_the_claim() {
        let err = db_to_port_error(ClaimId::new(9), DatabaseError::not_found("Claim", 9));
        assert!(matches!(err, PortError::NotFound { ref entity_type, ref id }
            if entity_type == "Claim" && id == "9"));
    }

    #[test]
    fn test_encode_round_trips_through_decode() {
        let entries = vec![AuditLogEntry::claim_submitted("C1")];
        let value = encode_audit_log(&entries).unwrap();
        assert_eq!(decode_audit_log(1, value).unwrap(), entries);
    }
}
