//! Claims repository implementation
//!
//! Row-level access to the `claims` table. The audit log travels as raw
//! JSONB here; converting it to domain entries is the adapter's job.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use tracing::debug;

use crate::error::DatabaseError;

const CLAIM_COLUMNS: &str = "id, customer_id, description, status, submission_date, \
                             root_cause, resolution_type, refund_amount, audit_log";

/// Repository for managing claims data
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    /// Creates a new ClaimsRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a claim and returns the stored row
    ///
    /// The id and submission date are assigned by the database.
    pub async fn insert(&self, claim: NewClaimRow) -> Result<ClaimRow, DatabaseError> {
        debug!(customer_id = %claim.customer_id, "Inserting claim");

        let row = sqlx::query_as::<_, ClaimRow>(&format!(
            r#"
            INSERT INTO claims (customer_id, description, status, audit_log)
            VALUES ($1, $2, $3, $4)
            RETURNING {CLAIM_COLUMNS}
            "#
        ))
        .bind(&claim.customer_id)
        .bind(&claim.description)
        .bind(&claim.status)
        .bind(&claim.audit_log)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves a claim by its identifier
    pub async fn get_by_id(&self, id: i64) -> Result<ClaimRow, DatabaseError> {
        sqlx::query_as::<_, ClaimRow>(&format!(
            "SELECT {CLAIM_COLUMNS} FROM claims WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Claim", id))
    }

    /// Retrieves every claim ordered by id
    pub async fn list_all(&self) -> Result<Vec<ClaimRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimRow>(&format!(
            "SELECT {CLAIM_COLUMNS} FROM claims ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Reads a claim with `FOR UPDATE` on the caller's transaction
    ///
    /// The row stays locked until that transaction ends.
    pub async fn lock_for_update(
        conn: &mut PgConnection,
        id: i64,
    ) -> Result<ClaimRow, DatabaseError> {
        debug!(claim_id = id, "Locking claim row");

        sqlx::query_as::<_, ClaimRow>(&format!(
            "SELECT {CLAIM_COLUMNS} FROM claims WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Claim", id))
    }

    /// Rewrites status and audit log on the caller's transaction
    pub async fn update_status_and_audit(
        conn: &mut PgConnection,
        id: i64,
        status: &str,
        audit_log: &serde_json::Value,
    ) -> Result<ClaimRow, DatabaseError> {
        debug!(claim_id = id, status, "Updating claim status");

        sqlx::query_as::<_, ClaimRow>(&format!(
            r#"
            UPDATE claims
            SET status = $2, audit_log = $3
            WHERE id = $1
            RETURNING {CLAIM_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .bind(audit_log)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Claim", id))
    }
}

/// Database row for a claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub id: i64,
    pub customer_id: String,
    pub description: String,
    pub status: String,
    pub submission_date: DateTime<Utc>,
    pub root_cause: Option<String>,
    pub resolution_type: Option<String>,
    pub refund_amount: Option<Decimal>,
    pub audit_log: serde_json::Value,
}

/// Data for inserting a claim
#[derive(Debug, Clone)]
pub struct NewClaimRow {
    pub customer_id: String,
    pub description: String,
    pub status: String,
    pub audit_log: serde_json::Value,
}
