//! Claims Domain Ports
//!
//! This module defines the storage port for the claims domain. The lifecycle
//! engine only talks to [`ClaimStore`]; adapters decide where claims live.
//!
//! - **PostgreSQL Adapter**: `infra_db::PostgresClaimStore`
//! - **In-memory Store**: [`mock::MockClaimStore`], for tests
//!
//! # Locked updates
//!
//! Any read-then-write of a claim's mutable fields goes through
//! [`ClaimStore::fetch_for_update`], which returns a [`ClaimLock`]. The lock
//! holds the row exclusively until [`ClaimLock::commit`] or
//! [`ClaimLock::rollback`]; dropping it without committing rolls back.
//!
//! ```rust,ignore
//! let lock = store.fetch_for_update(id).await?;
//! let mut claim = lock.claim().clone();
//! claim.set_status_manually(ClaimStatus::Validated);
//! let saved = lock.commit(claim.status, claim.audit_log).await?;
//! ```

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, HealthCheckable, PortError};

use crate::audit::AuditLogEntry;
use crate::claim::{Claim, NewClaim};
use crate::status::ClaimStatus;

/// Durable storage of claims with serialized read-modify-write access
#[async_trait]
pub trait ClaimStore: DomainPort + HealthCheckable {
    /// Stores a new claim in `submitted` status with its seed audit entry
    async fn insert(&self, claim: NewClaim) -> Result<Claim, PortError>;

    /// Retrieves a claim or returns `PortError::NotFound`
    async fn fetch(&self, id: ClaimId) -> Result<Claim, PortError>;

    /// Retrieves all claims, ordered by id
    async fn fetch_all(&self) -> Result<Vec<Claim>, PortError>;

    /// Locks a claim exclusively and returns its current state
    ///
    /// A second caller for the same id waits until the first lock is
    /// committed or rolled back, then observes the committed state.
    async fn fetch_for_update(&self, id: ClaimId) -> Result<Box<dyn ClaimLock>, PortError>;
}

/// An exclusively held claim inside an open transaction
#[async_trait]
pub trait ClaimLock: Send {
    /// State of the claim when the lock was taken
    fn claim(&self) -> &Claim;

    /// Writes status and audit log, ends the transaction, releases the lock
    async fn commit(
        self: Box<Self>,
        status: ClaimStatus,
        audit_log: Vec<AuditLogEntry>,
    ) -> Result<Claim, PortError>;

    /// Ends the transaction without writing
    async fn rollback(self: Box<Self>) -> Result<(), PortError>;
}

/// In-memory implementation of ClaimStore for testing
///
/// Each row carries its own async mutex, so locked updates on the same claim
/// are serialized the way a `SELECT ... FOR UPDATE` would serialize them,
/// while plain reads only see committed snapshots.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
    use std::sync::Arc;
    use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
    use chrono::Utc;
    use core_kernel::{AdapterHealth, HealthCheckResult};

    #[derive(Debug)]
    struct Row {
        claim: Claim,
        lock: Arc<Mutex<()>>,
    }

    type Rows = Arc<RwLock<BTreeMap<ClaimId, Row>>>;

    /// In-memory mock implementation of ClaimStore
    #[derive(Debug, Default)]
    pub struct MockClaimStore {
        rows: Rows,
        last_id: AtomicI64,
        unavailable: Arc<AtomicBool>,
    }

    impl MockClaimStore {
        /// Creates an empty store
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with claims; ids continue after the largest one
        pub async fn with_claims(claims: Vec<Claim>) -> Self {
            let store = Self::new();
            {
                let mut rows = store.rows.write().await;
                for claim in claims {
                    store.last_id.fetch_max(claim.id.value(), Ordering::SeqCst);
                    rows.insert(claim.id, Row { claim, lock: Arc::default() });
                }
            }
            store
        }

        /// Makes every subsequent operation fail as if the database were down
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        fn check_available(unavailable: &AtomicBool) -> Result<(), PortError> {
            if unavailable.load(Ordering::SeqCst) {
                Err(PortError::connection("mock claim store is unavailable"))
            } else {
                Ok(())
            }
        }
    }

    impl DomainPort for MockClaimStore {}

    #[async_trait]
    impl HealthCheckable for MockClaimStore {
        async fn health_check(&self) -> HealthCheckResult {
            let (status, message) = if self.unavailable.load(Ordering::SeqCst) {
                (AdapterHealth::Unhealthy, Some("mock claim store is unavailable".to_string()))
            } else {
                (AdapterHealth::Healthy, None)
            };
            HealthCheckResult {
                adapter_id: "mock-claim-store".to_string(),
                status,
                latency_ms: 0,
                message,
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ClaimStore for MockClaimStore {
        async fn insert(&self, claim: NewClaim) -> Result<Claim, PortError> {
            Self::check_available(&self.unavailable)?;
            let id = ClaimId::new(self.last_id.fetch_add(1, Ordering::SeqCst) + 1);
            let claim = claim.into_claim(id, Utc::now());
            self.rows.write().await.insert(
                id,
                Row {
                    claim: claim.clone(),
                    lock: Arc::default(),
                },
            );
            Ok(claim)
        }

        async fn fetch(&self, id: ClaimId) -> Result<Claim, PortError> {
            Self::check_available(&self.unavailable)?;
            self.rows
                .read()
                .await
                .get(&id)
                .map(|row| row.claim.clone())
                .ok_or_else(|| PortError::not_found("Claim", id))
        }

        async fn fetch_all(&self) -> Result<Vec<Claim>, PortError> {
            Self::check_available(&self.unavailable)?;
            Ok(self
                .rows
                .read()
                .await
                .values()
                .map(|row| row.claim.clone())
                .collect())
        }

        async fn fetch_for_update(&self, id: ClaimId) -> Result<Box<dyn ClaimLock>, PortError> {
            Self::check_available(&self.unavailable)?;
            let row_lock = self
                .rows
                .read()
                .await
                .get(&id)
                .map(|row| Arc::clone(&row.lock))
                .ok_or_else(|| PortError::not_found("Claim", id))?;

            let guard = row_lock.lock_owned().await;

            // Re-read under the row lock so the previous holder's commit is visible
            let claim = self
                .rows
                .read()
                .await
                .get(&id)
                .map(|row| row.claim.clone())
                .ok_or_else(|| PortError::not_found("Claim", id))?;

            Ok(Box::new(MockClaimLock {
                rows: Arc::clone(&self.rows),
                unavailable: Arc::clone(&self.unavailable),
                claim,
                _guard: guard,
            }))
        }
    }

    struct MockClaimLock {
        rows: Rows,
        unavailable: Arc<AtomicBool>,
        claim: Claim,
        _guard: OwnedMutexGuard<()>,
    }

    #[async_trait]
    impl ClaimLock for MockClaimLock {
        fn claim(&self) -> &Claim {
            &self.claim
        }

        async fn commit(
            self: Box<Self>,
            status: ClaimStatus,
            audit_log: Vec<AuditLogEntry>,
        ) -> Result<Claim, PortError> {
            MockClaimStore::check_available(&self.unavailable)?;
            let mut rows = self.rows.write().await;
            let row = rows
                .get_mut(&self.claim.id)
                .ok_or_else(|| PortError::not_found("Claim", self.claim.id))?;
            row.claim.status = status;
            row.claim.audit_log = audit_log;
            Ok(row.claim.clone())
        }

        async fn rollback(self: Box<Self>) -> Result<(), PortError> {
            Ok(())
        }
    }
}
