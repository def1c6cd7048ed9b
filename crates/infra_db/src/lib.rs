//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL side of the claims system using SQLx:
//! connection pooling, schema bootstrap, the `ClaimsRepository`, and the
//! `PostgresClaimStore` adapter behind the `domain_claims::ClaimStore` port.
//!
//! # Architecture
//!
//! The crate follows the repository pattern. Repositories own the SQL and
//! return row types; adapters translate rows into domain types and
//! `DatabaseError` into `PortError`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, schema, DatabaseConfig, PostgresClaimStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/claims_db")).await?;
//! schema::ensure_schema(&pool).await?;
//! let store = PostgresClaimStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod schema;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::PostgresClaimStore;
pub use repositories::ClaimsRepository;
