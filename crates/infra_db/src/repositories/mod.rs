//! Repository implementations
//!
//! Repositories encapsulate SQL and map between database rows and plain
//! Rust structs. Queries are built at runtime with `sqlx::query_as`, so the
//! crate compiles without a reachable database.
//!
//! Statements that must run inside a caller's transaction take a
//! `&mut PgConnection` instead of using the pool.

pub mod claims;

pub use claims::{ClaimRow, ClaimsRepository, NewClaimRow};
