//! Claims Lifecycle Domain
//!
//! This crate implements the claim lifecycle: submission, manual status
//! overrides, keyword-based auto-triage, and the append-only audit trail
//! that records every one of those events.
//!
//! # Claim Lifecycle
//!
//! ```text
//! submitted ──triage──> validated | rejected | pending_manual_review
//! pending_manual_review ──triage──> validated | rejected | pending_manual_review
//! any status ──manual──> any status
//! ```
//!
//! Persistence goes through the [`ClaimStore`] port; the
//! [`ClaimService`] never reads and writes a claim outside one locked
//! store transaction.

pub mod claim;
pub mod status;
pub mod audit;
pub mod triage;
pub mod ports;
pub mod service;
pub mod error;

pub use claim::{Claim, NewClaim};
pub use status::ClaimStatus;
pub use audit::{AuditLogEntry, AuditDetails};
pub use triage::{Classifier, KeywordClassifier, KeywordRule, TriageOutcome};
pub use ports::{ClaimStore, ClaimLock};
pub use service::ClaimService;
pub use error::ClaimError;
