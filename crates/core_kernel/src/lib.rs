//! Core Kernel - Foundational types shared by the claims system
//!
//! This crate provides the building blocks used across the workspace:
//! - Strongly-typed identifiers
//! - Port error type and marker traits for the ports and adapters layout

pub mod identifiers;
pub mod ports;

pub use identifiers::{ClaimId, ParseClaimIdError};
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
