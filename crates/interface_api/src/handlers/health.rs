//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use core_kernel::AdapterHealth;

use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreHealth>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreHealth {
    pub adapter_id: String,
    pub status: AdapterHealth,
    pub latency_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Liveness endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: None,
    })
}

const STORE_UNAVAILABLE: &str = "Claim store unavailable";

/// Readiness check (includes the claim store)
///
/// Store failure detail is logged, never returned.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let result = state.service.health_check().await;

    let (code, status, message) = if result.is_operational() {
        (StatusCode::OK, "ready", None)
    } else {
        warn!(
            adapter_id = %result.adapter_id,
            detail = result.message.as_deref().unwrap_or(""),
            "Claim store is not ready"
        );
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "unavailable",
            Some(STORE_UNAVAILABLE.to_string()),
        )
    };

    let body = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: Some(StoreHealth {
            adapter_id: result.adapter_id,
            status: result.status,
            latency_ms: result.latency_ms,
            message,
        }),
    };
    (code, Json(body))
}
