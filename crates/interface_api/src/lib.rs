//! HTTP API Layer
//!
//! This crate provides the REST API for claims lifecycle management using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers calling the `ClaimService`
//! - **Middleware**: Request ids, tracing, request logging, CORS
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent `{error, message}` error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(service, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{get, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use domain_claims::ClaimService;

use crate::config::ApiConfig;
use crate::handlers::{claims, health};
use crate::middleware::request_logging;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ClaimService>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `service` - Claim lifecycle service, already wired to its store
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(service: ClaimService, config: ApiConfig) -> Router {
    let cors = cors_layer(&config);
    let state = AppState {
        service: Arc::new(service),
        config,
    };

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let claims_routes = Router::new()
        .route("/claims", get(claims::list_claims).post(claims::create_claim))
        .route("/claims/", get(claims::list_claims).post(claims::create_claim))
        .route("/claims/:id", get(claims::get_claim))
        .route("/claims/:id/status", put(claims::update_status))
        .route("/claims/:id/validate", put(claims::validate_claim));

    Router::new()
        .merge(health_routes)
        .merge(claims_routes)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(cors)
                .map_response(axum::response::IntoResponse::into_response)
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

/// Builds the CORS layer from the configured origins
///
/// Credentials are allowed, so methods and headers mirror the request
/// instead of using a wildcard. A `*` origin mirrors the request origin.
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let origins = config.cors_origin_list();

    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::mirror_request()
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
