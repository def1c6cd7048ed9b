//! Claims handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use core_kernel::ClaimId;
use domain_claims::ClaimStatus;

use crate::dto::claims::*;
use crate::{error::ApiError, AppState};

fn parse_id(raw: &str) -> Result<ClaimId, ApiError> {
    raw.parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid claim id: {}", e)))
}

/// Submits a new claim
pub async fn create_claim(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateClaimRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let claim = state
        .service
        .submit(&request.customer_id, &request.description)
        .await?;
    Ok((StatusCode::CREATED, Json(claim.into())))
}

/// Lists all claims ordered by id
pub async fn list_claims(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let claims = state.service.list().await?;
    Ok(Json(claims.into_iter().map(ClaimResponse::from).collect()))
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.service.get(parse_id(&id)?).await?;
    Ok(Json(claim.into()))
}

/// Sets the claim status by hand
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state
        .service
        .set_status_manually(parse_id(&id)?, ClaimStatus::from(request.status))
        .await?;
    Ok(Json(claim.into()))
}

/// Runs keyword triage on the claim
pub async fn validate_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.service.auto_triage(parse_id(&id)?).await?;
    Ok(Json(claim.into()))
}
