//! Claims DTOs

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use validator::Validate;

use domain_claims::{AuditLogEntry, Claim};

use crate::error::ApiError;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateClaimRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub customer_id: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: String,
}

/// Manual status override; any status string is accepted
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimResponse {
    pub id: i64,
    pub customer_id: String,
    pub description: String,
    pub status: String,
    pub submission_date: DateTime<Utc>,
    pub root_cause: Option<String>,
    pub resolution_type: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub refund_amount: Option<Decimal>,
    pub audit_log: Vec<AuditLogEntry>,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        Self {
            id: claim.id.value(),
            customer_id: claim.customer_id,
            description: claim.description,
            status: claim.status.into(),
            submission_date: claim.submission_date,
            root_cause: claim.root_cause,
            resolution_type: claim.resolution_type,
            refund_amount: claim.refund_amount,
            audit_log: claim.audit_log,
        }
    }
}

/// JSON body extractor that runs `validator` checks
///
/// Malformed bodies and failed checks both become [`ApiError`], so every
/// client error shares the `{error, message}` body.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ClaimId;
    use domain_claims::NewClaim;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_fields_fail_validation() {
        let request = CreateClaimRequest {
            customer_id: String::new(),
            description: "x".into(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("customer_id"));
    }

    #[test]
    fn test_refund_amount_serializes_as_number() {
        let mut claim = NewClaim::new("C1", "x").into_claim(ClaimId::new(3), Utc::now());
        claim.refund_amount = Some(dec!(12.5));

        let json = serde_json::to_value(ClaimResponse::from(claim)).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["status"], "submitted");
        assert_eq!(json["refund_amount"], 12.5);
        assert_eq!(json["audit_log"][0]["action"], "Claim Submitted");
    }
}
