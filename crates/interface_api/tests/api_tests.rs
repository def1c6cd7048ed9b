//! HTTP API tests against the in-memory claim store

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use domain_claims::ports::mock::MockClaimStore;
use domain_claims::{ClaimService, ClaimStatus, ClaimStore};
use interface_api::config::ApiConfig;
use interface_api::create_router;
use interface_api::dto::claims::ClaimResponse;
use interface_api::error::ErrorResponse;
use test_utils::{ClaimBuilder, DescriptionFixtures};

fn server_with(store: Arc<MockClaimStore>) -> TestServer {
    let app = create_router(ClaimService::new(store), ApiConfig::default());
    TestServer::new(app).unwrap()
}

fn server() -> (TestServer, Arc<MockClaimStore>) {
    let store = Arc::new(MockClaimStore::new());
    (server_with(store.clone()), store)
}

async fn submit(server: &TestServer, description: &str) -> ClaimResponse {
    let response = server
        .post("/claims")
        .json(&json!({"customer_id": "C1", "description": description}))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<ClaimResponse>()
}

mod submission_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_claim_returns_201() {
        let (server, _) = server();

        let claim = submit(&server, "box arrived empty").await;
        assert_eq!(claim.id, 1);
        assert_eq!(claim.status, "submitted");
        assert_eq!(claim.audit_log.len(), 1);
        assert_eq!(claim.audit_log[0].action, "Claim Submitted");
        assert_eq!(claim.refund_amount, None);
    }

    #[tokio::test]
    async fn test_trailing_slash_route() {
        let (server, _) = server();

        let response = server
            .post("/claims/")
            .json(&json!({"customer_id": "C1", "description": "x"}))
            .await;
        response.assert_status(StatusCode::CREATED);

        let list = server.get("/claims/").await.json::<Vec<ClaimResponse>>();
        assert_eq!(list.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_fields_are_unprocessable() {
        let (server, store) = server();

        let response = server
            .post("/claims")
            .json(&json!({"customer_id": "", "description": "x"}))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body = response.json::<ErrorResponse>();
        assert_eq!(body.error, "validation_error");
        assert!(body.details.unwrap()[0].starts_with("customer_id"));

        let missing = server.post("/claims").json(&json!({"customer_id": "C1"})).await;
        missing.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        assert!(store.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (server, _) = server();

        let response = server
            .post("/claims")
            .text("{not json")
            .content_type("application/json")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<ErrorResponse>().error, "bad_request");
    }
}

mod retrieval_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let (server, _) = server();
        assert_eq!(server.get("/claims").await.json::<Vec<Value>>().len(), 0);

        for description in ["a", "b", "c"] {
            submit(&server, description).await;
        }
        let ids: Vec<i64> = server
            .get("/claims")
            .await
            .json::<Vec<ClaimResponse>>()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_get_missing_claim_is_404() {
        let (server, _) = server();

        let response = server.get("/claims/42").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body = response.json::<ErrorResponse>();
        assert_eq!(body.error, "not_found");
        assert_eq!(body.message, "Claim not found: 42");
    }

    #[tokio::test]
    async fn test_claim_reference_is_accepted_as_id() {
        let (server, _) = server();
        submit(&server, "x").await;

        let response = server.get("/claims/CLM-1").await;
        response.assert_status_ok();
        assert_eq!(response.json::<ClaimResponse>().id, 1);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_bad_request() {
        let (server, _) = server();
        server.get("/claims/abc").await.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_refund_amount_is_a_number() {
        let claim = ClaimBuilder::new()
            .with_id(8)
            .with_refund_amount(rust_decimal_macros::dec!(19.99))
            .build();
        let server = server_with(Arc::new(MockClaimStore::with_claims(vec![claim]).await));

        let body = server.get("/claims/8").await.json::<Value>();
        assert_eq!(body["refund_amount"], json!(19.99));
        assert!(body["submission_date"].is_string());
    }
}

mod status_tests {
    use super::*;

    #[tokio::test]
    async fn test_manual_update() {
        let (server, _) = server();
        let claim = submit(&server, "x").await;

        let response = server
            .put(&format!("/claims/{}/status", claim.id))
            .json(&json!({"status": "validated"}))
            .await;
        response.assert_status_ok();
        let updated = response.json::<ClaimResponse>();
        assert_eq!(updated.status, "validated");
        assert_eq!(updated.audit_log.len(), 2);
        assert_eq!(updated.audit_log[1].action, "Status Updated to validated");
    }

    #[tokio::test]
    async fn test_manual_update_accepts_unknown_status() {
        let (server, _) = server();
        let claim = submit(&server, "x").await;

        let response = server
            .put(&format!("/claims/{}/status", claim.id))
            .json(&json!({"status": "escalated"}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<ClaimResponse>().status, "escalated");
    }

    #[tokio::test]
    async fn test_manual_update_missing_claim() {
        let (server, _) = server();
        server
            .put("/claims/9/status")
            .json(&json!({"status": "validated"}))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

mod triage_tests {
    use super::*;

    #[tokio::test]
    async fn test_validate_end_to_end() {
        let (server, _) = server();
        let claim = submit(&server, DescriptionFixtures::missing_item()).await;

        let response = server.put(&format!("/claims/{}/validate", claim.id)).await;
        response.assert_status_ok();
        let triaged = response.json::<ClaimResponse>();
        assert_eq!(triaged.status, "validated");
        assert_eq!(triaged.audit_log.len(), 2);
        assert_eq!(
            triaged.audit_log[1].detail_str("validation_reason"),
            Some("Keywords detected (missing/damaged/faulty)")
        );
    }

    #[tokio::test]
    async fn test_validate_twice_is_bad_request() {
        let (server, _) = server();
        let claim = submit(&server, DescriptionFixtures::spam()).await;
        server
            .put(&format!("/claims/{}/validate", claim.id))
            .await
            .assert_status_ok();

        let response = server.put(&format!("/claims/{}/validate", claim.id)).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<ErrorResponse>();
        assert!(body.message.contains("cannot be validated"));
        assert!(body.message.contains("rejected"));

        let after = server.get(&format!("/claims/{}", claim.id)).await;
        assert_eq!(after.json::<ClaimResponse>().audit_log.len(), 2);
    }

    #[tokio::test]
    async fn test_validate_from_pending_review() {
        let claim = ClaimBuilder::new()
            .with_description(DescriptionFixtures::damaged_item())
            .with_status(ClaimStatus::PendingManualReview)
            .build();
        let server = server_with(Arc::new(MockClaimStore::with_claims(vec![claim]).await));

        let triaged = server.put("/claims/1/validate").await.json::<ClaimResponse>();
        assert_eq!(triaged.status, "validated");
        assert_eq!(triaged.audit_log.len(), 3);
    }
}

mod failure_tests {
    use super::*;

    #[tokio::test]
    async fn test_storage_failure_is_opaque_500() {
        let (server, store) = server();
        let claim = submit(&server, "x").await;
        store.set_unavailable(true);

        let response = server
            .put(&format!("/claims/{}/status", claim.id))
            .json(&json!({"status": "validated"}))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.json::<ErrorResponse>();
        assert_eq!(body.error, "internal_error");
        assert_eq!(body.message, "Internal server error");
        assert!(!body.message.contains("mock"));

        store.set_unavailable(false);
        let after = server.get(&format!("/claims/{}", claim.id)).await;
        assert_eq!(after.json::<ClaimResponse>().status, "submitted");
    }
}

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let (server, _) = server();
        let body = server.get("/health").await.json::<Value>();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_follows_store() {
        let (server, store) = server();
        let ready = server.get("/health/ready").await;
        ready.assert_status_ok();
        assert_eq!(ready.json::<Value>()["store"]["status"], "healthy");

        store.set_unavailable(true);
        let down = server.get("/health/ready").await;
        down.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body = down.json::<Value>();
        assert_eq!(body["status"], "unavailable");
        assert_eq!(body["store"]["status"], "unhealthy");
        assert_eq!(body["store"]["message"], "Claim store unavailable");
    }

    #[tokio::test]
    async fn test_request_id_is_returned() {
        let (server, _) = server();
        let response = server.get("/health").await;
        assert!(response.headers().contains_key("x-request-id"));
    }
}
