//! HTTP route tests
//!
//! Routes are exercised in-process with `tower::ServiceExt::oneshot`; the
//! model side is the stub adapter or the fake transport.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use auditor_api::ApiServer;
use auditor_core::config::ServerConfig;
use auditor_core::llm::adapters::gemini::GeminiAdapter;
use auditor_core::llm::adapters::stub::StubAdapter;
use auditor_core::llm::adapters::transport::{FakeTransport, Transport};
use auditor_core::llm::adapters::Adapter;
use auditor_core::AuditService;

const CONTRACT: &str = "// SPDX-License-Identifier: MIT\npragma solidity ^0.8.0;\ncontract A {}";

fn router_with(adapter: Adapter) -> Router {
    ApiServer::new(ServerConfig::default(), AuditService::new(adapter))
        .router()
        .unwrap()
}

fn gemini_adapter(fake: &Arc<FakeTransport>, key: Option<&str>) -> Adapter {
    Adapter::Gemini(GeminiAdapter::with_transport(
        "http://gemini.test/v1".to_string(),
        "gemini-2.5-flash".to_string(),
        key.map(str::to_string),
        Transport::fake(Arc::clone(fake)),
    ))
}

async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let app = router_with(Adapter::Stub(StubAdapter::new()));
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "auditor-api");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_analyze_returns_audit_results() {
    let app = router_with(Adapter::Stub(StubAdapter::new()));
    let body = json!({ "contract": CONTRACT }).to_string();

    let (status, json) = post_json(app, "/api/analyze-contract", &body).await;

    assert_eq!(status, StatusCode::OK);
    let sections = json["auditResults"].as_array().unwrap();
    assert_eq!(sections.len(), 3);
    assert_eq!(sections[0]["section"], "Audit Report");
    assert_eq!(sections[1]["section"], "Metric Scores");
    assert_eq!(sections[2]["section"], "Suggestions for Improvement");
}

#[tokio::test]
async fn test_fix_returns_fixed_contract() {
    let app = router_with(Adapter::Stub(StubAdapter::new()));
    let body = json!({ "contract": CONTRACT, "suggestions": "Add NatSpec." }).to_string();

    let (status, json) = post_json(app, "/api/fix-contract", &body).await;

    assert_eq!(status, StatusCode::OK);
    let fixed = json["fixedContract"].as_str().unwrap();
    assert!(fixed.contains("contract Fixed"));
    assert!(!fixed.contains("```"));
}

#[tokio::test]
async fn test_malformed_body_maps_to_500_envelope() {
    let app = router_with(Adapter::Stub(StubAdapter::new()));

    let (status, json) = post_json(app, "/api/analyze-contract", "{not json").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Invalid request body");
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn test_fix_without_suggestions_maps_to_500_envelope() {
    let app = router_with(Adapter::Stub(StubAdapter::new()));
    let body = json!({ "contract": CONTRACT }).to_string();

    let (status, json) = post_json(app, "/api/fix-contract", &body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Invalid request body");
}

#[tokio::test]
async fn test_missing_credential_is_500_without_request() {
    let fake = Arc::new(FakeTransport::new("{}"));
    let app = router_with(gemini_adapter(&fake, None));
    let body = json!({ "contract": CONTRACT }).to_string();

    let (status, json) = post_json(app, "/api/analyze-contract", &body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Missing API credential"));
    assert!(json.get("detail").is_none());
    assert_eq!(fake.request_count(), 0);
}

#[tokio::test]
async fn test_upstream_http_error_carries_detail() {
    let fake = Arc::new(FakeTransport::with_status(400, r#"{"error":"API key not valid"}"#));
    let app = router_with(gemini_adapter(&fake, Some("bad")));
    let body = json!({ "contract": CONTRACT, "suggestions": "x" }).to_string();

    let (status, json) = post_json(app, "/api/fix-contract", &body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Model fix error (HTTP 400)");
    assert_eq!(json["detail"], r#"{"error":"API key not valid"}"#);
}

#[tokio::test]
async fn test_malformed_model_reply_carries_raw_text() {
    let reply = json!({
        "candidates": [{ "content": { "parts": [{ "text": "No issues found!" }] } }]
    })
    .to_string();
    let fake = Arc::new(FakeTransport::new(&reply));
    let app = router_with(gemini_adapter(&fake, Some("k")));
    let body = json!({ "contract": CONTRACT }).to_string();

    let (status, json) = post_json(app, "/api/analyze-contract", &body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["detail"], "No issues found!");
}
