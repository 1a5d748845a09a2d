//! End-to-end integration tests for CampusChat.
//!
//! These tests exercise the full pipeline from an HTTP chat request to the
//! reply body: configuration, the Gemini adapter against a mock upstream,
//! rule routing and the gateway.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use campuschat_config::AppConfig;
use campuschat_core::message::{EMPTY_GENERATION_REPLY, SERVER_PROBLEM_REPLY};
use campuschat_gateway::{GatewayState, build_router};
use campuschat_router::MessageRouter;
use http_body_util::BodyExt;
use mockito::Matcher;
use tower::ServiceExt;

const GENERATE_PATH: &str = "/models/gemini-2.0-flash:generateContent";

fn config_for(server: &mockito::ServerGuard) -> AppConfig {
    let mut config = AppConfig::default();
    config.gemini.api_key = Some("e2e-key".into());
    config.gemini.api_url = server.url();
    config
}

fn app_for(config: &AppConfig) -> Router {
    let provider = campuschat_providers::build_from_config(config).unwrap();
    let router = MessageRouter::from_config(config, provider);
    build_router(Arc::new(GatewayState { router }), &config.gateway)
}

async fn chat(app: Router, message: &str) -> (StatusCode, String) {
    let body = serde_json::json!({ "message": message }).to_string();
    let req = Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json["reply"].as_str().unwrap().to_string())
}

// ── Static rules ─────────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_rule_reply_never_reaches_upstream() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .expect(0)
        .create_async()
        .await;

    let config = config_for(&server);

    let (status, reply) = chat(app_for(&config), "Who is the VC?").await;
    assert_eq!(status, StatusCode::OK);
    assert!(reply.contains("Dr. Arun Arora"));
    assert!(reply.contains("https://csvtu.ac.in/ew/honble-vice-chancellor/"));

    let (_, reply) = chat(app_for(&config), "result check").await;
    assert!(reply.contains("https://csvtu.ac.in/ew/results-rtrvrrv/"));

    let (_, reply) = chat(app_for(&config), "   ").await;
    assert_eq!(reply, "Please type a message before sending.");

    mock.assert_async().await;
}

// ── Fallback ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_unmatched_question_is_answered_by_gemini() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .match_header("x-goog-api-key", "e2e-key")
        .match_body(Matcher::Regex(
            r"User question: Are hostels available\?".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"candidates": [{"content": {"parts": [{"text": "- Hostels: "}, {"text": "see the UTD page."}]}}]}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let config = config_for(&server);
    let (status, reply) = chat(app_for(&config), "  Are hostels available?  ").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply, "- Hostels: \nsee the UTD page.");
    mock.assert_async().await;
}

#[tokio::test]
async fn e2e_empty_candidates_yield_placeholder() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates": []}"#)
        .create_async()
        .await;

    let config = config_for(&server);
    let (status, reply) = chat(app_for(&config), "Are hostels available?").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply, EMPTY_GENERATION_REPLY);
}

#[tokio::test]
async fn e2e_upstream_error_still_returns_200() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", GENERATE_PATH)
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"code": 403, "message": "API key not valid"}}"#)
        .create_async()
        .await;

    let config = config_for(&server);
    let (status, reply) = chat(app_for(&config), "Are hostels available?").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply, SERVER_PROBLEM_REPLY);
}

#[tokio::test]
async fn e2e_configured_model_is_used() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-1.5-pro:generateContent")
        .with_status(200)
        .with_body(r#"{"candidates": [{"content": {"parts": [{"text": "pro answer"}]}}]}"#)
        .create_async()
        .await;

    let mut config = config_for(&server);
    config.gemini.model = "gemini-1.5-pro".into();

    let (_, reply) = chat(app_for(&config), "Are hostels available?").await;
    assert_eq!(reply, "pro answer");
    mock.assert_async().await;
}

// ── Health ───────────────────────────────────────────────────────────────

async fn upstream_status(app: Router) -> (StatusCode, String) {
    let req = Request::builder()
        .uri("/health/upstream")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json["status"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn e2e_upstream_health_probes_model_metadata() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/models/gemini-2.0-flash")
        .match_header("x-goog-api-key", "e2e-key")
        .with_status(200)
        .with_body(r#"{"name": "models/gemini-2.0-flash"}"#)
        .create_async()
        .await;

    let config = config_for(&server);
    assert_eq!(
        upstream_status(app_for(&config)).await,
        (StatusCode::OK, "ok".to_string())
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn e2e_upstream_health_reports_rejected_key() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/models/gemini-2.0-flash")
        .with_status(403)
        .create_async()
        .await;

    let config = config_for(&server);
    assert_eq!(
        upstream_status(app_for(&config)).await,
        (StatusCode::SERVICE_UNAVAILABLE, "unreachable".to_string())
    );
}

// ── Startup ──────────────────────────────────────────────────────────────

#[test]
fn e2e_missing_api_key_fails_startup() {
    let config = AppConfig::default();
    assert!(campuschat_providers::build_from_config(&config).is_err());
}
