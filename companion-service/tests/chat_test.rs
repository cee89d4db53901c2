//! Integration tests for the chat endpoints, driven through the router with
//! scripted providers.

mod common;

use axum::http::StatusCode;
use common::{json_body, post_json, test_router};
use companion_service::services::companion::{FALLBACK_REPLY, OPENING_MESSAGE};
use companion_service::services::providers::mock::MockTextProvider;
use companion_service::services::providers::TurnRole;
use std::sync::Arc;

#[tokio::test]
async fn start_returns_fixed_greeting() {
    let router = test_router(Arc::new(MockTextProvider::echo()));

    let response = post_json(router, "/api/start", "").await;
    let (status, json) = json_body(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], OPENING_MESSAGE);
}

#[tokio::test]
async fn chat_relays_generated_text() {
    let router = test_router(Arc::new(MockTextProvider::replies_with("You matter.")));

    let body = r#"{"chat_history": [{"role": "user", "content": "I had a rough day"}]}"#;
    let response = post_json(router, "/api/chat", body).await;
    let (status, json) = json_body(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], "You matter.");
}

#[tokio::test]
async fn chat_normalizes_roles_before_submission() {
    let provider = Arc::new(MockTextProvider::replies_with("ok"));
    let router = test_router(provider.clone());

    let body = r#"{"chat_history": [
        {"role": "user", "content": "hi"},
        {"role": "assistant", "content": "hello"},
        {"role": "narrator", "content": "meanwhile"}
    ]}"#;
    let response = post_json(router, "/api/chat", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let calls = provider.recorded_calls();
    assert_eq!(calls.len(), 1);
    let roles: Vec<TurnRole> = calls[0].iter().map(|turn| turn.role).collect();
    assert_eq!(roles, vec![TurnRole::User, TurnRole::Model, TurnRole::Model]);
}

#[tokio::test]
async fn chat_without_history_is_treated_as_empty() {
    let provider = Arc::new(MockTextProvider::replies_with("hello"));
    let router = test_router(provider.clone());

    let response = post_json(router, "/api/chat", "{}").await;
    let (status, json) = json_body(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], "hello");
    assert_eq!(provider.recorded_calls()[0].len(), 0);
}

#[tokio::test]
async fn upstream_failure_still_answers_200_with_error_text() {
    let router = test_router(Arc::new(MockTextProvider::failing("quota exhausted")));

    let body = r#"{"chat_history": [{"role": "user", "content": "hi"}]}"#;
    let response = post_json(router, "/api/chat", body).await;
    let (status, json) = json_body(response).await;

    assert_eq!(status, StatusCode::OK);
    let reply = json["response"].as_str().unwrap();
    assert!(reply.contains("Error"));
    assert!(reply.contains("quota exhausted"));
}

#[tokio::test]
async fn empty_generation_result_uses_fallback_sentence() {
    let router = test_router(Arc::new(MockTextProvider::empty()));

    let body = r#"{"chat_history": [{"role": "user", "content": "hi"}]}"#;
    let response = post_json(router, "/api/chat", body).await;
    let (status, json) = json_body(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], FALLBACK_REPLY);
}

#[tokio::test]
async fn malformed_body_returns_500_envelope() {
    let router = test_router(Arc::new(MockTextProvider::echo()));

    // Entry missing `content` fails deserialization.
    let body = r#"{"chat_history": [{"role": "user"}]}"#;
    let response = post_json(router, "/api/chat", body).await;
    let (status, json) = json_body(response).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn invalid_json_returns_500_envelope() {
    let router = test_router(Arc::new(MockTextProvider::echo()));

    let response = post_json(router, "/api/chat", "not json at all").await;
    let (status, json) = json_body(response).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json.get("error").is_some());
}
