use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use companion_service::build_router;
use companion_service::config::{CompanionConfig, GoogleConfig, ModelConfig};
use companion_service::services::providers::{GenerationParams, TextProvider};
use companion_service::services::CompanionService;
use companion_service::startup::AppState;
use http_body_util::BodyExt;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::ServiceExt;

#[allow(dead_code)]
pub fn test_config() -> CompanionConfig {
    CompanionConfig {
        common: CoreConfig {
            port: 0,
            log_level: "info".to_string(),
        },
        google: GoogleConfig {
            api_key: "test-api-key".to_string(),
            enabled: false,
        },
        model: ModelConfig {
            name: "gemini-2.5-flash-preview-05-20".to_string(),
            temperature: 0.6,
            top_p: 0.9,
            top_k: 40,
            max_output_tokens: 512,
        },
    }
}

/// Router wired to the given provider, for in-process `oneshot` tests.
#[allow(dead_code)]
pub fn test_router(provider: Arc<dyn TextProvider>) -> Router {
    let companion = CompanionService::new(provider, GenerationParams::default());
    build_router(AppState {
        config: test_config(),
        companion,
    })
}

#[allow(dead_code)]
pub async fn post_json(router: Router, uri: &str, body: &str) -> Response<Body> {
    router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("Failed to build request"),
        )
        .await
        .expect("Failed to send request")
}

#[allow(dead_code)]
pub async fn get(router: Router, uri: &str) -> Response<Body> {
    router
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Failed to send request")
}

#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let json = serde_json::from_slice(&bytes).expect("Body was not valid JSON");
    (status, json)
}
