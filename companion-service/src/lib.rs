pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::middleware::tracing::request_id_middleware;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeFile,
    trace::TraceLayer,
};

use crate::startup::AppState;

/// Path of the chat page, resolved at compile time so it works from both
/// the workspace root and the crate directory.
const INDEX_PAGE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static/index.html");

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/start", post(handlers::start_chat))
        .route("/api/chat", post(handlers::chat))
        .route("/api/resources", get(handlers::get_resources))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route_service("/", ServeFile::new(INDEX_PAGE))
        .with_state(state)
        // Add tracing layer
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Add tracing middleware for request_id
        .layer(from_fn(request_id_middleware))
        // The chat page may be hosted from any origin.
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
