use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::startup::AppState;

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "companion-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe: consults the provider (there is no database to check).
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.companion.health_check().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Provider health check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
