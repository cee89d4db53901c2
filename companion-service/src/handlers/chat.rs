use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::models::ChatMessage;
use crate::startup::AppState;
use service_core::error::AppError;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The full conversation so far, resent by the client on every call.
    #[serde(default)]
    pub chat_history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /api/start — fixed opening greeting for a fresh conversation.
#[tracing::instrument(skip(state))]
pub async fn start_chat(State(state): State<AppState>) -> Result<Json<ChatResponse>, AppError> {
    Ok(Json(ChatResponse {
        response: state.companion.start().to_string(),
    }))
}

/// POST /api/chat — relay the conversation to the provider.
///
/// A malformed body surfaces as the generic 500 envelope; upstream
/// generation failures come back inside a 200 reply string (the relay
/// absorbs them, see `CompanionService::reply`).
#[tracing::instrument(skip(state, payload))]
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Invalid chat request body: {}", e)))?;

    let response = state.companion.reply(&request.chat_history).await;
    Ok(Json(ChatResponse { response }))
}
