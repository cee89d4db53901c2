//! Scripted provider for tests and for running without an API key.

use super::{
    ChatTurn, FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider,
    TurnRole,
};
use async_trait::async_trait;
use std::sync::Mutex;

enum MockBehavior {
    /// Answer with a canned string derived from the last user turn.
    Echo,
    /// Answer with a fixed string.
    Reply(String),
    /// Answer with whitespace only.
    Empty,
    /// Fail every call with the given detail.
    Fail(String),
}

/// Mock text provider. Records the turn sequences it receives so tests can
/// assert on what the relay actually submitted.
pub struct MockTextProvider {
    behavior: MockBehavior,
    calls: Mutex<Vec<Vec<ChatTurn>>>,
}

impl MockTextProvider {
    pub fn echo() -> Self {
        Self::with_behavior(MockBehavior::Echo)
    }

    pub fn replies_with(text: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Reply(text.into()))
    }

    pub fn empty() -> Self {
        Self::with_behavior(MockBehavior::Empty)
    }

    pub fn failing(detail: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Fail(detail.into()))
    }

    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Turn sequences received so far, in call order.
    pub fn recorded_calls(&self) -> Vec<Vec<ChatTurn>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        _system_instruction: &str,
        turns: &[ChatTurn],
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.lock().unwrap().push(turns.to_vec());

        let text = match &self.behavior {
            MockBehavior::Echo => {
                let last_user = turns
                    .iter()
                    .rev()
                    .find(|turn| turn.role == TurnRole::User)
                    .map(|turn| turn.text.as_str())
                    .unwrap_or("");
                format!("Mock response for: {}", last_user)
            }
            MockBehavior::Reply(text) => text.clone(),
            MockBehavior::Empty => "   ".to_string(),
            MockBehavior::Fail(detail) => {
                return Err(ProviderError::ApiError(detail.clone()));
            }
        };

        Ok(ProviderResponse {
            text: Some(text),
            input_tokens: turns.iter().map(|t| t.text.len() as i32 / 4).sum(),
            output_tokens: 10,
            finish_reason: FinishReason::Complete,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.behavior {
            MockBehavior::Fail(detail) => Err(ProviderError::ApiError(detail.clone())),
            _ => Ok(()),
        }
    }
}
