//! Conversation relay: forwards chat history to the text provider and turns
//! the outcome into something the chat UI can always display.

use crate::models::ChatMessage;
use crate::services::providers::{
    ChatTurn, GenerationParams, ProviderError, TextProvider, TurnRole,
};
use std::sync::Arc;

/// System instruction sent with every generation request.
pub const SYSTEM_PROMPT: &str = concat!(
    "You are MindfulCompanion, a supportive, empathetic mental wellbeing assistant. ",
    "Your purpose is to help users feel heard, explore their feelings, and discover healthy, evidence-based coping strategies.\n\n",
    "Core guidelines:\n",
    "- Be warm, validating, and non-judgmental.\n",
    "- Keep replies concise: A few sentences.\n",
    "- Offer practical suggestions when appropriate (e.g., grounding, breathing, journaling, CBT-style reframing, sleep hygiene).\n",
    "- Do not diagnose or provide professional therapy; you are not a replacement for a clinician.\n",
    "- Avoid medical or legal advice.\n",
    "- Use plain text (no heavy markdown).\n\n",
    "Safety:\n",
    "- If the user mentions intent to harm themselves/others, feels unsafe, or describes an emergency, respond with calm empathy, ask for reasons why.\n",
    "- If in crisis, you cannot contact services on their behalf.\n",
    "- If the user mentions vaping, tell the user that it is against the law in Singapore.\n\n",
    "Privacy and respect:\n",
    "- Mirror the user's language when reasonable; if the user writes in a language other than English, reply in that language.\n\n",
    "Tone and formatting:\n",
    "- Keep it supportive and practical.\n",
    "- Focus on what the user is feeling, validate those feelings, and ask whether they have more to talk about.\n",
    "- Base the help given to the local Singapore context.\n",
    "- Speak as if you are a therapist. Do not use technical jargon or complex language.\n",
    "- Use short sentences and simple words, no asterisks.\n",
);

/// Fixed greeting returned by `/api/start`.
pub const OPENING_MESSAGE: &str =
    "Hello, I am Project Mindfull. Your personal healthcare companion. How are you today?";

/// Returned instead of an empty generation result.
pub const FALLBACK_REPLY: &str =
    "I'm here with you. Could you share a bit more about how you're feeling right now?";

/// The companion relay. Holds the provider and the fixed sampling
/// parameters; immutable after startup and cloned into every handler.
#[derive(Clone)]
pub struct CompanionService {
    provider: Arc<dyn TextProvider>,
    params: GenerationParams,
}

impl CompanionService {
    pub fn new(provider: Arc<dyn TextProvider>, params: GenerationParams) -> Self {
        Self { provider, params }
    }

    /// Opening message for a fresh conversation.
    pub fn start(&self) -> &'static str {
        OPENING_MESSAGE
    }

    /// Generate a reply for the supplied conversation history.
    ///
    /// Always returns a displayable string: an empty generation result is
    /// replaced by [`FALLBACK_REPLY`], and any provider failure is rendered
    /// into an error message rather than propagated. The HTTP layer
    /// therefore answers 200 even when the upstream call failed.
    pub async fn reply(&self, chat_history: &[ChatMessage]) -> String {
        // The generation API only knows "user" and "model"; every other
        // label ("assistant", "system", ...) is submitted as the model.
        let turns: Vec<ChatTurn> = chat_history
            .iter()
            .map(|message| ChatTurn {
                role: if message.role == "user" {
                    TurnRole::User
                } else {
                    TurnRole::Model
                },
                text: message.content.clone(),
            })
            .collect();

        match self.provider.generate(SYSTEM_PROMPT, &turns, &self.params).await {
            Ok(response) => {
                tracing::debug!(
                    input_tokens = response.input_tokens,
                    output_tokens = response.output_tokens,
                    "Generated companion reply"
                );
                let text = response.text.unwrap_or_default().trim().to_string();
                if text.is_empty() {
                    FALLBACK_REPLY.to_string()
                } else {
                    text
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Companion reply generation failed");
                format!(
                    "Error: Failed to generate a response. Please check your API key and network connection. Details: {}",
                    e
                )
            }
        }
    }

    /// Provider health, used by the readiness probe.
    pub async fn health_check(&self) -> Result<(), ProviderError> {
        self.provider.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::MockTextProvider;

    fn message(role: &str, content: &str) -> ChatMessage {
        ChatMessage {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    fn service(provider: Arc<MockTextProvider>) -> CompanionService {
        CompanionService::new(provider, GenerationParams::default())
    }

    #[tokio::test]
    async fn non_user_roles_are_submitted_as_model() {
        let provider = Arc::new(MockTextProvider::replies_with("ok"));
        let companion = service(provider.clone());

        companion
            .reply(&[
                message("user", "hello"),
                message("assistant", "hi there"),
                message("system", "be brief"),
                message("user", "I feel low"),
            ])
            .await;

        let calls = provider.recorded_calls();
        assert_eq!(calls.len(), 1);
        let roles: Vec<TurnRole> = calls[0].iter().map(|turn| turn.role).collect();
        assert_eq!(
            roles,
            vec![
                TurnRole::User,
                TurnRole::Model,
                TurnRole::Model,
                TurnRole::User
            ]
        );
    }

    #[tokio::test]
    async fn reply_text_is_trimmed() {
        let provider = Arc::new(MockTextProvider::replies_with("  Take a breath.  \n"));
        let companion = service(provider);

        let reply = companion.reply(&[message("user", "help")]).await;
        assert_eq!(reply, "Take a breath.");
    }

    #[tokio::test]
    async fn whitespace_only_reply_becomes_fallback() {
        let provider = Arc::new(MockTextProvider::empty());
        let companion = service(provider);

        let reply = companion.reply(&[message("user", "hi")]).await;
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn provider_failure_becomes_error_string() {
        let provider = Arc::new(MockTextProvider::failing("quota exceeded"));
        let companion = service(provider);

        let reply = companion.reply(&[message("user", "hi")]).await;
        assert!(reply.starts_with("Error: Failed to generate a response."));
        assert!(reply.contains("quota exceeded"));
    }

    #[tokio::test]
    async fn empty_history_still_calls_provider() {
        let provider = Arc::new(MockTextProvider::replies_with("hello"));
        let companion = service(provider.clone());

        companion.reply(&[]).await;
        assert_eq!(provider.recorded_calls(), vec![Vec::<ChatTurn>::new()]);
    }

    #[test]
    fn start_returns_opening_message() {
        let companion = service(Arc::new(MockTextProvider::echo()));
        assert_eq!(companion.start(), OPENING_MESSAGE);
    }
}
