use serde::{Deserialize, Serialize};

/// One turn of the conversation as the browser client sends it.
///
/// The client uses `"user"`/`"assistant"` role labels; normalization to the
/// generation API's two-party vocabulary happens in the relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}
