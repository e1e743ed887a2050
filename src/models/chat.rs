use serde::Serialize;

/// Request body for `POST /api/chat`.
///
/// `conversation_id` is only serialized when a prior exchange issued one;
/// the server starts a fresh thread when it is absent.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

/// Result of a completed chat exchange.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// Conversation id in effect after the exchange (held or newly issued).
    pub conversation_id: Option<String>,
    /// Full assistant reply, accumulated from the stream.
    pub reply: String,
}
