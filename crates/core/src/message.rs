//! Chat request/reply value objects.
//!
//! These are the only things that cross the HTTP boundary:
//! client sends a `ChatRequest` → router picks a path → client gets a `ChatReply`.
//! Both are transient and discarded once the response is written.

use serde::{Deserialize, Serialize};

/// Reply for an empty or whitespace-only message.
pub const EMPTY_MESSAGE_REPLY: &str = "Please type a message before sending.";

/// Reply when the fallback provider fails for any reason.
pub const SERVER_PROBLEM_REPLY: &str = "There is a server-side problem. Please try again later.";

/// Reply when the provider succeeds but produces no text.
pub const EMPTY_GENERATION_REPLY: &str = "I could not generate a reply from the AI model.";

/// An inbound chat message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Free text typed by the user. May be empty.
    #[serde(default)]
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Parse a request body without ever failing.
    ///
    /// An unparseable body, a missing or `null` field, or a non-string
    /// `message` all collapse to an empty message.
    pub fn from_body(body: &[u8]) -> Self {
        let message = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_default();
        Self { message }
    }
}

/// An outbound chat reply. Always serialized as `{"reply": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

impl ChatReply {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}
