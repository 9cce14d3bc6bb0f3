use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message. A closed two-variant tag, not an open hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Model,
}

/// One entry in the chat transcript.
///
/// `text` is mutable while a response is streaming into it and immutable
/// once the stream ends. `is_thinking` marks the in-flight placeholder;
/// at most one `Model` message is in that state at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    /// Data-URI encoded image attached to a user message, for display.
    pub image: Option<String>,
    pub is_thinking: bool,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            image: None,
            is_thinking: false,
            timestamp: Utc::now(),
        }
    }

    /// A user message, optionally carrying an attached image for display.
    pub fn user(text: impl Into<String>, image: Option<String>) -> Self {
        Self {
            image,
            ..Self::new(Role::User, text)
        }
    }

    /// A finalized model message.
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text)
    }

    /// The placeholder created when a response stream starts.
    pub fn model_placeholder() -> Self {
        Self {
            is_thinking: true,
            ..Self::new(Role::Model, "")
        }
    }
}
