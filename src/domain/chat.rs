use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Greeting shown before the user has said anything.
pub const GREETING: &str = "Hello! I'm a SQL assistant. Ask me anything about your database";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    Assistant,
    User,
}

impl ChatRole {
    /// Label used when the transcript is serialized into a prompt.
    pub fn label(&self) -> &'static str {
        match self {
            ChatRole::Assistant => "Assistant",
            ChatRole::User => "User",
        }
    }
}

/// One turn of the conversation. Turns are immutable once appended;
/// insertion order is the display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }
}
