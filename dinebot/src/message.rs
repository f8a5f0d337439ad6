//! Chat message type shared by the order state and the LLM client.

use serde::{Deserialize, Serialize};

/// One message in a conversation.
///
/// `System` carries prompt instructions and is only ever sent to the LLM; the
/// order state's transcript holds `User` and `Assistant` turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "content", rename_all = "lowercase")]
pub enum Message {
    System(String),
    User(String),
    Assistant(String),
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Message::System(content.into())
    }

    pub fn user(content: impl Into<String>) -> Self {
        Message::User(content.into())
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Message::Assistant(content.into())
    }

    /// Role label as used in prompts and transcripts (`system`, `user`, `assistant`).
    pub fn role(&self) -> &'static str {
        match self {
            Message::System(_) => "system",
            Message::User(_) => "user",
            Message::Assistant(_) => "assistant",
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Message::System(s) | Message::User(s) | Message::Assistant(s) => s,
        }
    }
}
