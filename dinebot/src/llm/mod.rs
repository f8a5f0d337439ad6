//! LLM client abstraction used by the classifier and the LLM-backed handlers.
//!
//! Nodes depend on `Box<dyn LlmClient>` / `Arc<dyn LlmClient>` so tests run with
//! `MockLlm` and the binaries plug in `ChatOpenAI`.

mod json;
mod mock;

#[cfg(feature = "openai")]
mod openai;

pub use json::{parse_json_reply, JsonReplyError};
pub use mock::MockLlm;

#[cfg(feature = "openai")]
pub use openai::ChatOpenAI;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;

/// Response from an LLM completion: assistant message text.
///
/// **Interaction**: Returned by `LlmClient::invoke()`; handlers either use the
/// text as the reply or parse it as JSON with [`parse_json_reply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmResponse {
    /// Assistant message content (plain text).
    pub content: String,
}

/// LLM client: given messages, returns assistant text.
///
/// Implementations: `MockLlm` (fixed or scripted replies), `ChatOpenAI`
/// (OpenAI-compatible API, feature `openai`).
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Invoke one completion over the given messages.
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError>;
}
