//! OpenAI Chat Completions client implementing `LlmClient` (ChatOpenAI).
//!
//! Works against any OpenAI-compatible endpoint: set the base URL with
//! `with_config` (e.g. Gemini's `/v1beta/openai` endpoint or a local server).
//!
//! **Interaction**: Implements `LlmClient`; used by the classifier and the
//! LLM-backed handler nodes. Depends on `async_openai` (feature `openai`).

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
    Client,
};

/// OpenAI Chat Completions client implementing `LlmClient`.
///
/// Uses `OPENAI_API_KEY` from the environment by default; or provide
/// config via `ChatOpenAI::with_config`.
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl ChatOpenAI {
    /// Build client with default config (API key from `OPENAI_API_KEY` env).
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
            temperature: None,
        }
    }

    /// Build client with custom config (e.g. custom API key or base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
            temperature: None,
        }
    }

    /// Set temperature (0–2). Lower values are more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn messages_to_request(messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| match m {
                Message::System(s) => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(s.as_str()),
                ),
                Message::User(s) => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(s.as_str()),
                ),
                Message::Assistant(s) => {
                    ChatCompletionRequestMessage::Assistant((s.as_str()).into())
                }
            })
            .collect()
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(Self::messages_to_request(messages));
        if let Some(t) = self.temperature {
            args.temperature(t);
        }

        let request = args.build().map_err(|e| {
            AgentError::ExecutionFailed(format!("OpenAI request build failed: {}", e))
        })?;

        tracing::debug!(model = %self.model, messages = messages.len(), "chat completion request");
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AgentError::ExecutionFailed(format!("OpenAI API error: {}", e)))?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            AgentError::ExecutionFailed("OpenAI returned no choices".to_string())
        })?;

        Ok(LlmResponse {
            content: choice.message.content.unwrap_or_default(),
        })
    }
}
