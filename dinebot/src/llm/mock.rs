//! Mock LLM for tests and offline runs.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;

use super::{LlmClient, LlmResponse};

enum Behavior {
    /// Same reply on every call.
    Fixed(String),
    /// Replies popped in order; an exhausted queue fails the call.
    Scripted(Mutex<VecDeque<String>>),
    /// Every call fails.
    Failing(String),
}

/// Mock LLM: fixed reply, scripted sequence of replies, or always failing.
///
/// Records the message lists it was called with so tests can inspect prompts.
pub struct MockLlm {
    behavior: Behavior,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always replies with `content`.
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fixed(content.into()))
    }

    /// Replies with each item of `replies` in turn, one per call.
    pub fn scripted<I, T>(replies: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::with_behavior(Behavior::Scripted(Mutex::new(
            replies.into_iter().map(Into::into).collect(),
        )))
    }

    /// Every call fails with `AgentError::ExecutionFailed(reason)`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Failing(reason.into()))
    }

    /// Message lists passed to `invoke`, oldest first.
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of times `invoke` was called.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(messages.to_vec());
        }
        let content = match &self.behavior {
            Behavior::Fixed(s) => s.clone(),
            Behavior::Scripted(queue) => queue
                .lock()
                .ok()
                .and_then(|mut q| q.pop_front())
                .ok_or_else(|| AgentError::ExecutionFailed("mock script exhausted".into()))?,
            Behavior::Failing(reason) => return Err(AgentError::ExecutionFailed(reason.clone())),
        };
        Ok(LlmResponse { content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_reply_repeats_and_records_calls() {
        let llm = MockLlm::new("hello");
        for _ in 0..2 {
            let r = llm.invoke(&[Message::user("hi")]).await.unwrap();
            assert_eq!(r.content, "hello");
        }
        assert_eq!(llm.call_count(), 2);
        assert_eq!(llm.calls()[0], vec![Message::user("hi")]);
    }

    /// **Scenario**: Scripted replies come out in order, then the mock fails.
    #[tokio::test]
    async fn scripted_replies_in_order_then_exhausted() {
        let llm = MockLlm::scripted(["one", "two"]);
        assert_eq!(llm.invoke(&[]).await.unwrap().content, "one");
        assert_eq!(llm.invoke(&[]).await.unwrap().content, "two");
        assert!(llm.invoke(&[]).await.is_err());
    }

    #[tokio::test]
    async fn failing_mock_returns_execution_failed() {
        let llm = MockLlm::failing("quota");
        match llm.invoke(&[]).await {
            Err(AgentError::ExecutionFailed(m)) => assert_eq!(m, "quota"),
            other => panic!("expected ExecutionFailed, got {:?}", other),
        }
    }
}
