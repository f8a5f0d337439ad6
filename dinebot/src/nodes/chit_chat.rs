use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::intent::Intent;
use crate::llm::LlmClient;
use crate::message::Message;
use crate::order::OrderState;

use super::reply;

pub const CHAT_UNAVAILABLE: &str =
    "Sorry, I didn't quite catch that. Is there anything I can help you order?";

const SYSTEM_PROMPT: &str = "You are a friendly restaurant assistant.\nAnswer casual questions about the restaurant, staff, timings, and general chit-chat.";

/// Small talk.
pub struct ChitChatNode {
    llm: Arc<dyn LlmClient>,
}

impl ChitChatNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<OrderState> for ChitChatNode {
    fn id(&self) -> &str {
        Intent::ChitChat.as_str()
    }

    async fn run(&self, state: OrderState) -> Result<(OrderState, Next), AgentError> {
        let messages = [
            Message::system(SYSTEM_PROMPT),
            Message::user(state.last_user_message().unwrap_or_default()),
        ];
        let text = match self.llm.invoke(&messages).await {
            Ok(r) => r.content,
            Err(e) => {
                tracing::warn!(error = %e, "chit-chat reply failed");
                CHAT_UNAVAILABLE.to_string()
            }
        };
        Ok(reply(state, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;

    #[tokio::test]
    async fn answers_small_talk() {
        let llm = Arc::new(MockLlm::new("We're open 12pm to midnight!"));
        let mut s = OrderState::new("u");
        s.push_user("when do you close?");
        let (s, _) = ChitChatNode::new(llm.clone()).run(s).await.unwrap();
        assert_eq!(s.last_reply(), Some("We're open 12pm to midnight!"));
        assert_eq!(llm.calls()[0][1], Message::user("when do you close?"));
    }

    #[tokio::test]
    async fn llm_failure_apologizes() {
        let mut s = OrderState::new("u");
        s.push_user("hey");
        let (s, _) = ChitChatNode::new(Arc::new(MockLlm::failing("x"))).run(s).await.unwrap();
        assert_eq!(s.last_reply(), Some(CHAT_UNAVAILABLE));
        assert_eq!(s.messages.len(), 2);
    }
}
