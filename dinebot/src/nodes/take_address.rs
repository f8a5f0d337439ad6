//! Take-address node: extracts and validates a delivery address with the LLM.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::intent::Intent;
use crate::llm::{parse_json_reply, LlmClient};
use crate::message::Message;
use crate::order::{OrderState, OrderStatus};

use super::reply;

pub const INCOMPLETE_ADDRESS: &str =
    "I couldn't get a full address. Can you please provide your house number and street name?";
pub const ADDRESS_TROUBLE: &str =
    "Sorry, I had trouble processing that. Can you please provide your address again?";

const SYSTEM_PROMPT: &str = r#"You are a restaurant delivery assistant. Your task is to extract a complete delivery address from the user's message.
A complete Pakistani address might include a street name, house or apartment number, or a nearby landmark. You do not need to look for a state or city.

Rules:
- Always output *only* valid JSON with the keys "final_address" and "address_valid".
- If a complete address is found, set "address_valid" to true and provide the address under "final_address".
- If the address is vague or incomplete (e.g. "my home"), set "address_valid" to false and set "final_address" to an empty string."#;

#[derive(Debug, Deserialize)]
struct AddressReply {
    #[serde(default)]
    final_address: String,
    #[serde(default)]
    address_valid: bool,
}

pub struct TakeAddressNode {
    llm: Arc<dyn LlmClient>,
}

impl TakeAddressNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    async fn extract(&self, text: &str) -> Result<AddressReply, String> {
        let messages = [
            Message::system(SYSTEM_PROMPT),
            Message::user(format!("User Message: {}", text.trim())),
        ];
        let raw = self
            .llm
            .invoke(&messages)
            .await
            .map_err(|e| e.to_string())?
            .content;
        parse_json_reply(&raw).map_err(|e| e.to_string())
    }
}

#[async_trait]
impl Node<OrderState> for TakeAddressNode {
    fn id(&self) -> &str {
        Intent::TakeAddress.as_str()
    }

    async fn run(&self, mut state: OrderState) -> Result<(OrderState, Next), AgentError> {
        let text = state.last_user_message().unwrap_or_default().to_string();
        let parsed = match self.extract(&text).await {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, user = %state.user_id, "address extraction failed");
                state.address_valid = false;
                return Ok(reply(state, ADDRESS_TROUBLE));
            }
        };

        let address = parsed.final_address.trim();
        if !parsed.address_valid || address.is_empty() {
            state.address_valid = false;
            return Ok(reply(state, INCOMPLETE_ADDRESS));
        }

        state.delivery_address = address.to_string();
        state.address_valid = true;
        state.status = OrderStatus::AwaitingConfirmation;
        let text = format!(
            "Got it! Your address is recorded as: {}. Do you want to confirm the order or change anything else?",
            state.delivery_address
        );
        Ok(reply(state, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;

    fn saying(text: &str) -> OrderState {
        let mut s = OrderState::new("u");
        s.push_user(text);
        s
    }

    #[tokio::test]
    async fn valid_address_is_recorded() {
        let llm = MockLlm::new(
            r#"{"final_address": "House 12, Street 4, Gulberg", "address_valid": true}"#,
        );
        let (s, _) = TakeAddressNode::new(Arc::new(llm))
            .run(saying("deliver to house 12 street 4 gulberg"))
            .await
            .unwrap();
        assert_eq!(s.delivery_address, "House 12, Street 4, Gulberg");
        assert!(s.address_valid);
        assert_eq!(s.status, OrderStatus::AwaitingConfirmation);
        assert_eq!(
            s.last_reply(),
            Some("Got it! Your address is recorded as: House 12, Street 4, Gulberg. Do you want to confirm the order or change anything else?")
        );
    }

    /// **Scenario**: A vague address asks for house number and street; nothing is stored.
    #[tokio::test]
    async fn vague_address_is_rejected() {
        let llm = MockLlm::new(r#"{"final_address": "", "address_valid": false}"#);
        let (s, _) = TakeAddressNode::new(Arc::new(llm))
            .run(saying("my home"))
            .await
            .unwrap();
        assert!(!s.has_address());
        assert!(!s.address_valid);
        assert_eq!(s.status, OrderStatus::NotStarted);
        assert_eq!(s.last_reply(), Some(INCOMPLETE_ADDRESS));
    }

    #[tokio::test]
    async fn llm_trouble_asks_again() {
        for llm in [MockLlm::new("House 12?"), MockLlm::failing("down")] {
            let (s, _) = TakeAddressNode::new(Arc::new(llm))
                .run(saying("house 12"))
                .await
                .unwrap();
            assert!(!s.address_valid);
            assert_eq!(s.last_reply(), Some(ADDRESS_TROUBLE));
        }
    }
}
