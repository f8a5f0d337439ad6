//! Classify-intent node: asks the LLM which handler should answer this turn.
//!
//! The prompt carries the last six messages plus the flow flags (status, menu
//! sent, confirmed, address provided) so the model can follow the ordering
//! flow greetings → menu → order → address → confirm → place → track.
//!
//! **Interaction**: Implements `Node<OrderState>`; first node of the order
//! graph. Writes `OrderState.intent`, read by [`route`](super::route).

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::{parse_json_reply, LlmClient};
use crate::message::Message;
use crate::order::OrderState;

use super::Intent;

/// Node id of the classifier.
pub const CLASSIFY_INTENT: &str = "classify_intent";

/// Messages of context given to the classifier (three exchanges).
const CONTEXT_MESSAGES: usize = 6;

/// Intent used whenever classification fails.
const FALLBACK: Intent = Intent::HandleOrder;

const SYSTEM_PROMPT: &str = r#"You are an intent classification assistant for a restaurant ordering chatbot.
Classify the conversation into exactly ONE of the following intents, providing a single lowercase string as the value for the "intent" key:

- greetings
- send_menu
- handle_order
- take_address
- confirm_order
- place_order
- suggest_order
- track_order
- chit_chat
- display_orders

Conversation Flow:
greetings -> send_menu -> handle_order -> take_address -> confirm_order -> place_order -> track_order

Rules:
- If the user is making small talk, asking about the bot, or chatting casually, choose "chit_chat".
- If the user asks about their order status, use "track_order".
- If the user wants to see their current order (e.g. "show me my order", "what did I order?"), choose "display_orders".
- If the user asks for the menu, or is trying to order but hasn't seen the menu yet, choose "send_menu".
- If the user is ordering or modifying food items, choose "handle_order".
- If the user wants recommendations, choose "suggest_order".
- If the user is finishing an order and Address Provided = "no", choose "take_address".
- If the user is finishing an order, Address Provided = "yes" and Is Confirmed = "no", choose "confirm_order".
- If the user is confirming (e.g. "yes", "confirm") AND Is Confirmed = "yes", choose "place_order".

Respond with a JSON object only, for example: {"intent": "send_menu"}"#;

#[derive(Debug, Deserialize)]
struct IntentReply {
    #[serde(default)]
    intent: String,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Builds the user-side classification prompt from the state.
fn classification_prompt(state: &OrderState) -> String {
    format!(
        "Conversation (last 3 exchanges):\n{}\n\nCurrent Status: {}\nMenu Sent?: {}\nIs Confirmed?: {}\nAddress Provided?: {}",
        state.recent_transcript(CONTEXT_MESSAGES),
        state.status,
        yes_no(state.menu_sent),
        yes_no(state.is_confirmed),
        yes_no(state.has_address()),
    )
}

/// LLM-backed intent classifier.
pub struct ClassifyIntentNode {
    llm: Arc<dyn LlmClient>,
}

impl ClassifyIntentNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    async fn classify(&self, state: &OrderState) -> Intent {
        let messages = [
            Message::system(SYSTEM_PROMPT),
            Message::user(classification_prompt(state)),
        ];
        let raw = match self.llm.invoke(&messages).await {
            Ok(r) => r.content,
            Err(e) => {
                tracing::warn!(error = %e, "intent classification failed, defaulting to {}", FALLBACK);
                return FALLBACK;
            }
        };
        let reply: IntentReply = match parse_json_reply(&raw) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, raw = %raw, "unparsable intent reply, defaulting to {}", FALLBACK);
                return FALLBACK;
            }
        };
        reply.intent.parse().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "defaulting to {}", FALLBACK);
            FALLBACK
        })
    }
}

#[async_trait]
impl Node<OrderState> for ClassifyIntentNode {
    fn id(&self) -> &str {
        CLASSIFY_INTENT
    }

    async fn run(&self, state: OrderState) -> Result<(OrderState, Next), AgentError> {
        if state.messages.is_empty() {
            return Ok((state, Next::Continue));
        }
        let intent = self.classify(&state).await;
        tracing::debug!(intent = %intent, user = %state.user_id, "classified intent");
        let mut state = state;
        state.intent = Some(intent);
        Ok((state, Next::Continue))
    }
}
