//! Handle-order node: turns free-form order requests into order changes.
//!
//! The LLM sees the menu and the current order and answers with
//! `{"items": [{action, item, quantity, customizations}], "bot_message": "..."}`.
//! Changes are applied through [`apply_changes`], which re-checks every item
//! against the menu, so a hallucinated item never reaches the order.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::intent::Intent;
use crate::llm::{parse_json_reply, LlmClient};
use crate::menu::Menu;
use crate::message::Message;
use crate::order::{apply_changes, OrderChange, OrderState};

use super::reply;

pub const DEFAULT_ACK: &str = "Okay, got it!";
pub const NOT_UNDERSTOOD: &str =
    "Sorry, I couldn't understand your order. Could you please repeat it clearly?";

const RULES: &str = r#"Rules:
- Analyze the user's message carefully.
- Always output valid JSON with exactly two keys:
  {
    "items": [
      {
        "action": "add" | "remove" | "update" | "clear",
        "item": "string",
        "quantity": int,
        "customizations": ["string", ...]
      }
    ],
    "bot_message": "string"
  }
- Only include items that exist in the menu, using the menu key as "item".
- If a mentioned item is NOT in the menu, do NOT include it in "items", but mention it in "bot_message".
- For "remove" and "update", only include items that exist in the customer's current order.
  If not, just mention the issue in "bot_message".
- Use "clear" (with an empty "item") only when the customer wants to cancel everything.
- If quantity is not mentioned, default to 1.
- "bot_message" should summarize all valid actions and also mention invalid requests.
- Write the bot_message in the same language as the user (English, Roman Urdu, etc)."#;

#[derive(Debug, Deserialize)]
struct OrderReply {
    #[serde(default)]
    items: Vec<OrderChange>,
    #[serde(default)]
    bot_message: Option<String>,
}

/// LLM-backed order editor.
pub struct HandleOrderNode {
    llm: Arc<dyn LlmClient>,
    menu: Arc<Menu>,
}

impl HandleOrderNode {
    pub fn new(llm: Arc<dyn LlmClient>, menu: Arc<Menu>) -> Self {
        Self { llm, menu }
    }

    fn system_prompt(&self, state: &OrderState) -> String {
        let current = if state.order_items.is_empty() {
            "None".to_string()
        } else {
            state.short_lines().join("\n")
        };
        format!(
            "You are an expert restaurant ordering assistant.\n\nThe current restaurant menu is:\n{}\n\nThe customer's current order is:\n{}\n\n{}",
            self.menu.prompt_listing(),
            current,
            RULES
        )
    }

    async fn parse_order(&self, state: &OrderState) -> Result<OrderReply, String> {
        let user_text = state.last_user_message().unwrap_or_default();
        let messages = [
            Message::system(self.system_prompt(state)),
            Message::user(format!("User Message: {}", user_text)),
        ];
        let raw = self
            .llm
            .invoke(&messages)
            .await
            .map_err(|e| e.to_string())?
            .content;
        tracing::debug!(raw = %raw, "order parse reply");
        parse_json_reply(&raw).map_err(|e| e.to_string())
    }
}

#[async_trait]
impl Node<OrderState> for HandleOrderNode {
    fn id(&self) -> &str {
        Intent::HandleOrder.as_str()
    }

    async fn run(&self, mut state: OrderState) -> Result<(OrderState, Next), AgentError> {
        state.is_confirmed = false;
        let parsed = match self.parse_order(&state).await {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, user = %state.user_id, "could not parse order");
                return Ok(reply(state, NOT_UNDERSTOOD));
            }
        };
        apply_changes(&mut state, &parsed.items, &self.menu);
        let text = parsed
            .bot_message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ACK.to_string());
        Ok(reply(state, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;
    use crate::menu::Money;
    use crate::order::OrderItem;

    fn node(llm: MockLlm) -> HandleOrderNode {
        HandleOrderNode::new(Arc::new(llm), Arc::new(Menu::standard()))
    }

    fn saying(text: &str) -> OrderState {
        let mut s = OrderState::new("u");
        s.push_user(text);
        s
    }

    /// **Scenario**: Valid items are added, the off-menu one is skipped, bot_message is the reply.
    #[tokio::test]
    async fn applies_changes_and_replies_with_bot_message() {
        let llm = MockLlm::new(
            r#"```json
{"items": [
  {"action": "add", "item": "chicken_biryani", "quantity": 2, "customizations": ["extra spicy"]},
  {"action": "add", "item": "sushi", "quantity": 1, "customizations": []}
 ],
 "bot_message": "Added 2 chicken biryani. Sorry, we don't serve sushi."}
```"#,
        );
        let (s, next) = node(llm)
            .run(saying("2 spicy biryani and a sushi"))
            .await
            .unwrap();
        assert_eq!(next, Next::Continue);
        assert_eq!(
            s.order_items,
            vec![OrderItem::new("chicken_biryani", 2).with_customizations(["extra spicy"])]
        );
        assert_eq!(s.total_cost, Money::from_cents(1400));
        assert_eq!(
            s.last_reply(),
            Some("Added 2 chicken biryani. Sorry, we don't serve sushi.")
        );
    }

    #[tokio::test]
    async fn missing_bot_message_uses_default_ack() {
        let llm = MockLlm::new(r#"{"items": [{"action": "add", "item": "tea"}]}"#);
        let (s, _) = node(llm).run(saying("chai")).await.unwrap();
        assert_eq!(s.order_items, vec![OrderItem::new("tea", 1)]);
        assert_eq!(s.last_reply(), Some(DEFAULT_ACK));
    }

    /// **Scenario**: A string quantity on one item does not discard its siblings or the reply.
    #[tokio::test]
    async fn string_quantity_keeps_sibling_items() {
        let llm = MockLlm::new(
            r#"{"items": [
  {"action": "add", "item": "nihari", "quantity": "2", "customizations": null},
  {"action": "add", "item": "soda", "quantity": 1, "customizations": []}
 ],
 "bot_message": "Two nihari and a soda coming up."}"#,
        );
        let (s, _) = node(llm).run(saying("2 nihari and a soda")).await.unwrap();
        assert_eq!(
            s.order_items,
            vec![OrderItem::new("nihari", 2), OrderItem::new("soda", 1)]
        );
        assert_eq!(s.last_reply(), Some("Two nihari and a soda coming up."));
    }

    /// **Scenario**: Unparsable reply or LLM error leaves the order untouched but resets confirmation.
    #[tokio::test]
    async fn failure_apologizes_and_keeps_order() {
        for llm in [MockLlm::new("no idea"), MockLlm::failing("rate limited")] {
            let mut s = saying("uh");
            s.order_items = vec![OrderItem::new("fries", 1)];
            s.is_confirmed = true;
            let (s, _) = node(llm).run(s).await.unwrap();
            assert_eq!(s.order_items, vec![OrderItem::new("fries", 1)]);
            assert!(!s.is_confirmed);
            assert_eq!(s.last_reply(), Some(NOT_UNDERSTOOD));
        }
    }

    #[tokio::test]
    async fn prompt_shows_menu_current_order_and_message() {
        let llm = Arc::new(MockLlm::new(r#"{"items": [], "bot_message": "ok"}"#));
        let node = HandleOrderNode::new(llm.clone(), Arc::new(Menu::standard()));
        let mut s = saying("one more nihari");
        s.order_items = vec![OrderItem::new("nihari", 1)];
        node.run(s).await.unwrap();

        let call = &llm.calls()[0];
        assert!(call[0].content().contains("- nihari: $10.00 |"));
        assert!(call[0].content().contains("The customer's current order is:\n- nihari (x1)"));
        assert_eq!(call[1].content(), "User Message: one more nihari");
    }
}
