use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::intent::Intent;
use crate::llm::LlmClient;
use crate::menu::Menu;
use crate::message::Message;
use crate::order::OrderState;

use super::reply;

pub const NO_SUGGESTION: &str =
    "Sorry, I can't come up with suggestions right now. Would you like to see the menu instead?";

/// Recommends two or three menu items that fit the current order or request.
pub struct SuggestOrderNode {
    llm: Arc<dyn LlmClient>,
    menu: Arc<Menu>,
}

impl SuggestOrderNode {
    pub fn new(llm: Arc<dyn LlmClient>, menu: Arc<Menu>) -> Self {
        Self { llm, menu }
    }

    fn prompt(&self, state: &OrderState) -> String {
        let current = if state.order_items.is_empty() {
            "No items yet".to_string()
        } else {
            state.summary_lines().join("\n")
        };
        format!(
            "The customer has asked for suggestions.\n\nCurrent Order:\n{}\n\nMenu:\n{}\n\nUser Query:\n{}\n\nSuggest 2-3 items from the menu that complement their order or answer their request.",
            current,
            self.menu.prompt_listing(),
            state.last_user_message().unwrap_or_default()
        )
    }
}

#[async_trait]
impl Node<OrderState> for SuggestOrderNode {
    fn id(&self) -> &str {
        Intent::SuggestOrder.as_str()
    }

    async fn run(&self, state: OrderState) -> Result<(OrderState, Next), AgentError> {
        let messages = [
            Message::system("You are a helpful restaurant assistant."),
            Message::user(self.prompt(&state)),
        ];
        let text = match self.llm.invoke(&messages).await {
            Ok(r) => r.content,
            Err(e) => {
                tracing::warn!(error = %e, "suggestion failed");
                NO_SUGGESTION.to_string()
            }
        };
        Ok(reply(state, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;
    use crate::order::OrderItem;

    #[tokio::test]
    async fn replies_with_llm_suggestion() {
        let llm = Arc::new(MockLlm::new("Try the mint margarita with your biryani."));
        let node = SuggestOrderNode::new(llm.clone(), Arc::new(Menu::standard()));
        let mut s = OrderState::new("u");
        s.order_items = vec![OrderItem::new("chicken_biryani", 1)];
        s.push_user("what goes well with this?");
        let (s, _) = node.run(s).await.unwrap();
        assert_eq!(s.last_reply(), Some("Try the mint margarita with your biryani."));

        let prompt = llm.calls()[0][1].content().to_string();
        assert!(prompt.contains("- 1x chicken_biryani (no customizations)"));
        assert!(prompt.contains("User Query:\nwhat goes well with this?"));
    }

    #[tokio::test]
    async fn llm_failure_apologizes() {
        let node = SuggestOrderNode::new(Arc::new(MockLlm::failing("x")), Arc::new(Menu::standard()));
        let (s, _) = node.run(OrderState::new("u")).await.unwrap();
        assert_eq!(s.last_reply(), Some(NO_SUGGESTION));
    }
}
