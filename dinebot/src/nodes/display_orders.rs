use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::intent::Intent;
use crate::order::OrderState;

use super::reply;

pub const NO_ITEMS: &str = "You don’t have any items in your order yet.";

/// Lists the current order with customizations and the running total.
#[derive(Debug, Default)]
pub struct DisplayOrdersNode;

#[async_trait]
impl Node<OrderState> for DisplayOrdersNode {
    fn id(&self) -> &str {
        Intent::DisplayOrders.as_str()
    }

    async fn run(&self, state: OrderState) -> Result<(OrderState, Next), AgentError> {
        if state.order_items.is_empty() {
            return Ok(reply(state, NO_ITEMS));
        }
        let text = format!(
            "Here’s your current order:\n{}\n\nTotal: {}",
            state.summary_lines().join("\n"),
            state.total_cost
        );
        Ok(reply(state, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::Money;
    use crate::order::OrderItem;

    #[tokio::test]
    async fn empty_order() {
        let (s, _) = DisplayOrdersNode.run(OrderState::new("u")).await.unwrap();
        assert_eq!(s.last_reply(), Some(NO_ITEMS));
    }

    #[tokio::test]
    async fn lists_items_and_total() {
        let mut s = OrderState::new("u");
        s.order_items = vec![
            OrderItem::new("chicken_biryani", 2).with_customizations(["extra spicy"]),
            OrderItem::new("soda", 1),
        ];
        s.total_cost = Money::from_cents(1600);
        let (s, _) = DisplayOrdersNode.run(s).await.unwrap();
        assert_eq!(
            s.last_reply(),
            Some(
                "Here’s your current order:\n- 2x chicken_biryani (extra spicy)\n- 1x soda (no customizations)\n\nTotal: $16.00"
            )
        );
    }
}
