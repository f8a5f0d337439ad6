use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::intent::Intent;
use crate::order::{OrderState, OrderStatus};

use super::reply;

pub const NOTHING_TO_CONFIRM: &str =
    "Your order is empty. Please add some items before confirming.";

/// Shows the final summary and arms the confirmation flag.
#[derive(Debug, Default)]
pub struct ConfirmOrderNode;

#[async_trait]
impl Node<OrderState> for ConfirmOrderNode {
    fn id(&self) -> &str {
        Intent::ConfirmOrder.as_str()
    }

    async fn run(&self, mut state: OrderState) -> Result<(OrderState, Next), AgentError> {
        if state.order_items.is_empty() {
            return Ok(reply(state, NOTHING_TO_CONFIRM));
        }
        let text = format!(
            "Here is your final order:\nItems:\n{}\nTotal: {}\nDelivering to: {}\nPlease confirm to place your order.",
            state.short_lines().join("\n"),
            state.total_cost,
            state.delivery_address
        );
        state.is_confirmed = true;
        state.status = OrderStatus::AwaitingConfirmation;
        Ok(reply(state, text))
    }
}
