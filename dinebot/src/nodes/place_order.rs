//! Place-order node: assigns an order number and writes the order to the log.

use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::intent::Intent;
use crate::order::{OrderState, OrderStatus};
use crate::order_log::{OrderRecord, OrderSink};

use super::reply;

pub const EMPTY_ORDER: &str =
    "Your order is empty. Please add some items before placing the order.";
pub const NEED_ADDRESS: &str =
    "I still need your delivery address before placing the order. Where should we deliver?";
pub const NOT_CONFIRMED: &str =
    "Please review and confirm your order first. Say \"confirm\" to see the summary.";
pub const NOT_SAVED: &str =
    "Sorry, something went wrong while placing your order. Please try confirming again.";

/// Places the order: random four-digit order number, status `completed`, one log row.
///
/// Only a confirmed order is placed; placing clears the confirmation so a repeated
/// "yes" does not log the order twice.
pub struct PlaceOrderNode {
    sink: Arc<dyn OrderSink>,
}

impl PlaceOrderNode {
    pub fn new(sink: Arc<dyn OrderSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl Node<OrderState> for PlaceOrderNode {
    fn id(&self) -> &str {
        Intent::PlaceOrder.as_str()
    }

    async fn run(&self, mut state: OrderState) -> Result<(OrderState, Next), AgentError> {
        if state.order_items.is_empty() {
            return Ok(reply(state, EMPTY_ORDER));
        }
        if !state.has_address() {
            return Ok(reply(state, NEED_ADDRESS));
        }
        if !state.is_confirmed {
            return Ok(reply(state, NOT_CONFIRMED));
        }

        let order_number: u32 = rand::thread_rng().gen_range(1000..=9999);
        let mut placed = state.clone();
        placed.status = OrderStatus::Completed;
        placed.order_number = Some(order_number);
        placed.is_confirmed = false;

        if let Err(e) = self
            .sink
            .append(&OrderRecord::from_state(&placed, order_number))
            .await
        {
            tracing::error!(error = %e, user = %state.user_id, "failed to log order");
            return Ok(reply(state, NOT_SAVED));
        }
        tracing::info!(order_number, user = %state.user_id, "order placed");
        state = placed;
        let text = format!(
            "Thank you! Your order #{} has been placed successfully.",
            order_number
        );
        Ok(reply(state, text))
    }
}
