use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::intent::Intent;
use crate::order::OrderState;

use super::reply;

/// Reports the order status.
#[derive(Debug, Default)]
pub struct TrackOrderNode;

#[async_trait]
impl Node<OrderState> for TrackOrderNode {
    fn id(&self) -> &str {
        Intent::TrackOrder.as_str()
    }

    async fn run(&self, state: OrderState) -> Result<(OrderState, Next), AgentError> {
        let text = format!("Your order status is: **{}**.", state.status);
        Ok(reply(state, text))
    }
}
