use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::intent::Intent;
use crate::order::{OrderState, OrderStatus};

use super::reply;

pub const GREETING: &str = "What would you like to do?\n1) Order\n2) Track";

/// Greets the customer with the two main choices.
#[derive(Debug, Default)]
pub struct GreetingsNode;

#[async_trait]
impl Node<OrderState> for GreetingsNode {
    fn id(&self) -> &str {
        Intent::Greetings.as_str()
    }

    async fn run(&self, mut state: OrderState) -> Result<(OrderState, Next), AgentError> {
        state.status = OrderStatus::Greeted;
        Ok(reply(state, GREETING))
    }
}
