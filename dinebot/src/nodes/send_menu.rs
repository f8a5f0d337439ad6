use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::intent::Intent;
use crate::menu::Menu;
use crate::order::OrderState;

use super::reply;

/// Sends the rendered menu and remembers that the customer has seen it.
pub struct SendMenuNode {
    menu: Arc<Menu>,
}

impl SendMenuNode {
    pub fn new(menu: Arc<Menu>) -> Self {
        Self { menu }
    }
}

#[async_trait]
impl Node<OrderState> for SendMenuNode {
    fn id(&self) -> &str {
        Intent::SendMenu.as_str()
    }

    async fn run(&self, mut state: OrderState) -> Result<(OrderState, Next), AgentError> {
        state.menu_sent = true;
        tracing::debug!(user = %state.user_id, "menu sent");
        Ok(reply(state, self.menu.render()))
    }
}
