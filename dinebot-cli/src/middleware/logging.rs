//! Logging middleware that traces node enter/exit around each node run.

use std::time::Instant;

use async_trait::async_trait;

use dinebot::{AgentError, Next, NodeCall, NodeMiddleware, OrderState};

/// Middleware that logs node enter/exit (with the classified intent and
/// elapsed time) at debug level.
pub struct LoggingMiddleware;

#[async_trait]
impl NodeMiddleware<OrderState> for LoggingMiddleware {
    async fn around_run(
        &self,
        node_id: &str,
        state: OrderState,
        inner: NodeCall<OrderState>,
    ) -> Result<(OrderState, Next), AgentError> {
        tracing::debug!(node = node_id, user = %state.user_id, "enter node");
        let started = Instant::now();
        let result = inner(state).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok((s, next)) => tracing::debug!(
                node = node_id,
                next = ?next,
                intent = ?s.intent,
                elapsed_ms,
                "exit node"
            ),
            Err(e) => tracing::debug!(node = node_id, error = %e, elapsed_ms, "node failed"),
        }
        result
    }
}
