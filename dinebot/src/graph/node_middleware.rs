//! Middleware wrapping every node run (logging, timing, ...).

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use crate::error::AgentError;

use super::Next;

/// Boxed future returned by the inner node call handed to a middleware.
pub type NodeFuture<S> = Pin<Box<dyn Future<Output = Result<(S, Next), AgentError>> + Send>>;

/// The wrapped node call: consumes the state, yields the node's result.
pub type NodeCall<S> = Box<dyn FnOnce(S) -> NodeFuture<S> + Send>;

/// Wraps each `Node::run` during `CompiledStateGraph::invoke`.
///
/// Implementations must call `inner(state)` exactly once to actually run the node,
/// and may inspect or replace the result.
#[async_trait]
pub trait NodeMiddleware<S>: Send + Sync
where
    S: Clone + Send + Sync + 'static,
{
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: NodeCall<S>,
    ) -> Result<(S, Next), AgentError>;
}
