//! Agent execution error types.
//!
//! Returned by `Node::run` and `CompiledStateGraph::invoke` when a step fails.

use thiserror::Error;

/// Agent execution error.
///
/// Returned by a node when a step fails, or by the graph runner when routing
/// cannot proceed. Handlers that call the LLM usually recover by replying with
/// an apology instead of surfacing `ExecutionFailed`.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. LLM call failed).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// A router or node asked to continue at a node id the graph does not have.
    #[error("node not found at runtime: {0}")]
    NodeNotFound(String),

    /// The run took more steps than the graph's recursion limit allows.
    #[error("recursion limit of {0} steps reached without hitting END")]
    RecursionLimit(usize),

    /// Saving state or an order record failed.
    #[error("persistence failed: {0}")]
    Persistence(String),
}
