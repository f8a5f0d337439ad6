//! Logging utilities for graph execution.
//!
//! Emits `tracing` events for graph start/finish, node execution and errors.
//! Binaries decide where they go by installing a subscriber.

use crate::error::AgentError;
use crate::graph::Next;

/// Log node execution start.
pub fn log_node_start(node_id: &str) {
    tracing::debug!(node_id = node_id, "Starting node execution");
}

/// Log node execution completion.
pub fn log_node_complete(node_id: &str, next: &Next) {
    tracing::debug!(node_id = node_id, ?next, "Node execution complete");
}

/// Log the routing decision taken after a node.
pub fn log_route(from: &str, to: &str) {
    tracing::debug!(from = from, to = to, "Routing");
}

/// Log graph execution start.
pub fn log_graph_start() {
    tracing::info!("Starting graph execution");
}

/// Log graph execution completion.
pub fn log_graph_complete(steps: usize) {
    tracing::info!(steps = steps, "Graph execution complete");
}

/// Log graph execution error.
pub fn log_graph_error(error: &AgentError) {
    tracing::error!(%error, "Graph execution error");
}
