//! Graph compilation error.
//!
//! Returned by `StateGraph::compile` when edges reference unknown nodes, the
//! entry point is ambiguous, or a node has more than one outgoing transition.

use thiserror::Error;

/// Error when compiling a state graph.
#[derive(Debug, Error)]
pub enum CompilationError {
    /// A node id in an edge was not registered via `add_node` (and is not START/END).
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No edge has from_id == START, or more than one such edge.
    #[error("graph must have exactly one edge from START")]
    MissingStart,

    /// A node has more than one outgoing transition (plain edges and/or conditional edges).
    #[error("node {0} has more than one outgoing edge")]
    DuplicateEdge(String),

    /// A conditional edge's path map points at a node that does not exist.
    #[error("conditional edge from {from} routes to unknown node {target}")]
    UnknownRoute { from: String, target: String },
}
