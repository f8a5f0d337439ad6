//! Routing decision returned by a node after it runs.

/// What the runner does after a node returns.
///
/// `Continue` defers to the graph's edges: a conditional edge from the node is
/// evaluated on the new state, a plain edge is followed, and a node without an
/// outgoing edge ends the run. `Node` and `End` override the edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Next {
    /// Follow the node's outgoing edge (plain or conditional).
    Continue,
    /// Jump to the node with this id.
    Node(String),
    /// Stop the run and return the current state.
    End,
}
