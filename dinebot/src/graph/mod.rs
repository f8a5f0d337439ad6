//! State graph: nodes, plain and conditional edges, compile and invoke.
//!
//! Add nodes and edges (`START`/`END` sentinels), route with
//! `add_conditional_edges`, compile, then invoke with state. The order bot's
//! conversation turn is one such graph: classify → route → handler → END.

mod compile_error;
mod compiled;
mod logging;
mod next;
mod node;
mod node_middleware;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_route,
};
pub use next::Next;
pub use node::Node;
pub use node_middleware::{NodeCall, NodeFuture, NodeMiddleware};
pub use state_graph::{RouterFn, StateGraph, END, START};
