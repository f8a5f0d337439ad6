//! StateGraph compile failure cases on the order state.

use std::collections::HashMap;
use std::sync::Arc;

use dinebot::nodes::{GreetingsNode, TrackOrderNode};
use dinebot::{CompilationError, OrderState, StateGraph, END, START};

fn two_node_graph() -> StateGraph<OrderState> {
    let mut graph = StateGraph::<OrderState>::new();
    graph
        .add_node("greetings", Arc::new(GreetingsNode))
        .add_node("track_order", Arc::new(TrackOrderNode));
    graph
}

#[test]
fn compile_fails_without_start_edge() {
    let mut graph = two_node_graph();
    graph.add_edge("greetings", END);
    assert!(matches!(graph.compile(), Err(CompilationError::MissingStart)));
}

#[test]
fn compile_fails_when_edge_refers_to_unknown_node() {
    let mut graph = two_node_graph();
    graph.add_edge(START, "greetings").add_edge("greetings", "missing");
    match graph.compile() {
        Err(CompilationError::NodeNotFound(id)) => assert_eq!(id, "missing"),
        other => panic!("expected NodeNotFound, got {:?}", other.err()),
    }
}

/// **Scenario**: A conditional edge whose path map names a missing node is rejected.
#[test]
fn compile_fails_on_unknown_route_target() {
    let mut graph = two_node_graph();
    graph.add_edge(START, "greetings");
    let path_map = HashMap::from([("track".to_string(), "send_menu".to_string())]);
    graph.add_conditional_edges("greetings", |_: &OrderState| "track".to_string(), path_map);
    match graph.compile() {
        Err(CompilationError::UnknownRoute { from, target }) => {
            assert_eq!(from, "greetings");
            assert_eq!(target, "send_menu");
        }
        other => panic!("expected UnknownRoute, got {:?}", other.err()),
    }
}

#[test]
fn compile_fails_on_second_edge_from_node() {
    let mut graph = two_node_graph();
    graph
        .add_edge(START, "greetings")
        .add_edge("greetings", "track_order")
        .add_edge("greetings", END);
    match graph.compile() {
        Err(CompilationError::DuplicateEdge(id)) => assert_eq!(id, "greetings"),
        other => panic!("expected DuplicateEdge, got {:?}", other.err()),
    }
}
