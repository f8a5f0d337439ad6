//! State graph: nodes + explicit edges (from → to) + conditional edges.
//!
//! Add nodes with `add_node`, wire them with `add_edge(from, to)` using
//! `START` and `END` for entry/exit, branch with `add_conditional_edges`,
//! then `compile` or `compile_with_checkpointer` to get a `CompiledStateGraph`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::node::Node;
use crate::graph::node_middleware::NodeMiddleware;
use crate::memory::Checkpointer;

/// Sentinel for graph entry: use as `from_id` in `add_edge(START, first_node_id)`.
pub const START: &str = "__start__";

/// Sentinel for graph exit: use as `to_id` in `add_edge(last_node_id, END)`.
pub const END: &str = "__end__";

/// Steps a single invoke may take before it fails with `AgentError::RecursionLimit`.
pub const DEFAULT_RECURSION_LIMIT: usize = 25;

/// Router for a conditional edge: reads the state after the source node ran and
/// returns a path key.
pub type RouterFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// Outgoing transition of a node in a compiled graph.
pub(crate) enum Transition<S> {
    /// Always go to this node id (or `END`).
    Edge(String),
    /// Evaluate `router` and look the key up in `path_map`; an empty map means
    /// the key is the target node id itself.
    Conditional {
        router: RouterFn<S>,
        path_map: HashMap<String, String>,
    },
}

impl<S> Clone for Transition<S> {
    fn clone(&self) -> Self {
        match self {
            Transition::Edge(to) => Transition::Edge(to.clone()),
            Transition::Conditional { router, path_map } => Transition::Conditional {
                router: Arc::clone(router),
                path_map: path_map.clone(),
            },
        }
    }
}

/// State graph: nodes plus explicit and conditional edges.
///
/// Generic over state type `S`. Build with `add_node` / `add_edge` /
/// `add_conditional_edges`, then `compile()` to obtain an executable graph.
///
/// **Interaction**: Accepts `Arc<dyn Node<S>>`; produces `CompiledStateGraph<S>`.
pub struct StateGraph<S> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Plain edges (from_id, to_id).
    edges: Vec<(String, String)>,
    /// Conditional edges (source, router, path map).
    conditional: Vec<(String, RouterFn<S>, HashMap<String, String>)>,
    middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    recursion_limit: usize,
}

impl<S> Default for StateGraph<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            conditional: Vec::new(),
            middleware: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Attaches node middleware; the compiled graph wraps every node run with it.
    pub fn with_middleware(self, middleware: Arc<dyn NodeMiddleware<S>>) -> Self {
        Self {
            middleware: Some(middleware),
            ..self
        }
    }

    /// Overrides the maximum number of node steps per invoke.
    pub fn with_recursion_limit(self, limit: usize) -> Self {
        Self {
            recursion_limit: limit,
            ..self
        }
    }

    /// Adds a node; id must be unique. Replaces if same id.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        self.nodes.insert(id.into(), node);
        self
    }

    /// Adds an edge from `from_id` to `to_id`.
    ///
    /// Use `START` for graph entry and `END` for graph exit. Both ids (except
    /// START/END) must be registered via `add_node` before `compile()`.
    pub fn add_edge(&mut self, from_id: impl Into<String>, to_id: impl Into<String>) -> &mut Self {
        self.edges.push((from_id.into(), to_id.into()));
        self
    }

    /// Adds a conditional edge from `source`.
    ///
    /// After `source` returns `Next::Continue`, `router` is called with the new
    /// state; its key is mapped through `path_map` to the next node id (or `END`).
    /// With an empty `path_map` the key is used as the node id directly.
    pub fn add_conditional_edges<F>(
        &mut self,
        source: impl Into<String>,
        router: F,
        path_map: HashMap<String, String>,
    ) -> &mut Self
    where
        F: Fn(&S) -> String + Send + Sync + 'static,
    {
        self.conditional
            .push((source.into(), Arc::new(router), path_map));
        self
    }

    /// Builds the executable graph after validating node ids and edges.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.compile_internal(None)
    }

    /// Builds the executable graph with a checkpointer; `invoke` saves the final
    /// state under `config.thread_id`.
    pub fn compile_with_checkpointer(
        self,
        checkpointer: Arc<dyn Checkpointer<S>>,
    ) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.compile_internal(Some(checkpointer))
    }

    fn compile_internal(
        self,
        checkpointer: Option<Arc<dyn Checkpointer<S>>>,
    ) -> Result<CompiledStateGraph<S>, CompilationError> {
        for (from, to) in &self.edges {
            if from != START && !self.nodes.contains_key(from) {
                return Err(CompilationError::NodeNotFound(from.clone()));
            }
            if to != END && !self.nodes.contains_key(to) {
                return Err(CompilationError::NodeNotFound(to.clone()));
            }
        }

        let start_edges: Vec<_> = self
            .edges
            .iter()
            .filter(|(f, _)| f == START)
            .map(|(_, t)| t.clone())
            .collect();
        let entry = match start_edges.as_slice() {
            [only] if only != END => only.clone(),
            _ => return Err(CompilationError::MissingStart),
        };

        let mut transitions: HashMap<String, Transition<S>> = HashMap::new();
        let mut seen_sources = HashSet::new();

        for (from, to) in self.edges.into_iter().filter(|(f, _)| f != START) {
            if !seen_sources.insert(from.clone()) {
                return Err(CompilationError::DuplicateEdge(from));
            }
            transitions.insert(from, Transition::Edge(to));
        }

        for (source, router, path_map) in self.conditional {
            if !self.nodes.contains_key(&source) {
                return Err(CompilationError::NodeNotFound(source));
            }
            if !seen_sources.insert(source.clone()) {
                return Err(CompilationError::DuplicateEdge(source));
            }
            for target in path_map.values() {
                if target != END && !self.nodes.contains_key(target) {
                    return Err(CompilationError::UnknownRoute {
                        from: source.clone(),
                        target: target.clone(),
                    });
                }
            }
            transitions.insert(source, Transition::Conditional { router, path_map });
        }

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            entry,
            transitions,
            checkpointer,
            middleware: self.middleware,
            recursion_limit: self.recursion_limit,
        })
    }
}
