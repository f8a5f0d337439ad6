//! Compiled state graph: immutable, supports invoke only.
//!
//! Built by `StateGraph::compile` or `compile_with_checkpointer`. Holds nodes,
//! the entry node and each node's outgoing transition. When a checkpointer is
//! set and `config.thread_id` is provided, the final state is saved after invoke.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::AgentError;
use crate::memory::{Checkpoint, CheckpointSource, Checkpointer, RunnableConfig};

use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_route,
};
use super::node_middleware::{NodeFuture, NodeMiddleware};
use super::state_graph::{Transition, END};
use super::{Next, Node};

/// Compiled graph: immutable structure, supports invoke only.
///
/// Runs from the entry node; after each node resolves the next step from the
/// node's returned `Next` and its outgoing transition.
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(super) entry: String,
    pub(super) transitions: HashMap<String, Transition<S>>,
    pub(super) checkpointer: Option<Arc<dyn Checkpointer<S>>>,
    pub(super) middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    pub(super) recursion_limit: usize,
}

impl<S> Clone for CompiledStateGraph<S> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            entry: self.entry.clone(),
            transitions: self.transitions.clone(),
            checkpointer: self.checkpointer.clone(),
            middleware: self.middleware.clone(),
            recursion_limit: self.recursion_limit,
        }
    }
}

/// Where the run goes after a node.
enum Step {
    Goto(String),
    Stop,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Runs the graph with the given state until a node or edge reaches `END`.
    ///
    /// - `Next::Continue`: follow the node's conditional or plain edge; end if it has none.
    /// - `Next::Node(id)`: run the node with that id next.
    /// - `Next::End`: stop and return current state.
    ///
    /// When `config` has `thread_id` and the graph was compiled with a checkpointer,
    /// the final state is saved after the run.
    pub async fn invoke(&self, state: S, config: Option<RunnableConfig>) -> Result<S, AgentError> {
        log_graph_start();
        match self.run_loop(state).await {
            Ok((state, steps)) => {
                self.save_checkpoint(&state, &config, steps).await?;
                log_graph_complete(steps);
                Ok(state)
            }
            Err(e) => {
                log_graph_error(&e);
                Err(e)
            }
        }
    }

    async fn run_loop(&self, mut state: S) -> Result<(S, usize), AgentError> {
        let mut current_id = self.entry.clone();
        let mut steps = 0usize;
        loop {
            if steps >= self.recursion_limit {
                return Err(AgentError::RecursionLimit(self.recursion_limit));
            }
            steps += 1;

            let node = self
                .nodes
                .get(&current_id)
                .cloned()
                .ok_or_else(|| AgentError::NodeNotFound(current_id.clone()))?;

            log_node_start(&current_id);
            let (new_state, next) = if let Some(middleware) = &self.middleware {
                middleware
                    .around_run(
                        &current_id,
                        state,
                        Box::new(move |s: S| -> NodeFuture<S> {
                            Box::pin(async move { node.run(s).await })
                        }),
                    )
                    .await?
            } else {
                node.run(state).await?
            };
            log_node_complete(&current_id, &next);
            state = new_state;

            match self.resolve(&current_id, next, &state)? {
                Step::Stop => return Ok((state, steps)),
                Step::Goto(id) => {
                    log_route(&current_id, &id);
                    current_id = id;
                }
            }
        }
    }

    fn resolve(&self, current_id: &str, next: Next, state: &S) -> Result<Step, AgentError> {
        let target = match next {
            Next::End => return Ok(Step::Stop),
            Next::Node(id) => id,
            Next::Continue => match self.transitions.get(current_id) {
                None => return Ok(Step::Stop),
                Some(Transition::Edge(to)) => to.clone(),
                Some(Transition::Conditional { router, path_map }) => {
                    let key = router(state);
                    if path_map.is_empty() {
                        key
                    } else {
                        path_map
                            .get(&key)
                            .cloned()
                            .ok_or(AgentError::NodeNotFound(key))?
                    }
                }
            },
        };
        if target == END {
            return Ok(Step::Stop);
        }
        if !self.nodes.contains_key(&target) {
            return Err(AgentError::NodeNotFound(target));
        }
        Ok(Step::Goto(target))
    }

    async fn save_checkpoint(
        &self,
        state: &S,
        config: &Option<RunnableConfig>,
        steps: usize,
    ) -> Result<(), AgentError> {
        if let (Some(cp), Some(cfg)) = (&self.checkpointer, config) {
            if cfg.thread_id.is_some() {
                let checkpoint =
                    Checkpoint::from_state(state.clone(), CheckpointSource::Update, steps as u64);
                cp.put(cfg, &checkpoint)
                    .await
                    .map_err(|e| AgentError::Persistence(e.to_string()))?;
            }
        }
        Ok(())
    }

    /// Id of the node the graph starts at.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Returns the checkpointer the graph was compiled with, if any.
    pub fn checkpointer(&self) -> Option<&Arc<dyn Checkpointer<S>>> {
        self.checkpointer.as_ref()
    }
}
