//! Order bot runner: builds the conversation graph and runs one turn per message.
//!
//! The graph is `START → classify_intent → (route) → handler → END`. Every
//! call to [`OrderBot::chat`] loads the user's latest state from the
//! checkpointer (or starts a fresh one), appends the user message, runs the
//! graph and saves the result under the user id. Turns of the same user run
//! one at a time; different users run concurrently.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::AgentError;
use crate::graph::{CompilationError, CompiledStateGraph, StateGraph, END, START};
use crate::intent::{route, ClassifyIntentNode, Intent, CLASSIFY_INTENT};
use crate::llm::LlmClient;
use crate::memory::{CheckpointError, Checkpointer, MemorySaver, RunnableConfig};
use crate::menu::Menu;
use crate::nodes::{
    ChitChatNode, ConfirmOrderNode, DisplayOrdersNode, GreetingsNode, HandleOrderNode,
    PlaceOrderNode, SendMenuNode, SuggestOrderNode, TakeAddressNode, TrackOrderNode,
};
use crate::order::OrderState;
use crate::order_log::OrderSink;

/// Error type for [`OrderBot`] turns.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("compilation failed: {0}")]
    Compilation(#[from] CompilationError),
    #[error("checkpoint error: {0}")]
    Checkpoint(#[from] CheckpointError),
    #[error("execution failed: {0}")]
    Execution(#[from] AgentError),
    #[error("message is empty")]
    EmptyMessage,
}

/// Builds the order conversation graph (uncompiled, so callers can add middleware).
///
/// Node ids: `classify_intent` plus one handler per [`Intent`], named after the label.
pub fn build_order_graph(
    llm: Arc<dyn LlmClient>,
    menu: Arc<Menu>,
    sink: Arc<dyn OrderSink>,
) -> StateGraph<OrderState> {
    let mut graph = StateGraph::<OrderState>::new();
    graph
        .add_node(CLASSIFY_INTENT, Arc::new(ClassifyIntentNode::new(llm.clone())))
        .add_node(Intent::Greetings.as_str(), Arc::new(GreetingsNode))
        .add_node(Intent::SendMenu.as_str(), Arc::new(SendMenuNode::new(menu.clone())))
        .add_node(
            Intent::HandleOrder.as_str(),
            Arc::new(HandleOrderNode::new(llm.clone(), menu.clone())),
        )
        .add_node(Intent::TakeAddress.as_str(), Arc::new(TakeAddressNode::new(llm.clone())))
        .add_node(Intent::ConfirmOrder.as_str(), Arc::new(ConfirmOrderNode))
        .add_node(Intent::PlaceOrder.as_str(), Arc::new(PlaceOrderNode::new(sink)))
        .add_node(
            Intent::SuggestOrder.as_str(),
            Arc::new(SuggestOrderNode::new(llm.clone(), menu)),
        )
        .add_node(Intent::TrackOrder.as_str(), Arc::new(TrackOrderNode))
        .add_node(Intent::ChitChat.as_str(), Arc::new(ChitChatNode::new(llm)))
        .add_node(Intent::DisplayOrders.as_str(), Arc::new(DisplayOrdersNode))
        .add_edge(START, CLASSIFY_INTENT);

    let path_map: HashMap<String, String> = Intent::ALL
        .iter()
        .map(|i| (i.as_str().to_string(), i.as_str().to_string()))
        .collect();
    graph.add_conditional_edges(CLASSIFY_INTENT, |s: &OrderState| route(s).to_string(), path_map);
    for intent in Intent::ALL {
        graph.add_edge(intent.as_str(), END);
    }
    graph
}

/// Runs conversation turns and keeps one session per user.
///
/// **Interaction**: Used by the `dinebot` CLI and the HTTP server. Holds the
/// compiled graph and the checkpointer the graph saves into.
pub struct OrderBot {
    compiled: CompiledStateGraph<OrderState>,
    checkpointer: Arc<dyn Checkpointer<OrderState>>,
    /// One lock per user id, held from loading the session to saving it.
    turn_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl OrderBot {
    /// Standard graph with the given collaborators; sessions are kept in memory
    /// when `checkpointer` is `None`.
    pub fn new(
        llm: Arc<dyn LlmClient>,
        menu: Arc<Menu>,
        sink: Arc<dyn OrderSink>,
        checkpointer: Option<Arc<dyn Checkpointer<OrderState>>>,
    ) -> Result<Self, RunError> {
        Self::from_graph(build_order_graph(llm, menu, sink), checkpointer)
    }

    /// Compiles a prepared graph (e.g. with logging middleware attached).
    pub fn from_graph(
        graph: StateGraph<OrderState>,
        checkpointer: Option<Arc<dyn Checkpointer<OrderState>>>,
    ) -> Result<Self, RunError> {
        let checkpointer: Arc<dyn Checkpointer<OrderState>> =
            checkpointer.unwrap_or_else(|| Arc::new(MemorySaver::<OrderState>::new()));
        let compiled = graph.compile_with_checkpointer(Arc::clone(&checkpointer))?;
        Ok(Self {
            compiled,
            checkpointer,
            turn_locks: Mutex::new(HashMap::new()),
        })
    }

    async fn turn_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.turn_locks.lock().await;
        Arc::clone(locks.entry(user_id.to_string()).or_default())
    }

    /// Latest saved state of `user_id`, if the user has talked to the bot before.
    pub async fn session(&self, user_id: &str) -> Result<Option<OrderState>, RunError> {
        let config = RunnableConfig::for_user(user_id);
        let saved = self.checkpointer.get_tuple(&config).await?;
        Ok(saved.map(|(cp, _)| cp.channel_values))
    }

    /// Runs one turn: the user's `text` in, the updated state (with the bot's reply) out.
    pub async fn chat(&self, user_id: &str, text: &str) -> Result<OrderState, RunError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RunError::EmptyMessage);
        }
        let lock = self.turn_lock(user_id).await;
        let _turn = lock.lock().await;

        let mut state = self
            .session(user_id)
            .await?
            .unwrap_or_else(|| OrderState::new(user_id));
        state.push_user(text);

        let state = self
            .compiled
            .invoke(state, Some(RunnableConfig::for_user(user_id)))
            .await?;
        tracing::debug!(
            user = %user_id,
            intent = ?state.intent,
            status = %state.status,
            "turn complete"
        );
        Ok(state)
    }

    /// The bot's reply of the turn that produced `state`.
    pub fn last_reply(state: &OrderState) -> &str {
        state.last_reply().unwrap_or_default()
    }
}
