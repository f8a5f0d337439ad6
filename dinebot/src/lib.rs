//! # dinebot
//!
//! A restaurant ordering assistant built as a small LangGraph-style state
//! graph. One [`OrderState`] per user flows through the graph each turn:
//!
//! ```text
//! START → classify_intent ──route──▶ greetings | send_menu | handle_order | take_address
//!                                    confirm_order | place_order | suggest_order
//!                                    track_order | chit_chat | display_orders → END
//! ```
//!
//! The classifier asks an LLM for one of ten [`Intent`] labels; the router
//! sends the state to the handler of the same name; the handler appends one
//! assistant message. [`OrderBot`] loads and saves the state per user through a
//! [`Checkpointer`].
//!
//! ## Main Modules
//!
//! - [`graph`]: `StateGraph`, `CompiledStateGraph`, `Node`, `Next`, conditional edges.
//! - [`llm`]: `LlmClient` trait, `MockLlm`, and `ChatOpenAI` (feature `openai`).
//! - [`memory`]: per-user checkpoints (`MemorySaver`, `SqliteSaver` with feature `sqlite`).
//! - [`menu`]: the catalog and `Money`.
//! - [`order`]: state record and order-change application.
//! - [`intent`]: intent labels, classifier node, router.
//! - [`nodes`]: the ten handlers.
//! - [`order_log`]: placed-order sinks (CSV file, in-memory).
//! - [`runner`]: `build_order_graph` and `OrderBot`.
//!
//! ## Features
//!
//! - `openai` (default): OpenAI-compatible chat completions via `async-openai`.
//! - `sqlite` (default): sessions persisted in a SQLite file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dinebot::{Menu, MemoryOrderLog, MockLlm, OrderBot};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let bot = OrderBot::new(
//!     Arc::new(MockLlm::new(r#"{"intent": "send_menu"}"#)),
//!     Arc::new(Menu::standard()),
//!     Arc::new(MemoryOrderLog::new()),
//!     None,
//! )
//! .unwrap();
//! let state = bot.chat("guest", "menu please").await.unwrap();
//! println!("{}", OrderBot::last_reply(&state));
//! # }
//! ```

pub mod error;
pub mod graph;
pub mod intent;
pub mod llm;
pub mod memory;
pub mod menu;
pub mod message;
pub mod nodes;
pub mod order;
pub mod order_log;
pub mod runner;

pub use error::AgentError;
pub use graph::{
    CompilationError, CompiledStateGraph, Next, Node, NodeCall, NodeFuture, NodeMiddleware,
    StateGraph, END, START,
};
pub use intent::{route, ClassifyIntentNode, Intent, UnknownIntent, CLASSIFY_INTENT};
#[cfg(feature = "openai")]
pub use llm::ChatOpenAI;
pub use llm::{parse_json_reply, JsonReplyError, LlmClient, LlmResponse, MockLlm};
pub use memory::{
    Checkpoint, CheckpointError, CheckpointMetadata, CheckpointSource, Checkpointer,
    JsonSerializer, MemorySaver, RunnableConfig,
};
#[cfg(feature = "sqlite")]
pub use memory::SqliteSaver;
pub use menu::{Menu, MenuError, MenuItem, Money};
pub use message::Message;
pub use order::{
    apply_changes, calculate_total, OrderAction, OrderChange, OrderItem, OrderState, OrderStatus,
};
pub use order_log::{CsvOrderLog, MemoryOrderLog, OrderLogError, OrderRecord, OrderSink};
pub use runner::{build_order_graph, OrderBot, RunError};
