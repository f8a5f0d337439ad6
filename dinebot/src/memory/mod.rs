//! # Memory: per-user session checkpoints
//!
//! A [`Checkpointer`] stores a snapshot of the graph state after each invoke,
//! keyed by `thread_id`. The order bot uses the user id as thread id, so a
//! user's conversation (messages, order items, flags) survives across turns
//! and, with [`SqliteSaver`], across process restarts.
//!
//! | Type            | Persistence | Use case               | Feature  |
//! |-----------------|-------------|------------------------|----------|
//! | [`MemorySaver`] | In-memory   | Dev, tests, server     | —        |
//! | [`SqliteSaver`] | SQLite file | CLI sessions on disk   | `sqlite` |
//!
//! Use with [`StateGraph::compile_with_checkpointer`](crate::graph::StateGraph::compile_with_checkpointer).

mod checkpoint;
mod checkpointer;
mod config;
mod memory_saver;
mod serializer;

#[cfg(feature = "sqlite")]
mod sqlite_saver;

pub use checkpoint::{Checkpoint, CheckpointMetadata, CheckpointSource};
pub use checkpointer::{CheckpointError, Checkpointer};
pub use config::RunnableConfig;
pub use memory_saver::MemorySaver;
pub use serializer::{JsonSerializer, Serializer};

#[cfg(feature = "sqlite")]
pub use sqlite_saver::SqliteSaver;
