//! Checkpointer trait and its error type.

use async_trait::async_trait;
use thiserror::Error;

use super::{Checkpoint, CheckpointMetadata, RunnableConfig};

/// Error from a checkpointer operation.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// The config has no thread_id, so there is nothing to key the checkpoint by.
    #[error("thread_id is required")]
    ThreadIdRequired,

    /// State could not be encoded or decoded.
    #[error("serialization: {0}")]
    Serialization(String),

    /// The backing storage failed (I/O, SQLite, ...).
    #[error("storage: {0}")]
    Storage(String),
}

/// Saves and loads per-thread state snapshots.
///
/// **Interaction**: Called by `CompiledStateGraph::invoke` after a run (put) and by
/// `OrderBot` before a turn (get_tuple) to resume a user's session.
#[async_trait]
pub trait Checkpointer<S>: Send + Sync
where
    S: Clone + Send + Sync + 'static,
{
    /// Stores a checkpoint for `config.thread_id`; returns the checkpoint id.
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint<S>,
    ) -> Result<String, CheckpointError>;

    /// Latest checkpoint for `config.thread_id`, if any.
    async fn get_tuple(
        &self,
        config: &RunnableConfig,
    ) -> Result<Option<(Checkpoint<S>, CheckpointMetadata)>, CheckpointError>;
}
