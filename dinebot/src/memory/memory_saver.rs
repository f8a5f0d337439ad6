//! In-memory checkpointer.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Checkpoint, CheckpointError, CheckpointMetadata, Checkpointer, RunnableConfig};

/// Keeps the latest checkpoint of every thread in memory. Lost on restart.
pub struct MemorySaver<S> {
    threads: RwLock<HashMap<String, Checkpoint<S>>>,
}

impl<S> Default for MemorySaver<S> {
    fn default() -> Self {
        Self {
            threads: RwLock::new(HashMap::new()),
        }
    }
}

impl<S> MemorySaver<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no thread has been saved yet.
    pub async fn is_empty(&self) -> bool {
        self.threads.read().await.is_empty()
    }
}

#[async_trait]
impl<S> Checkpointer<S> for MemorySaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint<S>,
    ) -> Result<String, CheckpointError> {
        let thread_id = config
            .thread_id
            .as_ref()
            .ok_or(CheckpointError::ThreadIdRequired)?;
        self.threads
            .write()
            .await
            .insert(thread_id.clone(), checkpoint.clone());
        Ok(checkpoint.id.clone())
    }

    async fn get_tuple(
        &self,
        config: &RunnableConfig,
    ) -> Result<Option<(Checkpoint<S>, CheckpointMetadata)>, CheckpointError> {
        let thread_id = config
            .thread_id
            .as_ref()
            .ok_or(CheckpointError::ThreadIdRequired)?;
        Ok(self
            .threads
            .read()
            .await
            .get(thread_id)
            .map(|cp| (cp.clone(), cp.metadata.clone())))
    }
}
