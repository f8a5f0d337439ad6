//! Checkpoint and metadata types.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Metadata for a single checkpoint (source, step, created_at).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointMetadata {
    pub source: CheckpointSource,
    /// Number of node steps the run that produced this checkpoint took.
    pub step: u64,
    #[serde(skip)]
    pub created_at: Option<SystemTime>,
}

/// Source of the checkpoint (input, loop, update).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckpointSource {
    Input,
    Loop,
    Update,
}

/// One checkpoint: state snapshot + id/ts.
///
/// Stored by a Checkpointer keyed by thread_id. `channel_values` is the graph state S.
///
/// **Interaction**: Produced by graph execution; consumed by `Checkpointer::put`,
/// returned by `get_tuple`.
#[derive(Debug, Clone)]
pub struct Checkpoint<S> {
    pub id: String,
    pub ts: String,
    pub channel_values: S,
    pub metadata: CheckpointMetadata,
}

impl<S> Checkpoint<S> {
    /// Creates a checkpoint from current state for saving after invoke. Uses current time for id/ts.
    pub fn from_state(state: S, source: CheckpointSource, step: u64) -> Self {
        let now = SystemTime::now();
        let ts = format!(
            "{}",
            now.duration_since(SystemTime::UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0)
        );
        let id = format!("{}-{}", ts, step);
        Self {
            id,
            ts,
            channel_values: state,
            metadata: CheckpointMetadata {
                source,
                step,
                created_at: Some(now),
            },
        }
    }
}
