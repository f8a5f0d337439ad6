//! State encoding for on-disk checkpoints.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::memory::CheckpointError;

/// Turns a state value into bytes and back. `SqliteSaver` stores the bytes in a BLOB column.
pub trait Serializer<S>: Send + Sync {
    fn serialize(&self, state: &S) -> Result<Vec<u8>, CheckpointError>;
    fn deserialize(&self, bytes: &[u8]) -> Result<S, CheckpointError>;
}

/// serde_json encoding; the order state is plain data so JSON keeps rows readable in `sqlite3`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl<S> Serializer<S> for JsonSerializer
where
    S: Serialize + DeserializeOwned,
{
    fn serialize(&self, state: &S) -> Result<Vec<u8>, CheckpointError> {
        serde_json::to_vec(state).map_err(|e| CheckpointError::Serialization(e.to_string()))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<S, CheckpointError> {
        serde_json::from_slice(bytes).map_err(|e| CheckpointError::Serialization(e.to_string()))
    }
}
