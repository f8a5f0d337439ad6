//! SQLite-backed checkpointer (feature `sqlite`).
//!
//! One row per thread: `put` replaces the thread's previous checkpoint, so the
//! table holds only the latest session state of each user. rusqlite is
//! synchronous, so calls run on tokio's blocking pool.

use std::marker::PhantomData;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{
    Checkpoint, CheckpointError, CheckpointMetadata, CheckpointSource, Checkpointer,
    JsonSerializer, RunnableConfig, Serializer,
};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS checkpoints (
    thread_id     TEXT    NOT NULL,
    checkpoint_id TEXT    NOT NULL,
    ts            TEXT    NOT NULL,
    step          INTEGER NOT NULL,
    source        TEXT    NOT NULL,
    state         BLOB    NOT NULL,
    PRIMARY KEY (thread_id, checkpoint_id)
)";

/// Persists checkpoints to a SQLite file so sessions survive restarts.
pub struct SqliteSaver<S> {
    conn: Arc<Mutex<Connection>>,
    serializer: JsonSerializer,
    _state: PhantomData<fn() -> S>,
}

fn storage(e: impl std::fmt::Display) -> CheckpointError {
    CheckpointError::Storage(e.to_string())
}

fn source_label(source: CheckpointSource) -> &'static str {
    match source {
        CheckpointSource::Input => "input",
        CheckpointSource::Loop => "loop",
        CheckpointSource::Update => "update",
    }
}

fn parse_source(label: &str) -> CheckpointSource {
    match label {
        "input" => CheckpointSource::Input,
        "loop" => CheckpointSource::Loop,
        _ => CheckpointSource::Update,
    }
}

impl<S> SqliteSaver<S> {
    /// Opens (or creates) the database at `path` and ensures the table exists.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, CheckpointError> {
        let conn = Connection::open(path).map_err(storage)?;
        conn.execute_batch(SCHEMA).map_err(storage)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            serializer: JsonSerializer,
            _state: PhantomData,
        })
    }
}

#[async_trait]
impl<S> Checkpointer<S> for SqliteSaver<S>
where
    S: Clone + Send + Sync + Serialize + DeserializeOwned + 'static,
{
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint<S>,
    ) -> Result<String, CheckpointError> {
        let thread_id = config
            .thread_id
            .clone()
            .ok_or(CheckpointError::ThreadIdRequired)?;
        let bytes = self.serializer.serialize(&checkpoint.channel_values)?;
        let id = checkpoint.id.clone();
        let ts = checkpoint.ts.clone();
        let step = checkpoint.metadata.step as i64;
        let source = source_label(checkpoint.metadata.source);
        let conn = Arc::clone(&self.conn);

        let saved_id = id.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock().map_err(storage)?;
            let tx = conn.transaction().map_err(storage)?;
            tx.execute(
                "DELETE FROM checkpoints WHERE thread_id = ?1",
                params![thread_id],
            )
            .map_err(storage)?;
            tx.execute(
                "INSERT INTO checkpoints
                     (thread_id, checkpoint_id, ts, step, source, state)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![thread_id, id, ts, step, source, bytes],
            )
            .map_err(storage)?;
            tx.commit().map_err(storage)?;
            Ok::<_, CheckpointError>(())
        })
        .await
        .map_err(storage)??;
        Ok(saved_id)
    }

    async fn get_tuple(
        &self,
        config: &RunnableConfig,
    ) -> Result<Option<(Checkpoint<S>, CheckpointMetadata)>, CheckpointError> {
        let thread_id = config
            .thread_id
            .clone()
            .ok_or(CheckpointError::ThreadIdRequired)?;
        let conn = Arc::clone(&self.conn);

        let row = tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(storage)?;
            conn.query_row(
                "SELECT checkpoint_id, ts, step, source, state FROM checkpoints
                 WHERE thread_id = ?1 ORDER BY rowid DESC LIMIT 1",
                params![thread_id],
                |r| {
                    Ok((
                        r.get::<_, String>(0)?,
                        r.get::<_, String>(1)?,
                        r.get::<_, i64>(2)?,
                        r.get::<_, String>(3)?,
                        r.get::<_, Vec<u8>>(4)?,
                    ))
                },
            )
            .optional()
            .map_err(storage)
        })
        .await
        .map_err(storage)??;

        let Some((id, ts, step, source, bytes)) = row else {
            return Ok(None);
        };
        let state: S = self.serializer.deserialize(&bytes)?;
        let metadata = CheckpointMetadata {
            source: parse_source(&source),
            step: step.max(0) as u64,
            created_at: None,
        };
        let checkpoint = Checkpoint {
            id,
            ts,
            channel_values: state,
            metadata: metadata.clone(),
        };
        Ok(Some((checkpoint, metadata)))
    }
}
