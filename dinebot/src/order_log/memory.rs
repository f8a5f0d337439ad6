//! In-memory order sink.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{OrderLogError, OrderRecord, OrderSink};

/// Keeps appended records in a vector. Cloning the records out is cheap enough for tests.
#[derive(Debug, Default)]
pub struct MemoryOrderLog {
    records: RwLock<Vec<OrderRecord>>,
}

impl MemoryOrderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<OrderRecord> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl OrderSink for MemoryOrderLog {
    async fn append(&self, record: &OrderRecord) -> Result<(), OrderLogError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }
}
