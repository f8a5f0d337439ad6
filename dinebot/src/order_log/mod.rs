//! Persistence of placed orders.
//!
//! `place_order` hands an [`OrderRecord`] to an [`OrderSink`]. The production
//! sink is [`CsvOrderLog`], an append-only CSV file; [`MemoryOrderLog`] keeps
//! records in memory for tests and dry runs.

mod csv_log;
mod memory;

pub use csv_log::{CsvOrderLog, CSV_HEADER};
pub use memory::MemoryOrderLog;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::menu::Money;
use crate::order::{OrderState, OrderStatus};

/// Writing an order record failed.
#[derive(Debug, Error)]
pub enum OrderLogError {
    #[error("order log I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("order log unavailable: {0}")]
    Unavailable(String),
}

/// One placed order, flattened to a single row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_number: u32,
    pub user_id: String,
    /// ISO-8601, seconds precision, local time.
    pub timestamp: String,
    /// `2x chicken_biryani (extra spicy); 1x soda`
    pub items: String,
    pub total_cost: Money,
    pub delivery_address: String,
    pub status: OrderStatus,
}

impl OrderRecord {
    /// Snapshot of `state` stamped with `order_number` and the current time.
    pub fn from_state(state: &OrderState, order_number: u32) -> Self {
        Self::from_state_at(state, order_number, Local::now())
    }

    pub fn from_state_at(state: &OrderState, order_number: u32, at: DateTime<Local>) -> Self {
        let items = state
            .order_items
            .iter()
            .map(|o| o.describe())
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            order_number,
            user_id: state.user_id.clone(),
            timestamp: at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            items,
            total_cost: state.total_cost,
            delivery_address: state.delivery_address.clone(),
            status: state.status,
        }
    }
}

/// Destination for placed orders.
///
/// **Interaction**: Used by the `place_order` node; `OrderBot` wires in
/// `CsvOrderLog` (binaries) or `MemoryOrderLog` (tests).
#[async_trait]
pub trait OrderSink: Send + Sync {
    async fn append(&self, record: &OrderRecord) -> Result<(), OrderLogError>;
}
