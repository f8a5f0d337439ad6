//! Order state record: conversation, order lines, totals and flow flags.
//!
//! One [`OrderState`] per user flows through the conversation graph. Handlers
//! mutate it and append one assistant message per turn; the classifier reads
//! its flags to pick the next intent.

mod changes;
mod state;

pub use changes::{apply_changes, OrderAction, OrderChange};
pub use state::{calculate_total, OrderItem, OrderState, OrderStatus};
