//! Extension trait for fluent API: attach node logging middleware before compile.
//!
//! Interacts with [`StateGraph`](dinebot::StateGraph), [`OrderState`](dinebot::OrderState)
//! and [`LoggingMiddleware`](super::LoggingMiddleware).

use std::sync::Arc;

use dinebot::{OrderState, StateGraph};

use super::logging::LoggingMiddleware;

/// Returns the same graph with `LoggingMiddleware` attached. Chain with `OrderBot::from_graph`.
pub trait WithNodeLogging {
    fn with_node_logging(self) -> Self;
}

impl WithNodeLogging for StateGraph<OrderState> {
    fn with_node_logging(self) -> Self {
        self.with_middleware(Arc::new(LoggingMiddleware))
    }
}
