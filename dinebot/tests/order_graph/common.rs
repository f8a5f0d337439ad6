//! Shared builders for order graph tests.

use std::sync::Arc;

use dinebot::{Checkpointer, Menu, MemoryOrderLog, MockLlm, OrderBot, OrderSink, OrderState};

/// Bot over a scripted LLM and an in-memory order log; returns all three so
/// tests can inspect prompts and logged orders.
pub fn scripted_bot(replies: &[&str]) -> (OrderBot, Arc<MockLlm>, Arc<MemoryOrderLog>) {
    let llm = Arc::new(MockLlm::scripted(replies.iter().copied()));
    let log = Arc::new(MemoryOrderLog::new());
    let bot = OrderBot::new(llm.clone(), Arc::new(Menu::standard()), log.clone(), None)
        .expect("order graph compiles");
    (bot, llm, log)
}

pub fn bot_with(
    replies: &[&str],
    sink: Arc<dyn OrderSink>,
    checkpointer: Arc<dyn Checkpointer<OrderState>>,
) -> OrderBot {
    let llm = Arc::new(MockLlm::scripted(replies.iter().copied()));
    OrderBot::new(llm, Arc::new(Menu::standard()), sink, Some(checkpointer))
        .expect("order graph compiles")
}

/// Classifier reply selecting `label`.
pub fn intent(label: &str) -> String {
    format!(r#"{{"intent": "{}"}}"#, label)
}
