//! Builds an [`OrderBot`] from [`RunConfig`]: LLM, menu, order log and session store.

use std::sync::Arc;

use async_openai::config::OpenAIConfig;
use dinebot::{
    build_order_graph, ChatOpenAI, Checkpointer, CsvOrderLog, LlmClient, Menu, OrderBot,
    OrderState,
};

use crate::config::RunConfig;
use crate::middleware::WithNodeLogging;

use super::Error;

/// Bot talking to the OpenAI-compatible endpoint of `config`.
pub fn build_bot(config: &RunConfig) -> Result<OrderBot, Error> {
    let openai_config = OpenAIConfig::new()
        .with_api_base(&config.api_base)
        .with_api_key(config.api_key.clone());
    let mut llm = ChatOpenAI::with_config(openai_config, config.model.clone());
    if let Some(t) = config.temperature {
        llm = llm.with_temperature(t);
    }
    build_bot_with_llm(config, Arc::new(llm))
}

/// Bot over any LLM client; file locations, sessions and logging follow `config`.
pub fn build_bot_with_llm(config: &RunConfig, llm: Arc<dyn LlmClient>) -> Result<OrderBot, Error> {
    let menu = match &config.menu_path {
        Some(path) => Menu::from_json_file(path)?,
        None => Menu::standard(),
    };
    let sink = Arc::new(CsvOrderLog::new(&config.orders_file));
    let graph = build_order_graph(llm, Arc::new(menu), sink);
    let graph = if config.verbose {
        graph.with_node_logging()
    } else {
        graph
    };
    let bot = OrderBot::from_graph(graph, open_sessions(config)?)?;
    Ok(bot)
}

#[cfg(feature = "sqlite")]
fn open_sessions(config: &RunConfig) -> Result<Option<Arc<dyn Checkpointer<OrderState>>>, Error> {
    match &config.db_path {
        Some(path) => {
            tracing::debug!(db = %path.display(), "opening session database");
            let saver = dinebot::SqliteSaver::<OrderState>::new(path)?;
            Ok(Some(Arc::new(saver)))
        }
        None => Ok(None),
    }
}

#[cfg(not(feature = "sqlite"))]
fn open_sessions(config: &RunConfig) -> Result<Option<Arc<dyn Checkpointer<OrderState>>>, Error> {
    if config.db_path.is_some() {
        tracing::warn!("built without the sqlite feature; sessions are kept in memory");
    }
    Ok(None)
}
