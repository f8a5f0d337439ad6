//! Run entry points: build a bot from config, run one turn, or run the chat loop.

mod build;
mod repl;

pub use crate::config::Error;
pub use build::{build_bot, build_bot_with_llm};
pub use repl::{run_repl, is_exit_command};

use dinebot::OrderBot;

use crate::config::{RunConfig, RunOptions};

/// Sends one message as `user_id` and returns the bot's reply.
pub async fn run_turn(bot: &OrderBot, user_id: &str, message: &str) -> Result<String, Error> {
    let state = bot.chat(user_id, message).await?;
    Ok(OrderBot::last_reply(&state).to_string())
}

/// Loads `.env`, builds config from env with `options` applied, and runs one turn.
pub async fn run_with_options(message: &str, options: &RunOptions) -> Result<String, Error> {
    dotenv::dotenv().ok();
    let mut config = RunConfig::from_env()?;
    config.apply_options(options);
    let bot = build_bot(&config)?;
    run_turn(&bot, &config.user_id, message).await
}
