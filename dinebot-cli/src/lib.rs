//! dinebot-cli library: config loading and run logic for the `dinebot` binary.
//!
//! Reads OpenAI and file settings from `.env`, builds the order graph and runs
//! turns, either one-shot or as an interactive loop.
//!
//! ## Usage
//!
//! ```rust,no_run,ignore
//! let reply = dinebot_cli::run_with_options("show me the menu", &RunOptions::default()).await?;
//! println!("{}", reply);
//! ```

mod config;
mod middleware;
mod run;

pub use config::{Error, RunConfig, RunOptions};
pub use dinebot::{OrderBot, OrderState};
pub use middleware::{LoggingMiddleware, WithNodeLogging};
pub use run::{
    build_bot, build_bot_with_llm, is_exit_command, run_repl, run_turn, run_with_options,
};

#[cfg(test)]
mod tests;
