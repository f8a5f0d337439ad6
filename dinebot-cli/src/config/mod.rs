//! Configuration for running the order bot.
//!
//! Re-exports [`RunConfig`], [`RunOptions`] and config [`Error`].

mod run_config;
mod run_options;

pub use run_config::{Error, RunConfig};
pub use run_options::RunOptions;
