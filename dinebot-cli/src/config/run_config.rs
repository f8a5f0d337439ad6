//! Run config: LLM endpoint, model, file locations and user. Filled from env / .env.
//!
//! Interacts with [`RunOptions`](super::RunOptions) and [`build_bot`](crate::build_bot).

use std::path::PathBuf;

use super::RunOptions;

/// Error type used for config loading and runs.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ORDERS_FILE: &str = "orders.csv";
pub const DEFAULT_USER_ID: &str = "guest";

/// Everything needed to build an [`OrderBot`](dinebot::OrderBot) for a terminal session.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// OpenAI-compatible API base URL, e.g. `https://api.openai.com/v1`.
    pub api_base: String,
    pub api_key: String,
    /// Model name, e.g. `gpt-4o-mini`.
    pub model: String,
    /// Sampling temperature 0–2. Default: unset (use API default).
    pub temperature: Option<f32>,
    /// CSV file placed orders are appended to.
    pub orders_file: PathBuf,
    /// JSON menu file; the built-in catalog when unset.
    pub menu_path: Option<PathBuf>,
    /// SQLite session database; sessions live in memory when unset.
    pub db_path: Option<PathBuf>,
    /// Session key for the conversation.
    pub user_id: String,
    /// Debug logs for node enter/exit and routing.
    pub verbose: bool,
}

impl RunConfig {
    /// Fill config from env vars. Call `dotenv::dotenv().ok()` first to pick up `.env`.
    ///
    /// `OPENAI_API_KEY` required; `OPENAI_API_BASE`, `OPENAI_MODEL`, `ORDERS_FILE`
    /// and `USER_ID` have defaults; `OPENAI_TEMPERATURE`, `MENU_PATH`, `DB_PATH` optional.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "OPENAI_API_KEY is not set; please configure it in .env",
            )
        })?;
        let api_base =
            std::env::var("OPENAI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let temperature = std::env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|s| s.parse().ok());
        let orders_file = std::env::var("ORDERS_FILE")
            .unwrap_or_else(|_| DEFAULT_ORDERS_FILE.to_string())
            .into();
        let menu_path = std::env::var("MENU_PATH").ok().map(PathBuf::from);
        let db_path = std::env::var("DB_PATH").ok().map(PathBuf::from);
        let user_id = std::env::var("USER_ID").unwrap_or_else(|_| DEFAULT_USER_ID.to_string());
        Ok(Self {
            api_base,
            api_key,
            model,
            temperature,
            orders_file,
            menu_path,
            db_path,
            user_id,
            verbose: false,
        })
    }

    /// Apply overrides from `RunOptions`; only set fields override.
    pub fn apply_options(&mut self, options: &RunOptions) {
        if let Some(u) = &options.user_id {
            self.user_id = u.clone();
        }
        if let Some(t) = options.temperature {
            self.temperature = Some(t);
        }
        if let Some(p) = &options.db_path {
            self.db_path = Some(p.clone());
        }
        if let Some(p) = &options.orders_file {
            self.orders_file = p.clone();
        }
        if let Some(p) = &options.menu_path {
            self.menu_path = Some(p.clone());
        }
        if let Some(m) = &options.model {
            self.model = m.clone();
        }
        self.verbose = options.verbose;
    }
}
