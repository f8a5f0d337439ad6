//! Optional overrides for a run (CLI args or programmatic).
//!
//! Used by [`RunConfig::apply_options`](super::RunConfig::apply_options).

use std::path::PathBuf;

/// Optional overrides: all fields are optional; only set fields override the
/// env-based config. `verbose` always wins.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub user_id: Option<String>,
    pub model: Option<String>,
    /// Override sampling temperature (0–2).
    pub temperature: Option<f32>,
    pub db_path: Option<PathBuf>,
    pub orders_file: Option<PathBuf>,
    pub menu_path: Option<PathBuf>,
    pub verbose: bool,
}
