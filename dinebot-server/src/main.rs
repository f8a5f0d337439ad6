//! dinebot HTTP server.
//!
//! Configure via env as the CLI: OPENAI_API_KEY, OPENAI_API_BASE, OPENAI_MODEL,
//! ORDERS_FILE, MENU_PATH, DB_PATH; plus LISTEN (default `0.0.0.0:8124`) and
//! LOG_FILE. Load .env with dotenv.

use std::io::{self, Write};

use dinebot_cli::{build_bot, RunConfig};
use dinebot_server::{app, AppState};
use tracing::info;

const DEFAULT_LISTEN: &str = "0.0.0.0:8124";

/// Load .env from current directory; if not found, try the parent (workspace root when run from the crate dir).
fn load_dotenv() {
    if dotenv::dotenv().is_ok() {
        return;
    }
    if let Ok(cwd) = std::env::current_dir() {
        if let Some(parent) = cwd.parent() {
            let env_path = parent.join(".env");
            if env_path.is_file() {
                let _ = dotenv::from_path(env_path);
            }
        }
    }
}

/// Writer that drops ANSI escape sequences (`ESC [ ... letter`) so file logs are plain text.
struct StripAnsiWriter<W> {
    inner: W,
    in_escape: bool,
}

impl<W: Write> StripAnsiWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            in_escape: false,
        }
    }
}

impl<W: Write> Write for StripAnsiWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut plain = Vec::with_capacity(buf.len());
        for &b in buf {
            if self.in_escape {
                if (0x40..=0x7e).contains(&b) && b != b'[' {
                    self.in_escape = false;
                }
            } else if b == 0x1b {
                self.in_escape = true;
            } else {
                plain.push(b);
            }
        }
        self.inner.write_all(&plain)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Tracing to stdout; if `LOG_FILE` is set, also to that file (append, no ANSI).
fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::Layer;

    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,dinebot=debug,dinebot_server=debug"))
    };

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_filter(filter());
    let registry = tracing_subscriber::registry().with(stdout_layer);

    if let Ok(path) = std::env::var("LOG_FILE") {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::sync::Mutex::new(StripAnsiWriter::new(file)))
            .with_ansi(false)
            .with_target(true)
            .with_filter(filter());
        registry.with(file_layer).init();
        info!(path = %path, "logging to file");
    } else {
        registry.init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    load_dotenv();
    init_tracing()?;

    let config = RunConfig::from_env()?;
    info!(
        model = %config.model,
        api_base = %config.api_base,
        orders_file = %config.orders_file.display(),
        db_path = ?config.db_path,
        "config loaded"
    );
    let bot = build_bot(&config)?;

    let listen = std::env::var("LISTEN").unwrap_or_else(|_| DEFAULT_LISTEN.to_string());
    info!("listening on http://{}", listen);
    let listener = tokio::net::TcpListener::bind(&listen).await?;
    axum::serve(listener, app(AppState::new(bot))).await?;
    Ok(())
}
