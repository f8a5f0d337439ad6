//! Order bot binary: chat with the restaurant assistant in the terminal.

use clap::Parser;
use dinebot_cli::{build_bot, run_repl, run_turn, RunConfig, RunOptions};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dinebot")]
#[command(about = "Restaurant ordering assistant: order food in a chat")]
struct Args {
    /// Send one message, print the reply and exit
    #[arg(short, long, value_name = "TEXT")]
    message: Option<String>,

    /// Session key (default: USER_ID or "guest")
    #[arg(short, long, value_name = "ID")]
    user: Option<String>,

    /// SQLite database for sessions (default: DB_PATH; in memory when unset)
    #[arg(long, value_name = "PATH")]
    db: Option<std::path::PathBuf>,

    /// CSV file placed orders are appended to (default: ORDERS_FILE or orders.csv)
    #[arg(long, value_name = "PATH")]
    orders_file: Option<std::path::PathBuf>,

    /// JSON menu file (default: MENU_PATH or the built-in menu)
    #[arg(long, value_name = "PATH")]
    menu: Option<std::path::PathBuf>,

    /// Model name (default: OPENAI_MODEL or gpt-4o-mini)
    #[arg(long, value_name = "NAME")]
    model: Option<String>,

    /// Sampling temperature 0-2
    #[arg(long)]
    temperature: Option<f32>,

    /// Log node enter/exit and routing to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn options(&self) -> RunOptions {
        RunOptions {
            user_id: self.user.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            db_path: self.db.clone(),
            orders_file: self.orders_file.clone(),
            menu_path: self.menu.clone(),
            verbose: self.verbose,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "dinebot=debug,dinebot_cli=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    dotenv::dotenv().ok();
    init_tracing(args.verbose);

    let mut config = RunConfig::from_env()?;
    config.apply_options(&args.options());
    let bot = build_bot(&config)?;

    if let Some(message) = &args.message {
        let reply = run_turn(&bot, &config.user_id, message).await?;
        println!("{}", reply);
        return Ok(());
    }

    println!("dinebot: chatting as {} (type 'exit' to quit)", config.user_id);
    let stdin = BufReader::new(tokio::io::stdin());
    run_repl(&bot, &config.user_id, stdin, tokio::io::stdout()).await?;
    Ok(())
}
