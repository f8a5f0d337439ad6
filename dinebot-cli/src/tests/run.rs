//! Unit tests for bot building, single turns and the chat loop, all over `MockLlm`.

use std::path::PathBuf;
use std::sync::Arc;

use dinebot::nodes::GREETING;
use dinebot::MockLlm;

use crate::config::RunConfig;
use crate::run::{build_bot_with_llm, is_exit_command, run_repl, run_turn};

fn config_in(dir: &std::path::Path) -> RunConfig {
    RunConfig {
        api_base: "http://localhost:9/v1".into(),
        api_key: "test".into(),
        model: "mock".into(),
        temperature: None,
        orders_file: dir.join("orders.csv"),
        menu_path: None,
        db_path: None,
        user_id: "guest".into(),
        verbose: false,
    }
}

#[test]
fn exit_commands() {
    assert!(is_exit_command("exit"));
    assert!(is_exit_command("  QUIT "));
    assert!(!is_exit_command("exit please"));
    assert!(!is_exit_command(""));
}

#[tokio::test]
async fn run_turn_returns_reply() {
    let dir = tempfile::tempdir().unwrap();
    let llm = Arc::new(MockLlm::new(r#"{"intent": "greetings"}"#));
    let bot = build_bot_with_llm(&config_in(dir.path()), llm).unwrap();
    let reply = run_turn(&bot, "guest", "hello").await.unwrap();
    assert_eq!(reply, GREETING);
}

/// **Scenario**: The loop answers each non-blank line and stops at "quit".
#[tokio::test]
async fn repl_answers_until_quit() {
    let dir = tempfile::tempdir().unwrap();
    let llm = Arc::new(MockLlm::new(r#"{"intent": "track_order"}"#));
    let bot = build_bot_with_llm(&config_in(dir.path()), llm.clone()).unwrap();

    let input: &[u8] = b"where is it\n\nstatus?\nquit\nnever read\n";
    let mut output: Vec<u8> = Vec::new();
    let turns = run_repl(&bot, "guest", input, &mut output).await.unwrap();

    assert_eq!(turns, 2);
    assert_eq!(llm.call_count(), 2);
    let text = String::from_utf8(output).unwrap();
    assert_eq!(
        text.matches("Bot: Your order status is: **not_started**.").count(),
        2
    );
    assert!(text.ends_with("Goodbye!\n"));
}

/// **Scenario**: A custom menu file is used for the menu reply.
#[tokio::test]
async fn menu_path_loads_custom_menu() {
    let dir = tempfile::tempdir().unwrap();
    let menu_path: PathBuf = dir.path().join("menu.json");
    std::fs::write(
        &menu_path,
        r#"{"items": [{"key": "daal", "category": "mains", "price": 4.5, "description": "lentils", "customizations": []}]}"#,
    )
    .unwrap();
    let mut config = config_in(dir.path());
    config.menu_path = Some(menu_path);

    let llm = Arc::new(MockLlm::new(r#"{"intent": "send_menu"}"#));
    let bot = build_bot_with_llm(&config, llm).unwrap();
    let reply = run_turn(&bot, "guest", "menu").await.unwrap();
    assert!(reply.contains("- Daal — $4.50"));
    assert!(!reply.contains("Biryani"));
}

#[tokio::test]
async fn missing_menu_file_fails_to_build() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.menu_path = Some(dir.path().join("absent.json"));
    let llm = Arc::new(MockLlm::new("{}"));
    assert!(build_bot_with_llm(&config, llm).is_err());
}

/// **Scenario**: With a database path the session survives a rebuilt bot.
#[cfg(feature = "sqlite")]
#[tokio::test]
async fn db_path_persists_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.db_path = Some(dir.path().join("sessions.db"));

    let llm = Arc::new(MockLlm::new(r#"{"intent": "greetings"}"#));
    {
        let bot = build_bot_with_llm(&config, llm.clone()).unwrap();
        run_turn(&bot, "guest", "hi").await.unwrap();
    }
    let bot = build_bot_with_llm(&config, llm).unwrap();
    let session = bot.session("guest").await.unwrap().expect("session");
    assert_eq!(session.messages.len(), 2);
}
