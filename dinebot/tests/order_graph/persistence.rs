//! Sessions in SQLite and placed orders in the CSV log.

use std::sync::Arc;

use dinebot::order_log::CSV_HEADER;
use dinebot::{CsvOrderLog, MemorySaver, OrderBot, OrderItem, OrderState, SqliteSaver};

use crate::common::{bot_with, intent};

/// **Scenario**: A new bot on the same database continues the user's session.
#[tokio::test]
async fn sqlite_session_survives_new_bot() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("sessions.db");
    let orders = dir.path().join("orders.csv");
    let add = r#"{"items": [{"action": "add", "item": "fries", "quantity": 2}], "bot_message": "Two fries."}"#;

    {
        let first = [intent("handle_order"), add.to_string()];
        let first: Vec<&str> = first.iter().map(String::as_str).collect();
        let bot = bot_with(
            &first,
            Arc::new(CsvOrderLog::new(&orders)),
            Arc::new(SqliteSaver::<OrderState>::new(&db).unwrap()),
        );
        bot.chat("zain", "two fries").await.unwrap();
    }

    let second = [intent("display_orders")];
    let second: Vec<&str> = second.iter().map(String::as_str).collect();
    let bot = bot_with(
        &second,
        Arc::new(CsvOrderLog::new(&orders)),
        Arc::new(SqliteSaver::<OrderState>::new(&db).unwrap()),
    );
    let saved = bot.session("zain").await.unwrap().expect("saved session");
    assert_eq!(saved.order_items, vec![OrderItem::new("fries", 2)]);

    let s = bot.chat("zain", "what's in my order").await.unwrap();
    assert_eq!(s.messages.len(), 4);
    assert!(OrderBot::last_reply(&s).contains("- 2x fries (no customizations)"));
}

/// **Scenario**: Placing an order writes header plus one row to the CSV file.
#[tokio::test]
async fn placed_order_lands_in_csv() {
    let dir = tempfile::tempdir().unwrap();
    let orders = dir.path().join("orders.csv");
    let add = r#"{"items": [{"action": "add", "item": "nihari", "quantity": 1, "customizations": ["boneless"]}], "bot_message": "ok"}"#;
    let address = r#"{"final_address": "House 1, Street 2, Saddar", "address_valid": true}"#;
    let replies = [
        intent("handle_order"),
        add.to_string(),
        intent("take_address"),
        address.to_string(),
        intent("confirm_order"),
        intent("place_order"),
    ];
    let replies: Vec<&str> = replies.iter().map(String::as_str).collect();
    let bot = bot_with(
        &replies,
        Arc::new(CsvOrderLog::new(&orders)),
        Arc::new(MemorySaver::<OrderState>::new()),
    );
    for text in ["one nihari boneless", "house 1 street 2 saddar", "done", "confirm"] {
        bot.chat("hina", text).await.unwrap();
    }

    let text = std::fs::read_to_string(&orders).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], CSV_HEADER);
    assert!(lines[1].contains(",hina,"));
    assert!(lines[1].contains(",1x nihari (boneless),10.00,\"House 1, Street 2, Saddar\",completed"));
}
