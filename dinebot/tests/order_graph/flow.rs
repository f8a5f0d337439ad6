//! Multi-turn conversations through `OrderBot::chat`.

use dinebot::nodes::{GREETING, NOT_UNDERSTOOD, NO_ITEMS};
use dinebot::{Intent, Money, OrderBot, OrderItem, OrderStatus};

use crate::common::{intent, scripted_bot};

/// **Scenario**: Greeting, menu, order, address, confirmation, placement and tracking in one session.
#[tokio::test]
async fn full_order_conversation() {
    let order_json = r#"{"items": [
        {"action": "add", "item": "chicken_biryani", "quantity": 2, "customizations": ["extra spicy"]},
        {"action": "add", "item": "soda", "quantity": 1, "customizations": []}
    ], "bot_message": "Added 2 chicken biryani (extra spicy) and 1 soda."}"#;
    let address_json = r#"{"final_address": "House 12, Street 4, Gulberg", "address_valid": true}"#;
    let replies = [
        intent("greetings"),
        intent("send_menu"),
        intent("handle_order"),
        order_json.to_string(),
        intent("display_orders"),
        intent("take_address"),
        address_json.to_string(),
        intent("confirm_order"),
        intent("place_order"),
        intent("track_order"),
    ];
    let replies: Vec<&str> = replies.iter().map(String::as_str).collect();
    let (bot, llm, log) = scripted_bot(&replies);
    let user = "ayesha";

    let s = bot.chat(user, "hi").await.unwrap();
    assert_eq!(OrderBot::last_reply(&s), GREETING);
    assert_eq!(s.status, OrderStatus::Greeted);

    let s = bot.chat(user, "show me the menu").await.unwrap();
    assert!(s.menu_sent);
    assert!(OrderBot::last_reply(&s).starts_with("Here’s our menu:"));

    let s = bot.chat(user, "2 spicy chicken biryani and a soda").await.unwrap();
    assert_eq!(s.intent, Some(Intent::HandleOrder));
    assert_eq!(
        s.order_items,
        vec![
            OrderItem::new("chicken_biryani", 2).with_customizations(["extra spicy"]),
            OrderItem::new("soda", 1),
        ]
    );
    assert_eq!(s.total_cost, Money::from_cents(1600));

    let s = bot.chat(user, "what did I order?").await.unwrap();
    assert!(OrderBot::last_reply(&s).ends_with("Total: $16.00"));

    let s = bot.chat(user, "house 12 street 4 gulberg").await.unwrap();
    assert_eq!(s.delivery_address, "House 12, Street 4, Gulberg");
    assert_eq!(s.status, OrderStatus::AwaitingConfirmation);

    let s = bot.chat(user, "that's all").await.unwrap();
    assert!(s.is_confirmed);
    assert!(OrderBot::last_reply(&s).contains("Delivering to: House 12, Street 4, Gulberg"));

    let s = bot.chat(user, "yes").await.unwrap();
    assert_eq!(s.status, OrderStatus::Completed);
    let number = s.order_number.expect("order placed");
    assert!(OrderBot::last_reply(&s).contains(&format!("#{}", number)));

    let s = bot.chat(user, "where is my food?").await.unwrap();
    assert_eq!(
        OrderBot::last_reply(&s),
        "Your order status is: **completed**."
    );

    // One user and one assistant message per turn.
    assert_eq!(s.messages.len(), 16);
    assert_eq!(llm.call_count(), 10);

    let records = log.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].order_number, number);
    assert_eq!(records[0].items, "2x chicken_biryani (extra spicy); 1x soda");
    assert_eq!(records[0].user_id, user);
}

/// **Scenario**: An unknown label falls back to handle_order, which apologizes on garbage.
#[tokio::test]
async fn unknown_intent_falls_back_to_handle_order() {
    let replies = [intent("dance"), "not json at all".to_string()];
    let replies: Vec<&str> = replies.iter().map(String::as_str).collect();
    let (bot, _llm, _log) = scripted_bot(&replies);

    let s = bot.chat("u", "blah").await.unwrap();
    assert_eq!(s.intent, Some(Intent::HandleOrder));
    assert_eq!(OrderBot::last_reply(&s), NOT_UNDERSTOOD);
    assert!(s.order_items.is_empty());
}

/// **Scenario**: A dead LLM still produces a reply every turn.
#[tokio::test]
async fn exhausted_llm_never_fails_a_turn() {
    let (bot, _llm, _log) = scripted_bot(&[]);
    let s = bot.chat("u", "hello?").await.unwrap();
    assert_eq!(s.intent, Some(Intent::HandleOrder));
    assert_eq!(OrderBot::last_reply(&s), NOT_UNDERSTOOD);
    assert_eq!(s.messages.len(), 2);
}

#[tokio::test]
async fn display_before_ordering() {
    let replies = [intent("display_orders")];
    let replies: Vec<&str> = replies.iter().map(String::as_str).collect();
    let (bot, _llm, _log) = scripted_bot(&replies);
    let s = bot.chat("u", "show my order").await.unwrap();
    assert_eq!(OrderBot::last_reply(&s), NO_ITEMS);
}

/// **Scenario**: Editing the order after confirmation clears the confirmation flag.
#[tokio::test]
async fn changing_order_resets_confirmation() {
    let add = r#"{"items": [{"action": "add", "item": "tea", "quantity": 1}], "bot_message": "One tea."}"#;
    let address = r#"{"final_address": "Flat 3, Block B, Model Town", "address_valid": true}"#;
    let add_more = r#"{"items": [{"action": "update", "item": "tea", "quantity": 3}], "bot_message": "Three teas now."}"#;
    let replies = [
        intent("handle_order"),
        add.to_string(),
        intent("take_address"),
        address.to_string(),
        intent("confirm_order"),
        intent("handle_order"),
        add_more.to_string(),
    ];
    let replies: Vec<&str> = replies.iter().map(String::as_str).collect();
    let (bot, _llm, log) = scripted_bot(&replies);

    bot.chat("u", "a tea").await.unwrap();
    bot.chat("u", "flat 3 block b model town").await.unwrap();
    let s = bot.chat("u", "done").await.unwrap();
    assert!(s.is_confirmed);

    let s = bot.chat("u", "make it three").await.unwrap();
    assert!(!s.is_confirmed);
    assert_eq!(s.order_items, vec![OrderItem::new("tea", 3)]);
    assert_eq!(s.total_cost, Money::from_cents(450));
    assert_eq!(OrderBot::last_reply(&s), "Three teas now.");
    assert!(log.is_empty().await);
}
