//! Order state types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::intent::Intent;
use crate::menu::{Menu, Money};
use crate::message::Message;

/// One line of an order: a menu key, how many, and requested customizations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub item: String,
    pub quantity: u32,
    #[serde(default)]
    pub customizations: Vec<String>,
}

impl OrderItem {
    pub fn new(item: impl Into<String>, quantity: u32) -> Self {
        Self {
            item: item.into(),
            quantity,
            customizations: Vec::new(),
        }
    }

    pub fn with_customizations<I, T>(mut self, customizations: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.customizations = customizations.into_iter().map(Into::into).collect();
        self
    }

    /// `2x chicken_biryani (extra spicy, with raita)`; no parentheses without customizations.
    pub fn describe(&self) -> String {
        if self.customizations.is_empty() {
            format!("{}x {}", self.quantity, self.item)
        } else {
            format!(
                "{}x {} ({})",
                self.quantity,
                self.item,
                self.customizations.join(", ")
            )
        }
    }
}

/// Where the order is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    NotStarted,
    Greeted,
    AwaitingConfirmation,
    Completed,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::NotStarted => "not_started",
            OrderStatus::Greeted => "greeted",
            OrderStatus::AwaitingConfirmation => "awaiting_confirmation",
            OrderStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-user conversation state.
///
/// **Interaction**: Graph state of the order bot (`StateGraph<OrderState>`);
/// checkpointed per user by `OrderBot`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderState {
    pub user_id: String,
    pub messages: Vec<Message>,
    pub order_items: Vec<OrderItem>,
    pub total_cost: Money,
    /// Empty until `take_address` accepts an address.
    pub delivery_address: String,
    pub status: OrderStatus,
    /// Last classified intent; `None` before the first classification.
    pub intent: Option<Intent>,
    pub menu_sent: bool,
    pub address_valid: bool,
    /// Set once the summary has been shown; the next "yes" places the order.
    /// Cleared when the order changes or is placed.
    pub is_confirmed: bool,
    /// Assigned when the order is placed.
    pub order_number: Option<u32>,
}

impl OrderState {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Content of the most recent user message.
    pub fn last_user_message(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::User(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Content of the most recent assistant message.
    pub fn last_reply(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::Assistant(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// The last `n` messages as `role: content` lines.
    pub fn recent_transcript(&self, n: usize) -> String {
        let start = self.messages.len().saturating_sub(n);
        self.messages[start..]
            .iter()
            .map(|m| format!("{}: {}", m.role(), m.content()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn has_address(&self) -> bool {
        !self.delivery_address.trim().is_empty()
    }

    /// `- 2x nihari (boneless)` per line, `no customizations` when there are none.
    pub fn summary_lines(&self) -> Vec<String> {
        self.order_items
            .iter()
            .map(|o| {
                let custs = if o.customizations.is_empty() {
                    "no customizations".to_string()
                } else {
                    o.customizations.join(", ")
                };
                format!("- {}x {} ({})", o.quantity, o.item, custs)
            })
            .collect()
    }

    /// `- nihari (x2)` per line; the short form used in confirmations and prompts.
    pub fn short_lines(&self) -> Vec<String> {
        self.order_items
            .iter()
            .map(|o| format!("- {} (x{})", o.item, o.quantity))
            .collect()
    }

    pub fn recalculate_total(&mut self, menu: &Menu) {
        self.total_cost = calculate_total(&self.order_items, menu);
    }
}

/// Sum of quantity × menu price; items missing from the menu count as zero.
pub fn calculate_total(items: &[OrderItem], menu: &Menu) -> Money {
    items
        .iter()
        .map(|i| menu.price_of(&i.item) * i.quantity)
        .sum()
}
