//! Intent labels, the LLM intent classifier and the router from intent to handler.

mod classifier;
mod router;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use classifier::{ClassifyIntentNode, CLASSIFY_INTENT};
pub use router::route;

/// What the customer wants this turn. Each label is also the id of its handler node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greetings,
    SendMenu,
    HandleOrder,
    TakeAddress,
    ConfirmOrder,
    PlaceOrder,
    SuggestOrder,
    TrackOrder,
    ChitChat,
    DisplayOrders,
}

impl Intent {
    pub const ALL: [Intent; 10] = [
        Intent::Greetings,
        Intent::SendMenu,
        Intent::HandleOrder,
        Intent::TakeAddress,
        Intent::ConfirmOrder,
        Intent::PlaceOrder,
        Intent::SuggestOrder,
        Intent::TrackOrder,
        Intent::ChitChat,
        Intent::DisplayOrders,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Greetings => "greetings",
            Intent::SendMenu => "send_menu",
            Intent::HandleOrder => "handle_order",
            Intent::TakeAddress => "take_address",
            Intent::ConfirmOrder => "confirm_order",
            Intent::PlaceOrder => "place_order",
            Intent::SuggestOrder => "suggest_order",
            Intent::TrackOrder => "track_order",
            Intent::ChitChat => "chit_chat",
            Intent::DisplayOrders => "display_orders",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label outside the ten known intents.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown intent: {0}")]
pub struct UnknownIntent(pub String);

impl FromStr for Intent {
    type Err = UnknownIntent;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_lowercase();
        Intent::ALL
            .into_iter()
            .find(|i| i.as_str() == label)
            .ok_or(UnknownIntent(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_back() {
        for intent in Intent::ALL {
            assert_eq!(intent.as_str().parse::<Intent>(), Ok(intent));
        }
        assert_eq!(" Send_Menu ".parse::<Intent>(), Ok(Intent::SendMenu));
        assert_eq!(
            "order_pizza".parse::<Intent>(),
            Err(UnknownIntent("order_pizza".into()))
        );
    }

    #[test]
    fn serde_matches_display() {
        let v = serde_json::to_value(Intent::DisplayOrders).unwrap();
        assert_eq!(v, serde_json::json!("display_orders"));
        let back: Intent = serde_json::from_value(serde_json::json!("chit_chat")).unwrap();
        assert_eq!(back, Intent::ChitChat);
    }
}
