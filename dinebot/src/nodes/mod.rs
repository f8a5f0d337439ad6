//! Handler nodes, one per intent.
//!
//! Every handler appends exactly one assistant message to the conversation and
//! returns `Next::Continue` (the graph ends after the handler). LLM-backed
//! handlers never fail a turn: an LLM error is logged and answered with a
//! canned apology.

mod chit_chat;
mod confirm_order;
mod display_orders;
mod greetings;
mod handle_order;
mod place_order;
mod send_menu;
mod suggest_order;
mod take_address;
mod track_order;

pub use chit_chat::{ChitChatNode, CHAT_UNAVAILABLE};
pub use confirm_order::{ConfirmOrderNode, NOTHING_TO_CONFIRM};
pub use display_orders::{DisplayOrdersNode, NO_ITEMS};
pub use greetings::{GreetingsNode, GREETING};
pub use handle_order::{HandleOrderNode, DEFAULT_ACK, NOT_UNDERSTOOD};
pub use place_order::{PlaceOrderNode, EMPTY_ORDER, NEED_ADDRESS, NOT_CONFIRMED, NOT_SAVED};
pub use send_menu::SendMenuNode;
pub use suggest_order::{SuggestOrderNode, NO_SUGGESTION};
pub use take_address::{TakeAddressNode, ADDRESS_TROUBLE, INCOMPLETE_ADDRESS};
pub use track_order::TrackOrderNode;

use crate::graph::Next;
use crate::order::OrderState;

/// Appends `text` as the assistant reply and continues along the graph's edges.
pub(crate) fn reply(mut state: OrderState, text: impl Into<String>) -> (OrderState, Next) {
    state.push_assistant(text);
    (state, Next::Continue)
}
