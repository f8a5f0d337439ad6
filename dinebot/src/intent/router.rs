//! Router: state → handler node id.

use crate::order::OrderState;

use super::Intent;

/// Node id for the classified intent. Before any classification the
/// conversation starts with `greetings`.
pub fn route(state: &OrderState) -> &'static str {
    state.intent.unwrap_or(Intent::Greetings).as_str()
}
