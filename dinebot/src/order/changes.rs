//! Applying structured order changes (as extracted by the LLM) to the state.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::menu::{normalize_key, Menu};

use super::{OrderItem, OrderState};

/// What to do with an order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderAction {
    Add,
    Remove,
    Update,
    /// Empty the whole order.
    Clear,
    /// Anything else the model produced; ignored.
    Other(String),
}

impl From<String> for OrderAction {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "add" => OrderAction::Add,
            "remove" | "delete" => OrderAction::Remove,
            "update" | "modify" => OrderAction::Update,
            "clear" => OrderAction::Clear,
            _ => OrderAction::Other(s),
        }
    }
}

impl From<OrderAction> for String {
    fn from(a: OrderAction) -> String {
        match a {
            OrderAction::Add => "add".into(),
            OrderAction::Remove => "remove".into(),
            OrderAction::Update => "update".into(),
            OrderAction::Clear => "clear".into(),
            OrderAction::Other(s) => s,
        }
    }
}

fn one() -> i64 {
    1
}

/// Accepts `2`, `2.0`, `"2"` or `null` (as 1); anything else counts as 1.
fn lenient_quantity<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let quantity = match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().map(|f| f.round() as i64),
        _ => None,
    };
    Ok(quantity.unwrap_or(1))
}

/// Accepts a list, a single string, or `null`; non-string entries are stringified.
fn lenient_customizations<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let text = |v: Value| match v {
        Value::String(s) => s,
        other => other.to_string(),
    };
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Array(values)) => values
            .into_iter()
            .filter(|v| !v.is_null())
            .map(text)
            .filter(|s| !s.trim().is_empty())
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

/// One change requested by the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderChange {
    pub action: OrderAction,
    #[serde(default)]
    pub item: String,
    /// Defaults to 1 when the customer did not say.
    #[serde(default = "one", deserialize_with = "lenient_quantity")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient_customizations")]
    pub customizations: Vec<String>,
}

impl OrderChange {
    pub fn new(action: OrderAction, item: impl Into<String>, quantity: i64) -> Self {
        Self {
            action,
            item: item.into(),
            quantity,
            customizations: Vec::new(),
        }
    }
}

/// Applies `changes` in order, then recalculates the total.
///
/// Items not on the menu are skipped; remove/update of a line that is not in
/// the order are ignored. The LLM's own reply tells the customer about both.
pub fn apply_changes(state: &mut OrderState, changes: &[OrderChange], menu: &Menu) {
    for change in changes {
        if change.action == OrderAction::Clear {
            state.order_items.clear();
            continue;
        }
        let Some(menu_item) = menu.get(&change.item) else {
            tracing::debug!(item = %change.item, "skipping item not on the menu");
            continue;
        };
        let key = menu_item.key.as_str();
        let existing = state
            .order_items
            .iter()
            .position(|o| normalize_key(&o.item) == key);
        let quantity = u32::try_from(change.quantity.max(0)).unwrap_or(u32::MAX);

        match (&change.action, existing) {
            (OrderAction::Add, _) if quantity == 0 => {}
            (OrderAction::Add, Some(i)) => {
                let line = &mut state.order_items[i];
                line.quantity = line.quantity.saturating_add(quantity);
                line.customizations.extend(change.customizations.iter().cloned());
            }
            (OrderAction::Add, None) => state.order_items.push(
                OrderItem::new(key, quantity).with_customizations(change.customizations.clone()),
            ),
            (OrderAction::Update, Some(i)) => {
                if quantity == 0 {
                    state.order_items.remove(i);
                } else {
                    let line = &mut state.order_items[i];
                    line.quantity = quantity;
                    line.customizations = change.customizations.clone();
                }
            }
            (OrderAction::Remove, Some(i)) => {
                let line = &mut state.order_items[i];
                line.quantity = line.quantity.saturating_sub(quantity.max(1));
                if line.quantity == 0 {
                    state.order_items.remove(i);
                }
            }
            _ => {}
        }
    }
    state.recalculate_total(menu);
}
