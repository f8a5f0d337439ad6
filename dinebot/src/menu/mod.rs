//! Menu catalog: item key → category, price and allowed customizations.
//!
//! The built-in catalog is used unless a JSON menu file is loaded with
//! [`Menu::from_json_file`]. Keys are snake_case (`chicken_biryani`); lookups
//! normalize case, spaces and hyphens so "Chicken Biryani" finds the same item.

mod catalog;
mod money;

pub use money::Money;

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error loading a menu file.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("reading menu file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing menu file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("menu has no items")]
    Empty,
    #[error("duplicate menu item: {0}")]
    DuplicateKey(String),
}

/// One entry of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub key: String,
    pub category: String,
    pub price: Money,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub customizations: Vec<String>,
}

impl MenuItem {
    /// Human name: `chicken_biryani` → `Chicken Biryani`.
    pub fn display_name(&self) -> String {
        title_case(&self.key.replace('_', " "))
    }
}

/// Normalizes a user- or LLM-supplied item name to a menu key.
pub fn normalize_key(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The restaurant's catalog, in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Default for Menu {
    fn default() -> Self {
        Self::standard()
    }
}

impl Menu {
    /// The built-in catalog (starters, pakistani, chinese, rolls, snacks, pizza, burger, beverages).
    pub fn standard() -> Self {
        Self {
            items: catalog::default_items(),
        }
    }

    /// Builds a menu from items; keys are normalized and must be unique.
    pub fn from_items(items: Vec<MenuItem>) -> Result<Self, MenuError> {
        if items.is_empty() {
            return Err(MenuError::Empty);
        }
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .map(|mut item| {
                item.key = normalize_key(&item.key);
                item.category = item.category.trim().to_lowercase();
                if seen.insert(item.key.clone()) {
                    Ok(item)
                } else {
                    Err(MenuError::DuplicateKey(item.key))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { items })
    }

    /// Loads `{"items": [{"key", "category", "price", "customizations"?, "description"?}, ...]}`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, MenuError> {
        let text = std::fs::read_to_string(path)?;
        let parsed: Menu = serde_json::from_str(&text)?;
        Self::from_items(parsed.items)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Looks an item up by key or name ("Chicken Biryani", "chicken-biryani", ...).
    pub fn get(&self, name: &str) -> Option<&MenuItem> {
        let key = normalize_key(name);
        self.items.iter().find(|i| i.key == key)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Price of an item; unknown items cost nothing.
    pub fn price_of(&self, name: &str) -> Money {
        self.get(name).map(|i| i.price).unwrap_or(Money::ZERO)
    }

    /// Customer-facing menu grouped by category (categories sorted alphabetically).
    pub fn render(&self) -> String {
        let mut by_category: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for item in &self.items {
            let customizations = if item.customizations.is_empty() {
                String::new()
            } else {
                format!(" (Customizations: {})", item.customizations.join(", "))
            };
            by_category
                .entry(title_case(&item.category))
                .or_default()
                .push(format!("- {} — {}{}", item.display_name(), item.price, customizations));
        }

        let mut lines = vec!["Here’s our menu:\n".to_string()];
        for (category, entries) in by_category {
            lines.push(format!("🍽 **{}**", category));
            lines.extend(entries);
            lines.push(String::new());
        }
        lines.join("\n")
    }

    /// One `- key: $price | description` line per item, for LLM prompts.
    pub fn prompt_listing(&self) -> String {
        self.items
            .iter()
            .map(|i| format!("- {}: {} | {}", i.key, i.price, i.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_menu_has_known_prices() {
        let menu = Menu::standard();
        assert_eq!(menu.items().len(), 27);
        assert_eq!(menu.price_of("chicken_biryani"), Money::from_cents(700));
        assert_eq!(menu.price_of("fajita_pizza"), Money::from_cents(1250));
        assert_eq!(menu.price_of("tea"), Money::from_cents(150));
    }

    /// **Scenario**: Lookup accepts display names, mixed case and hyphens.
    #[test]
    fn get_normalizes_names() {
        let menu = Menu::standard();
        assert_eq!(menu.get("Chicken Biryani").unwrap().key, "chicken_biryani");
        assert_eq!(menu.get("  hot-and-sour soup ").unwrap().key, "hot_and_sour_soup");
        assert!(menu.get("pasta").is_none());
        assert_eq!(menu.price_of("pasta"), Money::ZERO);
    }

    /// **Scenario**: Rendered menu groups by sorted category with titled names and prices.
    #[test]
    fn render_groups_by_sorted_category() {
        let text = Menu::standard().render();
        assert!(text.starts_with("Here’s our menu:\n"));
        let bev = text.find("🍽 **Beverages**").expect("beverages header");
        let starters = text.find("🍽 **Starters**").expect("starters header");
        assert!(bev < starters, "categories must be sorted");
        assert!(text.contains("- Chicken Soup — $5.00 (Customizations: extra spicy, no salt, add sweet corn)"));
        assert!(text.contains("- Soda — $2.00\n"), "items without customizations have no suffix");
    }

    #[test]
    fn prompt_listing_has_key_and_price() {
        let listing = Menu::standard().prompt_listing();
        assert!(listing.contains("- mutton_karahi: $14.00 | "));
        assert_eq!(listing.lines().count(), 27);
    }

    #[test]
    fn from_items_rejects_duplicates_and_empty() {
        assert!(matches!(Menu::from_items(vec![]), Err(MenuError::Empty)));
        let item = |key: &str| MenuItem {
            key: key.into(),
            category: "x".into(),
            price: Money::from_cents(100),
            description: String::new(),
            customizations: vec![],
        };
        match Menu::from_items(vec![item("Tea"), item("tea")]) {
            Err(MenuError::DuplicateKey(k)) => assert_eq!(k, "tea"),
            other => panic!("expected DuplicateKey, got {:?}", other),
        }
    }

    /// **Scenario**: A JSON menu file replaces the built-in catalog.
    #[test]
    fn from_json_file_loads_custom_menu() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.json");
        std::fs::write(
            &path,
            r#"{"items": [
                {"key": "Masala Dosa", "category": "South Indian", "price": 6.5,
                 "customizations": ["extra chutney"]},
                {"key": "lassi", "category": "beverages", "price": 2}
            ]}"#,
        )
        .unwrap();
        let menu = Menu::from_json_file(&path).unwrap();
        let dosa = menu.get("masala dosa").unwrap();
        assert_eq!(dosa.key, "masala_dosa");
        assert_eq!(dosa.category, "south indian");
        assert_eq!(dosa.price, Money::from_cents(650));
        assert!(menu.get("lassi").unwrap().customizations.is_empty());
    }

    #[test]
    fn from_json_file_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(Menu::from_json_file(&path), Err(MenuError::Parse(_))));
        assert!(matches!(
            Menu::from_json_file(dir.path().join("missing.json")),
            Err(MenuError::Io(_))
        ));
    }
}
