//! The restaurant's built-in catalog.

use super::{MenuItem, Money};

/// (key, category, price in cents, customizations)
const ITEMS: &[(&str, &str, u64, &[&str])] = &[
    ("chicken_soup", "starters", 500, &["extra spicy", "no salt", "add sweet corn"]),
    ("hot_and_sour_soup", "starters", 550, &["extra spicy", "less vinegar", "add chicken"]),
    ("spring_rolls", "starters", 400, &["extra sauce", "vegetarian", "add chicken"]),
    ("chicken_wings", "starters", 600, &["bbq", "buffalo", "extra crispy"]),
    ("chicken_biryani", "pakistani", 700, &["extra spicy", "with raita", "no potato"]),
    ("mutton_karahi", "pakistani", 1400, &["extra spicy", "less oil", "add extra ginger"]),
    ("chicken_karahi", "pakistani", 1200, &["extra spicy", "less oil", "add extra green chili"]),
    ("nihari", "pakistani", 1000, &["extra spicy", "boneless", "add lemon"]),
    ("haleem", "pakistani", 800, &["extra fried onions", "extra lemon", "no ginger"]),
    ("chicken_chowmein", "chinese", 900, &["extra spicy", "add prawns", "no capsicum"]),
    ("fried_rice", "chinese", 800, &["add chicken", "add prawns", "no peas"]),
    ("manchurian_chicken", "chinese", 1000, &["extra sauce", "extra spicy", "add vegetables"]),
    ("kung_pao_chicken", "chinese", 1100, &["extra peanuts", "less spicy", "no onions"]),
    ("chicken_kathi_roll", "rolls", 500, &["extra mayo", "extra cheese", "no onions"]),
    ("beef_kebab_roll", "rolls", 550, &["extra chutney", "extra cheese", "no onions"]),
    ("shawarma", "rolls", 450, &["extra garlic sauce", "extra meat", "no pickles"]),
    ("fries", "snacks", 300, &["masala fries", "cheese fries", "no salt"]),
    ("tikka_boti_pizza", "pizza", 1200, &["extra cheese", "stuffed crust", "no olives"]),
    ("fajita_pizza", "pizza", 1250, &["extra cheese", "add jalapenos", "no onions"]),
    ("margherita_pizza", "pizza", 1100, &["extra cheese", "add mushrooms", "no tomato slices"]),
    ("zinger_burger", "burger", 600, &["extra mayo", "add cheese", "no lettuce"]),
    ("beef_cheeseburger", "burger", 700, &["double patty", "add bacon", "no onions"]),
    ("soda", "beverages", 200, &[]),
    ("mint_margarita", "beverages", 350, &[]),
    ("fresh_lime_soda", "beverages", 300, &["sweet", "salted", "half sweet half salted"]),
    ("tea", "beverages", 150, &["with milk", "without milk", "extra sugar", "no sugar"]),
    ("coffee", "beverages", 250, &["black", "with milk", "extra sugar", "no sugar"]),
];

pub(super) fn default_items() -> Vec<MenuItem> {
    ITEMS
        .iter()
        .map(|(key, category, cents, customizations)| MenuItem {
            key: (*key).to_string(),
            category: (*category).to_string(),
            price: Money::from_cents(*cents),
            description: String::new(),
            customizations: customizations.iter().map(|c| (*c).to_string()).collect(),
        })
        .collect()
}
