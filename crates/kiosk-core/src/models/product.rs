//! Catalog product model.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub category: String,
    pub price: i64,
}

/// Normalizes a category filter: the whole string is lowercased, then the
/// first letter of every word is uppercased (`"RUNNING SHOES"` becomes
/// `"Running Shoes"`).
///
/// A word starts after any character that is not alphanumeric or `_`.
pub fn normalize_category(category: &str) -> String {
    let mut out = String::with_capacity(category.len());
    let mut at_word_start = true;
    for ch in category.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        at_word_start = !(ch.is_alphanumeric() || ch == '_');
    }
    out
}
