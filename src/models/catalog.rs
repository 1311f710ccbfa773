use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Clothing category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tops,
    Bottoms,
    Dresses,
    Outerwear,
    Shoes,
    Accessories,
}

/// Style tag carried by catalog items and user preferences
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Casual,
    Formal,
    Business,
    Trendy,
    Classic,
    Bohemian,
    Minimalist,
}

impl Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Style::Casual => write!(f, "casual"),
            Style::Formal => write!(f, "formal"),
            Style::Business => write!(f, "business"),
            Style::Trendy => write!(f, "trendy"),
            Style::Classic => write!(f, "classic"),
            Style::Bohemian => write!(f, "bohemian"),
            Style::Minimalist => write!(f, "minimalist"),
        }
    }
}

/// A catalog item supplied per call as part of a read-only snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClothingItem {
    /// Unique within a catalog snapshot
    pub id: String,
    pub name: String,
    pub category: Category,
    pub style: Style,
    /// Non-empty; free-form color names matched case-insensitively
    pub colors: Vec<String>,
    /// Non-negative
    pub price: f64,
    /// In [0,5]
    pub rating: f64,
}
