use serde::{Deserialize, Serialize};

use super::ClothingItem;

/// A scored catalog item with human-readable explanations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub item: ClothingItem,
    /// In [0,100]
    pub score: f64,
    /// At most 3
    pub reasons: Vec<String>,
    /// At most 2
    pub styling_tips: Vec<String>,
    /// Raw occasion contribution (0 or 15)
    pub occasion_match: f64,
    /// Share of item colors compatible with the profile's skin tone, in [0,100]
    pub color_harmony: f64,
    /// Body-shape table bonus normalized to [0,100]
    pub fit_prediction: f64,
}

/// A composed outfit of 1 to 3 compatible items
///
/// At most one of each of top/bottom or a single dress, optionally plus
/// outerwear. The composite score used for ranking is not part of the shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Outfit {
    pub items: Vec<ClothingItem>,
}

/// Color harmony relationship kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Harmony {
    Complementary,
    Analogous,
    SkinToneMatch,
}

/// A palette suggestion for a base item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColorSuggestion {
    pub color: String,
    pub harmony: Harmony,
    /// Fixed per harmony kind, in [0,1]
    pub confidence: f64,
}
