use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::Style;

/// Occasion context used to bias scoring toward suitable styles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Occasion {
    Work,
    Casual,
    Party,
    Date,
    Vacation,
    FormalEvent,
}

impl Display for Occasion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Occasion::Work => write!(f, "work"),
            Occasion::Casual => write!(f, "casual"),
            Occasion::Party => write!(f, "party"),
            Occasion::Date => write!(f, "date"),
            Occasion::Vacation => write!(f, "vacation"),
            Occasion::FormalEvent => write!(f, "formal-event"),
        }
    }
}

/// Inclusive price range with min ≤ max
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Style preferences supplied by the user per call
///
/// Empty style and color lists are valid; they simply earn no bonus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StylePreferences {
    pub preferred_styles: Vec<Style>,
    /// Matched against item colors by case-insensitive substring
    pub favorite_colors: Vec<String>,
    pub price_range: PriceRange,
}

/// A/B test variant for recommendation scoring
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Control,
    Experimental,
}

impl Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Control => write!(f, "control"),
            Variant::Experimental => write!(f, "experimental"),
        }
    }
}
