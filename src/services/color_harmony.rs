use crate::models::{ClothingItem, ColorSuggestion, Harmony, UserAnalysisProfile};
use crate::services::scoring;

const COMPLEMENTARY_CONFIDENCE: f64 = 0.85;
const ANALOGOUS_CONFIDENCE: f64 = 0.78;
const SKIN_TONE_CONFIDENCE: f64 = 0.92;
const MAX_SUGGESTIONS: usize = 5;

/// Suggests colors that pair with a base item's colors
///
/// Each base color contributes its complementary color, its analogous
/// colors, and, when it flatters the profile's skin tone, the base color
/// itself. Returns at most 5 suggestions in descending confidence order.
pub fn suggest_colors(item: &ClothingItem, profile: &UserAnalysisProfile) -> Vec<ColorSuggestion> {
    let mut suggestions = Vec::new();

    for base in &item.colors {
        suggestions.push(ColorSuggestion {
            color: complementary_color(base).to_string(),
            harmony: Harmony::Complementary,
            confidence: COMPLEMENTARY_CONFIDENCE,
        });

        for color in analogous_colors(base) {
            suggestions.push(ColorSuggestion {
                color: (*color).to_string(),
                harmony: Harmony::Analogous,
                confidence: ANALOGOUS_CONFIDENCE,
            });
        }

        if scoring::is_color_compatible(base, profile.skin_tone) {
            suggestions.push(ColorSuggestion {
                color: base.clone(),
                harmony: Harmony::SkinToneMatch,
                confidence: SKIN_TONE_CONFIDENCE,
            });
        }
    }

    suggestions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

/// Complementary pairing; unmapped colors fall back to white
fn complementary_color(color: &str) -> &'static str {
    match color.to_lowercase().as_str() {
        "red" => "green",
        "green" => "red",
        "blue" => "orange",
        "orange" => "blue",
        "yellow" => "purple",
        "purple" => "yellow",
        _ => "white",
    }
}

/// Analogous neighbors; unmapped colors fall back to versatile neutrals
fn analogous_colors(color: &str) -> &'static [&'static str] {
    match color.to_lowercase().as_str() {
        "red" => &["orange", "pink"],
        "blue" => &["teal", "navy"],
        "yellow" => &["gold", "cream"],
        "green" => &["teal", "olive"],
        _ => &["gray", "beige"],
    }
}
