use crate::models::{
    BodyShape, Category, ClothingItem, Occasion, SkinTone, Style, StylePreferences,
    UserAnalysisProfile,
};

const STYLE_BONUS: f64 = 30.0;
const COLOR_BONUS: f64 = 25.0;
const PRICE_BONUS: f64 = 20.0;
const SKIN_TONE_PALETTE_BONUS: f64 = 10.0;
const SKIN_TONE_NEUTRAL_BONUS: f64 = 8.0;
const SKIN_TONE_BASE_BONUS: f64 = 3.0;
const OCCASION_BONUS: f64 = 15.0;
const MAX_SCORE: f64 = 100.0;

/// Highest category bonus a body shape can earn
pub const BODY_SHAPE_MAX_BONUS: f64 = 15.0;

/// Bonus for body shape and category pairs with no curated entry
pub const BODY_SHAPE_DEFAULT_BONUS: f64 = 5.0;

/// Colors flattering warm undertones, matched by substring
pub const WARM_COLORS: [&str; 5] = ["red", "orange", "yellow", "brown", "gold"];

/// Colors flattering cool undertones, matched by substring
pub const COOL_COLORS: [&str; 5] = ["blue", "green", "purple", "silver", "gray"];

/// Style bonus: +30 when the item's style is among the preferred styles
pub fn style_match(item: &ClothingItem, preferences: &StylePreferences) -> f64 {
    if preferences.preferred_styles.contains(&item.style) {
        STYLE_BONUS
    } else {
        0.0
    }
}

/// Color bonus: +25 when any item color contains a favorite color
///
/// Matching is case-insensitive and substring-based, so a favorite of "red"
/// matches an item color of "dark red".
pub fn color_match(item: &ClothingItem, preferences: &StylePreferences) -> f64 {
    let matched = item.colors.iter().any(|color| {
        let color = color.to_lowercase();
        preferences
            .favorite_colors
            .iter()
            .any(|favorite| color.contains(&favorite.to_lowercase()))
    });

    if matched {
        COLOR_BONUS
    } else {
        0.0
    }
}

/// Price bonus: +20 when the item price falls inside the preferred range
pub fn price_fit(item: &ClothingItem, preferences: &StylePreferences) -> f64 {
    if preferences.price_range.contains(item.price) {
        PRICE_BONUS
    } else {
        0.0
    }
}

/// Category bonus for a body shape
///
/// Pairs without a curated entry fall back to the default bonus, so every
/// item earns at least a small amount here.
pub fn body_shape_compatibility(body_shape: BodyShape, category: Category) -> f64 {
    match (body_shape, category) {
        (BodyShape::Pear, Category::Tops) => 15.0,
        (BodyShape::Pear, Category::Dresses) => 10.0,
        (BodyShape::Pear, Category::Outerwear) => 12.0,
        (BodyShape::Apple, Category::Dresses) => 15.0,
        (BodyShape::Apple, Category::Tops) => 12.0,
        (BodyShape::Apple, Category::Outerwear) => 10.0,
        (BodyShape::Hourglass, Category::Dresses) => 15.0,
        (BodyShape::Hourglass, Category::Tops) => 12.0,
        (BodyShape::Hourglass, Category::Bottoms) => 10.0,
        _ => BODY_SHAPE_DEFAULT_BONUS,
    }
}

/// Whether a color belongs to a palette, matched by lowercase substring
pub fn matches_palette(color: &str, palette: &[&str]) -> bool {
    let color = color.to_lowercase();
    palette.iter().any(|entry| color.contains(entry))
}

/// Whether a single color flatters the given skin tone
///
/// Neutral skin tones are compatible with every color.
pub fn is_color_compatible(color: &str, skin_tone: SkinTone) -> bool {
    match skin_tone {
        SkinTone::Warm => matches_palette(color, &WARM_COLORS),
        SkinTone::Cool => matches_palette(color, &COOL_COLORS),
        SkinTone::Neutral => true,
    }
}

/// Skin tone bonus: +10 for a palette hit, +8 for neutral tones, +3 otherwise
pub fn skin_tone_compatibility(item: &ClothingItem, skin_tone: SkinTone) -> f64 {
    let palette: &[&str] = match skin_tone {
        SkinTone::Warm => &WARM_COLORS,
        SkinTone::Cool => &COOL_COLORS,
        SkinTone::Neutral => return SKIN_TONE_NEUTRAL_BONUS,
    };

    if item.colors.iter().any(|color| matches_palette(color, palette)) {
        SKIN_TONE_PALETTE_BONUS
    } else {
        SKIN_TONE_BASE_BONUS
    }
}

/// Styles suited to an occasion
///
/// Occasions without a curated set earn no style bonus.
pub fn occasion_styles(occasion: Occasion) -> &'static [Style] {
    match occasion {
        Occasion::Work => &[Style::Business, Style::Formal, Style::Classic],
        Occasion::Casual => &[Style::Casual, Style::Trendy],
        Occasion::Party => &[Style::Formal, Style::Trendy],
        Occasion::Date => &[Style::Formal, Style::Trendy, Style::Classic],
        Occasion::Vacation | Occasion::FormalEvent => &[],
    }
}

/// Occasion bonus: +15 when the item's style suits the occasion
pub fn occasion_match(item: &ClothingItem, occasion: Option<Occasion>) -> f64 {
    let suited = occasion
        .map(|occasion| occasion_styles(occasion).contains(&item.style))
        .unwrap_or(false);

    if suited {
        OCCASION_BONUS
    } else {
        0.0
    }
}

/// Total item score: the sum of all bonuses, clamped to [0, 100]
pub fn item_score(
    item: &ClothingItem,
    profile: &UserAnalysisProfile,
    preferences: &StylePreferences,
    occasion: Option<Occasion>,
) -> f64 {
    let score = style_match(item, preferences)
        + color_match(item, preferences)
        + price_fit(item, preferences)
        + body_shape_compatibility(profile.body_shape, item.category)
        + skin_tone_compatibility(item, profile.skin_tone)
        + occasion_match(item, occasion);

    score.min(MAX_SCORE)
}

/// Styles that pair well with the given style in one outfit
///
/// Partners are drawn from occasion co-membership, extended so that every
/// style has at least one partner. The relation is symmetric.
fn affinity_partners(style: Style) -> &'static [Style] {
    match style {
        Style::Casual => &[Style::Trendy, Style::Bohemian],
        Style::Formal => &[Style::Business, Style::Classic, Style::Trendy],
        Style::Business => &[Style::Formal, Style::Classic, Style::Minimalist],
        Style::Trendy => &[Style::Casual, Style::Formal, Style::Classic],
        Style::Classic => &[Style::Business, Style::Formal, Style::Trendy, Style::Minimalist],
        Style::Bohemian => &[Style::Casual],
        Style::Minimalist => &[Style::Classic, Style::Business],
    }
}

/// Whether two styles can appear together in one outfit
pub fn styles_compatible(a: Style, b: Style) -> bool {
    a == b || affinity_partners(a).contains(&b)
}
