use crate::models::{
    BodyShape, Category, ClothingItem, Occasion, Recommendation, SkinTone, Style,
    StylePreferences, UserAnalysisProfile, Variant,
};
use crate::services::scoring;

const MAX_RECOMMENDATIONS: usize = 8;
const MAX_REASONS: usize = 3;
const MAX_TIPS: usize = 2;
const HIGH_RATING_THRESHOLD: f64 = 4.5;

/// Per-point weight the experimental variant gives the community rating
const EXPERIMENTAL_RATING_WEIGHT: f64 = 2.0;

/// Ranks a catalog snapshot against one user profile
///
/// Returns at most 8 recommendations in descending score order; the sort is
/// stable, so equal scores keep catalog order. An empty catalog yields an
/// empty list.
pub fn recommend(
    profile: &UserAnalysisProfile,
    preferences: &StylePreferences,
    catalog: &[ClothingItem],
    occasion: Option<Occasion>,
    variant: Variant,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = catalog
        .iter()
        .map(|item| build_recommendation(item, profile, preferences, occasion, variant))
        .collect();

    recommendations.sort_by(|a, b| b.score.total_cmp(&a.score));
    recommendations.truncate(MAX_RECOMMENDATIONS);

    tracing::debug!(
        catalog_size = catalog.len(),
        returned = recommendations.len(),
        variant = %variant,
        "Catalog ranked"
    );

    recommendations
}

fn build_recommendation(
    item: &ClothingItem,
    profile: &UserAnalysisProfile,
    preferences: &StylePreferences,
    occasion: Option<Occasion>,
    variant: Variant,
) -> Recommendation {
    let mut score = scoring::item_score(item, profile, preferences, occasion);

    if variant == Variant::Experimental {
        // Experimental arm weighs the community rating on top of the base score
        score = (score + item.rating * EXPERIMENTAL_RATING_WEIGHT).min(100.0);
    }

    Recommendation {
        score,
        reasons: build_reasons(item, profile, preferences),
        styling_tips: build_styling_tips(item, profile),
        occasion_match: scoring::occasion_match(item, occasion),
        color_harmony: color_harmony_score(item, profile.skin_tone),
        fit_prediction: fit_prediction_score(item, profile.body_shape),
        item: item.clone(),
    }
}

/// Human-readable reasons for a recommendation, capped at 3
///
/// Ordered by scoring weight so the strongest signals survive the cap.
fn build_reasons(
    item: &ClothingItem,
    profile: &UserAnalysisProfile,
    preferences: &StylePreferences,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if scoring::style_match(item, preferences) > 0.0 {
        reasons.push(format!("Matches your {} style preference", item.style));
    }
    if scoring::color_match(item, preferences) > 0.0 {
        reasons.push("Features your favorite colors".to_string());
    }
    if item.rating >= HIGH_RATING_THRESHOLD {
        reasons.push("Highly rated by other customers".to_string());
    }
    if scoring::body_shape_compatibility(profile.body_shape, item.category)
        > scoring::BODY_SHAPE_DEFAULT_BONUS
    {
        reasons.push(format!("Perfect for your {} figure", profile.body_shape));
    }

    reasons.truncate(MAX_REASONS);
    reasons
}

/// Styling tips for an item, capped at 2
fn build_styling_tips(item: &ClothingItem, profile: &UserAnalysisProfile) -> Vec<String> {
    let mut tips = Vec::new();

    match item.category {
        Category::Tops => {
            tips.push("Pair with high-waisted bottoms to elongate your silhouette".to_string())
        }
        Category::Dresses => tips.push("Add a belt to accentuate your waist".to_string()),
        _ => {}
    }

    if profile.skin_tone == SkinTone::Warm {
        tips.push("This color will complement your warm undertones beautifully".to_string());
    }

    tips.truncate(MAX_TIPS);
    tips
}

/// Share of item colors compatible with the skin tone, as a percentage
fn color_harmony_score(item: &ClothingItem, skin_tone: SkinTone) -> f64 {
    if item.colors.is_empty() {
        return 0.0;
    }

    let compatible = item
        .colors
        .iter()
        .filter(|color| scoring::is_color_compatible(color, skin_tone))
        .count();

    100.0 * compatible as f64 / item.colors.len() as f64
}

/// Body shape bonus normalized against its maximum, as a percentage
fn fit_prediction_score(item: &ClothingItem, body_shape: BodyShape) -> f64 {
    100.0 * scoring::body_shape_compatibility(body_shape, item.category)
        / scoring::BODY_SHAPE_MAX_BONUS
}
