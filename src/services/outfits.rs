use std::collections::HashSet;

use crate::models::{
    Category, ClothingItem, Occasion, Outfit, Style, StylePreferences, UserAnalysisProfile,
};
use crate::services::scoring;

const MAX_OUTFITS: usize = 6;
const MAX_DISTINCT_STYLES: usize = 2;
const MAX_DISTINCT_COLORS: usize = 3;

const STYLE_CONSISTENCY_BONUS: f64 = 30.0;
const COLOR_HARMONY_BONUS: f64 = 25.0;
const OCCASION_FIT_BONUS: f64 = 20.0;

/// Composes outfit candidates from a catalog snapshot
///
/// Dresses anchor single-piece outfits; tops pair with style-compatible
/// bottoms. Either kind picks up the first compatible outerwear layer.
/// Returns the 6 best-scoring outfits, each holding 1 to 3 items with no
/// duplicate ids.
pub fn compose_outfits(
    catalog: &[ClothingItem],
    _profile: &UserAnalysisProfile,
    _preferences: &StylePreferences,
    occasion: Option<Occasion>,
) -> Vec<Outfit> {
    let catalog = dedup_by_id(catalog);

    let tops = by_category(&catalog, Category::Tops);
    let bottoms = by_category(&catalog, Category::Bottoms);
    let dresses = by_category(&catalog, Category::Dresses);
    let outerwear = by_category(&catalog, Category::Outerwear);

    let mut candidates: Vec<Vec<ClothingItem>> = Vec::new();

    for dress in &dresses {
        let mut outfit = vec![(*dress).clone()];
        if let Some(layer) = first_compatible(dress, &outerwear) {
            outfit.push(layer.clone());
        }
        candidates.push(outfit);
    }

    for top in &tops {
        for bottom in &bottoms {
            if !scoring::styles_compatible(top.style, bottom.style) {
                continue;
            }

            let mut outfit = vec![(*top).clone(), (*bottom).clone()];
            if let Some(layer) = first_compatible(top, &outerwear) {
                outfit.push(layer.clone());
            }
            candidates.push(outfit);
        }
    }

    let mut scored: Vec<(Vec<ClothingItem>, f64)> = candidates
        .into_iter()
        .map(|outfit| {
            let score = score_outfit(&outfit, occasion);
            (outfit, score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(MAX_OUTFITS);

    tracing::debug!(
        catalog_size = catalog.len(),
        outfits = scored.len(),
        "Outfits composed"
    );

    scored
        .into_iter()
        .map(|(items, _)| Outfit { items })
        .collect()
}

/// Coherence score for one outfit
///
/// +30 for at most 2 distinct styles, +25 for at most 3 distinct colors,
/// +20 when every item suits the occasion.
fn score_outfit(outfit: &[ClothingItem], occasion: Option<Occasion>) -> f64 {
    let mut score = 0.0;

    let styles: HashSet<Style> = outfit.iter().map(|item| item.style).collect();
    if styles.len() <= MAX_DISTINCT_STYLES {
        score += STYLE_CONSISTENCY_BONUS;
    }

    // Colors are compared case-insensitively, like everywhere else
    let colors: HashSet<String> = outfit
        .iter()
        .flat_map(|item| &item.colors)
        .map(|color| color.to_lowercase())
        .collect();
    if colors.len() <= MAX_DISTINCT_COLORS {
        score += COLOR_HARMONY_BONUS;
    }

    if let Some(occasion) = occasion {
        let suited = scoring::occasion_styles(occasion);
        if outfit.iter().all(|item| suited.contains(&item.style)) {
            score += OCCASION_FIT_BONUS;
        }
    }

    score
}

/// Keeps the first occurrence of each item id
fn dedup_by_id(catalog: &[ClothingItem]) -> Vec<&ClothingItem> {
    let mut seen = HashSet::new();
    catalog
        .iter()
        .filter(|item| seen.insert(item.id.as_str()))
        .collect()
}

fn by_category<'a>(catalog: &[&'a ClothingItem], category: Category) -> Vec<&'a ClothingItem> {
    catalog
        .iter()
        .filter(|item| item.category == category)
        .copied()
        .collect()
}

fn first_compatible<'a>(
    base: &ClothingItem,
    candidates: &[&'a ClothingItem],
) -> Option<&'a ClothingItem> {
    candidates
        .iter()
        .find(|item| scoring::styles_compatible(base.style, item.style))
        .copied()
}
