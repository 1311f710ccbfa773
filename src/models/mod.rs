use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod preferences;
pub mod profile;
pub mod recommendation;
pub mod tryon;

pub use catalog::{Category, ClothingItem, Style};
pub use preferences::{Occasion, PriceRange, StylePreferences, Variant};
pub use profile::{
    BodyMeasurements, BodyShape, FaceShape, ImagePayload, SkinTone, UserAnalysisProfile,
    DEGRADED_CONFIDENCE,
};
pub use recommendation::{ColorSuggestion, Harmony, Outfit, Recommendation};
pub use tryon::{
    FitAnalysis, FitRating, LightingScenario, LightingSettings, Size, TryOnRender, TryOnRequest,
    TryOnResult,
};

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Request to analyze a user photo
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub image: ImagePayload,
}

/// Analysis response with an explicit degraded-mode indicator
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub profile: UserAnalysisProfile,
    /// True when the profile came from the fallback path instead of the
    /// vision backend
    pub degraded: bool,
}

impl From<UserAnalysisProfile> for AnalysisResponse {
    fn from(profile: UserAnalysisProfile) -> Self {
        let degraded = profile.is_degraded();
        Self { profile, degraded }
    }
}

/// Request to rank a catalog snapshot against one user profile
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    pub profile: UserAnalysisProfile,
    pub preferences: StylePreferences,
    pub catalog: Vec<ClothingItem>,
    #[serde(default)]
    pub occasion: Option<Occasion>,
    /// A/B variant; non-control requests bypass the response cache
    #[serde(default)]
    pub variant: Variant,
}

/// Ordered recommendations plus response metadata
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
    pub generated_at: DateTime<Utc>,
    pub degraded: bool,
}

/// Batch of recommendation requests processed in fixed-size chunks
#[derive(Debug, Deserialize)]
pub struct BatchRecommendationRequest {
    pub requests: Vec<RecommendationRequest>,
}

/// One result list per batched request, in request order
///
/// Requests belonging to a failed chunk carry empty lists.
#[derive(Debug, Serialize)]
pub struct BatchRecommendationResponse {
    pub results: Vec<Vec<Recommendation>>,
}

/// Request to compose outfits from a catalog snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct OutfitRequest {
    pub catalog: Vec<ClothingItem>,
    pub profile: UserAnalysisProfile,
    pub preferences: StylePreferences,
    #[serde(default)]
    pub occasion: Option<Occasion>,
}

/// Composed outfits, best first
#[derive(Debug, Serialize)]
pub struct OutfitResponse {
    pub outfits: Vec<Outfit>,
}

/// Request for color suggestions around a base item
#[derive(Debug, Clone, Deserialize)]
pub struct ColorSuggestionRequest {
    pub item: ClothingItem,
    pub profile: UserAnalysisProfile,
}

/// Color suggestions sorted by confidence
#[derive(Debug, Serialize)]
pub struct ColorSuggestionResponse {
    pub suggestions: Vec<ColorSuggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_request_optional_fields_default() {
        let json = r#"{
            "profile": {
                "measurements": {
                    "shoulders": 42.0,
                    "chest": 36.0,
                    "waist": 30.0,
                    "hips": 38.0,
                    "height": 168.0
                },
                "skin_tone": "warm",
                "body_shape": "hourglass",
                "face_shape": "oval",
                "confidence": 0.92
            },
            "preferences": {
                "preferred_styles": ["classic"],
                "favorite_colors": ["red"],
                "price_range": { "min": 50.0, "max": 150.0 }
            },
            "catalog": []
        }"#;

        let request: RecommendationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.occasion, None);
        assert_eq!(request.variant, Variant::Control);
        assert_eq!(request.profile.skin_tone, SkinTone::Warm);
    }

    #[test]
    fn test_analysis_response_from_degraded_profile() {
        let profile = UserAnalysisProfile {
            measurements: BodyMeasurements {
                shoulders: 42.0,
                chest: 32.0,
                waist: 24.0,
                hips: 34.0,
                height: 168.0,
            },
            skin_tone: SkinTone::Neutral,
            body_shape: BodyShape::Rectangle,
            face_shape: FaceShape::Oval,
            confidence: 0.6,
        };

        let response = AnalysisResponse::from(profile);
        assert!(response.degraded);
    }
}
