use serde::{Deserialize, Serialize};

use super::{ClothingItem, ImagePayload, UserAnalysisProfile};

/// Lighting scenario preset for try-on rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LightingScenario {
    Natural,
    Indoor,
    Evening,
    Bright,
    Warm,
    Cool,
}

/// Lighting settings accompanying a try-on request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LightingSettings {
    pub brightness: f64,
    pub contrast: f64,
    pub warmth: f64,
    pub scenario: LightingScenario,
    pub intensity: f64,
}

/// Garment size recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Size {
    Xs,
    S,
    M,
    L,
    Xl,
    Xxl,
}

/// Overall fit classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FitRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// Fit analysis attached to a try-on result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FitAnalysis {
    pub overall_fit: FitRating,
    pub size_recommendation: Size,
    pub adjustments_needed: Vec<String>,
    pub confidence: f64,
}

/// Virtual try-on request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TryOnRequest {
    pub photo: ImagePayload,
    /// 1 to 5 items
    pub items: Vec<ClothingItem>,
    pub lighting: LightingSettings,
    /// Improves fit analysis when present
    pub profile: Option<UserAnalysisProfile>,
}

/// Core render output from a try-on backend, before quality assessment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TryOnRender {
    pub processed_image_url: String,
    pub fit_analysis: FitAnalysis,
    pub processing_time_ms: u64,
}

/// Virtual try-on result with quality assessment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TryOnResult {
    pub processed_image_url: String,
    pub fit_analysis: FitAnalysis,
    pub processing_time_ms: u64,
    /// In [0,100]
    pub quality_score: f64,
    /// Improvement suggestions derived from quality and lighting
    pub recommendations: Vec<String>,
}
