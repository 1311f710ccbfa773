use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Profiles with confidence below this came from the degraded path
pub const DEGRADED_CONFIDENCE: f64 = 0.7;

/// Skin tone classification from vision analysis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SkinTone {
    Warm,
    Cool,
    Neutral,
}

impl Display for SkinTone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkinTone::Warm => write!(f, "warm"),
            SkinTone::Cool => write!(f, "cool"),
            SkinTone::Neutral => write!(f, "neutral"),
        }
    }
}

/// Body shape classification from vision analysis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum BodyShape {
    Pear,
    Apple,
    Hourglass,
    Rectangle,
    InvertedTriangle,
}

impl Display for BodyShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyShape::Pear => write!(f, "pear"),
            BodyShape::Apple => write!(f, "apple"),
            BodyShape::Hourglass => write!(f, "hourglass"),
            BodyShape::Rectangle => write!(f, "rectangle"),
            BodyShape::InvertedTriangle => write!(f, "inverted-triangle"),
        }
    }
}

/// Face shape classification from vision analysis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FaceShape {
    Oval,
    Round,
    Square,
    Heart,
    Diamond,
}

/// Body measurements in centimeters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BodyMeasurements {
    pub shoulders: f64,
    pub chest: f64,
    pub waist: f64,
    pub hips: f64,
    pub height: f64,
}

/// Analysis profile produced by the vision provider
///
/// Immutable once produced; every downstream component consumes it read-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserAnalysisProfile {
    pub measurements: BodyMeasurements,
    pub skin_tone: SkinTone,
    pub body_shape: BodyShape,
    pub face_shape: FaceShape,
    /// Confidence in [0,1]; values below [`DEGRADED_CONFIDENCE`] mark a
    /// best-effort profile synthesized without the vision backend
    pub confidence: f64,
}

impl UserAnalysisProfile {
    /// Whether this profile came from the degraded fallback path
    pub fn is_degraded(&self) -> bool {
        self.confidence < DEGRADED_CONFIDENCE
    }
}

/// Image payload submitted for analysis or try-on
///
/// `data` is a base64 string or URL; the core never decodes it. Dimensions
/// feed the aspect-ratio fallback heuristics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImagePayload {
    pub data: String,
    pub width: u32,
    pub height: u32,
}

impl ImagePayload {
    /// Height over width; callers must validate non-zero dimensions first
    pub fn aspect_ratio(&self) -> f64 {
        self.height as f64 / self.width as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_shape_serialization() {
        let shape = BodyShape::InvertedTriangle;
        let json = serde_json::to_string(&shape).unwrap();
        assert_eq!(json, "\"inverted-triangle\"");

        let deserialized: BodyShape = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, shape);
    }

    #[test]
    fn test_body_shape_display_matches_wire_format() {
        assert_eq!(format!("{}", BodyShape::Hourglass), "hourglass");
        assert_eq!(
            format!("{}", BodyShape::InvertedTriangle),
            "inverted-triangle"
        );
    }

    #[test]
    fn test_skin_tone_serialization() {
        let json = serde_json::to_string(&SkinTone::Neutral).unwrap();
        assert_eq!(json, "\"neutral\"");
    }

    #[test]
    fn test_profile_degraded_band() {
        let profile = UserAnalysisProfile {
            measurements: BodyMeasurements {
                shoulders: 42.0,
                chest: 36.0,
                waist: 30.0,
                hips: 38.0,
                height: 168.0,
            },
            skin_tone: SkinTone::Neutral,
            body_shape: BodyShape::Rectangle,
            face_shape: FaceShape::Oval,
            confidence: 0.6,
        };
        assert!(profile.is_degraded());

        let confident = UserAnalysisProfile {
            confidence: 0.92,
            ..profile
        };
        assert!(!confident.is_degraded());
    }

    #[test]
    fn test_aspect_ratio() {
        let image = ImagePayload {
            data: "data:image/jpeg;base64,abc".to_string(),
            width: 400,
            height: 600,
        };
        assert_eq!(image.aspect_ratio(), 1.5);
    }
}
