use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{
    BodyMeasurements, BodyShape, ClothingItem, FaceShape, FitAnalysis, FitRating, ImagePayload,
    LightingSettings, SkinTone, Size, TryOnRender, TryOnRequest, UserAnalysisProfile,
};
use crate::services::providers::VisionProvider;

/// HTTP-backed vision provider
///
/// Forwards analysis, try-on rendering, and quality assessment to a remote
/// inference service speaking camelCase JSON.
#[derive(Clone)]
pub struct InferenceProvider {
    http_client: HttpClient,
    api_url: String,
    api_key: Option<String>,
}

impl InferenceProvider {
    pub fn new(api_url: String, api_key: Option<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
            api_key,
        }
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.api_url, path);
        let mut request = self.http_client.post(url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        request
    }
}

#[async_trait]
impl VisionProvider for InferenceProvider {
    async fn analyze(&self, image: &ImagePayload) -> AppResult<UserAnalysisProfile> {
        let response = self
            .post("/analysis")
            .json(&ApiAnalysisRequest {
                image_data: &image.data,
                width: image.width,
                height: image.height,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "Inference API returned status {}: {}",
                status, body
            )));
        }

        let analysis: ApiAnalysis = response.json().await?;
        Ok(analysis.into())
    }

    async fn try_on(&self, request: &TryOnRequest) -> AppResult<TryOnRender> {
        let response = self
            .post("/try-on")
            .json(&ApiTryOnRequest {
                user_photo: &request.photo.data,
                clothing_items: &request.items,
                lighting_settings: &request.lighting,
                user_analysis: request.profile.as_ref(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "Inference API returned status {}: {}",
                status, body
            )));
        }

        let render: ApiTryOn = response.json().await?;
        Ok(render.into())
    }

    async fn assess_quality(&self, image_url: &str) -> AppResult<f64> {
        let response = self
            .post("/quality")
            .json(&ApiQualityRequest { image_url })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "Inference API returned status {}: {}",
                status, body
            )));
        }

        let quality: ApiQuality = response.json().await?;
        Ok(quality.quality_score)
    }

    fn name(&self) -> &'static str {
        "inference"
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiAnalysisRequest<'a> {
    image_data: &'a str,
    width: u32,
    height: u32,
}

/// Raw analysis response from the inference service
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiAnalysis {
    body_measurements: ApiMeasurements,
    skin_tone: SkinTone,
    body_shape: BodyShape,
    face_shape: FaceShape,
    confidence: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiMeasurements {
    shoulders: f64,
    chest: f64,
    waist: f64,
    hips: f64,
    height: f64,
}

impl From<ApiAnalysis> for UserAnalysisProfile {
    fn from(analysis: ApiAnalysis) -> Self {
        UserAnalysisProfile {
            measurements: BodyMeasurements {
                shoulders: analysis.body_measurements.shoulders,
                chest: analysis.body_measurements.chest,
                waist: analysis.body_measurements.waist,
                hips: analysis.body_measurements.hips,
                height: analysis.body_measurements.height,
            },
            skin_tone: analysis.skin_tone,
            body_shape: analysis.body_shape,
            face_shape: analysis.face_shape,
            confidence: analysis.confidence,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiTryOnRequest<'a> {
    user_photo: &'a str,
    clothing_items: &'a [ClothingItem],
    lighting_settings: &'a LightingSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_analysis: Option<&'a UserAnalysisProfile>,
}

/// Raw try-on response; the envelope is camelCase but the nested fit
/// analysis uses snake_case keys
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTryOn {
    processed_image_url: String,
    fit_analysis: ApiFitAnalysis,
    processing_time: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiFitAnalysis {
    overall_fit: FitRating,
    size_recommendation: Size,
    adjustments_needed: Vec<String>,
    confidence: f64,
}

impl From<ApiTryOn> for TryOnRender {
    fn from(render: ApiTryOn) -> Self {
        TryOnRender {
            processed_image_url: render.processed_image_url,
            fit_analysis: FitAnalysis {
                overall_fit: render.fit_analysis.overall_fit,
                size_recommendation: render.fit_analysis.size_recommendation,
                adjustments_needed: render.fit_analysis.adjustments_needed,
                confidence: render.fit_analysis.confidence,
            },
            processing_time_ms: render.processing_time,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiQualityRequest<'a> {
    image_url: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiQuality {
    quality_score: f64,
}
