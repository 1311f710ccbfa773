use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{ImagePayload, TryOnRender, TryOnRequest, UserAnalysisProfile};

pub mod inference;

pub use inference::InferenceProvider;

/// Trait for vision analysis backends
///
/// Implementations return domain types; transient failures surface as
/// retryable errors and are handled by the calling service's retry and
/// fallback machinery.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Analyzes a user photo into a measurement profile
    async fn analyze(&self, image: &ImagePayload) -> AppResult<UserAnalysisProfile>;

    /// Renders a try-on composition for the requested items
    async fn try_on(&self, request: &TryOnRequest) -> AppResult<TryOnRender>;

    /// Scores the visual quality of a processed image, in [0, 100]
    async fn assess_quality(&self, image_url: &str) -> AppResult<f64>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
