use axum::{extract::State, Json};
use chrono::Utc;

use crate::error::AppResult;
use crate::models::{
    BatchRecommendationRequest, BatchRecommendationResponse, RecommendationRequest,
    RecommendationResponse,
};
use crate::routes::AppState;

/// Handler for single recommendation requests
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        catalog_size = request.catalog.len(),
        occasion = ?request.occasion,
        variant = %request.variant,
        "Recommendation request received"
    );

    let degraded = request.profile.is_degraded();
    let recommendations = state.service.recommend(&request).await?;

    Ok(Json(RecommendationResponse {
        recommendations,
        generated_at: Utc::now(),
        degraded,
    }))
}

/// Handler for batched recommendation requests
///
/// Always succeeds; failed chunks surface as empty result lists.
pub async fn recommend_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchRecommendationRequest>,
) -> AppResult<Json<BatchRecommendationResponse>> {
    tracing::info!(
        requests = request.requests.len(),
        "Batch recommendation request received"
    );

    let results = state.service.recommend_batch(request.requests).await;

    Ok(Json(BatchRecommendationResponse { results }))
}
