use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::models::{AnalysisRequest, AnalysisResponse};
use crate::routes::AppState;

/// Handler for photo analysis requests
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> AppResult<Json<AnalysisResponse>> {
    let profile = state.service.analyze_photo(&request.image).await?;

    Ok(Json(AnalysisResponse::from(profile)))
}
