use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::models::{OutfitRequest, OutfitResponse};
use crate::routes::AppState;

/// Handler for outfit composition requests
pub async fn compose(
    State(state): State<AppState>,
    Json(request): Json<OutfitRequest>,
) -> AppResult<Json<OutfitResponse>> {
    let outfits = state.service.outfits(&request)?;

    Ok(Json(OutfitResponse { outfits }))
}
