use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::models::{TryOnRequest, TryOnResult};
use crate::routes::AppState;

/// Handler for virtual try-on requests
pub async fn process(
    State(state): State<AppState>,
    Json(request): Json<TryOnRequest>,
) -> AppResult<Json<TryOnResult>> {
    tracing::info!(items = request.items.len(), "Try-on request received");

    let result = state.service.try_on(&request).await?;

    Ok(Json(result))
}
