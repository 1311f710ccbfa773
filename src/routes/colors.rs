use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::models::{ColorSuggestionRequest, ColorSuggestionResponse};
use crate::routes::AppState;

/// Handler for color harmony suggestions
pub async fn suggest(
    State(state): State<AppState>,
    Json(request): Json<ColorSuggestionRequest>,
) -> AppResult<Json<ColorSuggestionResponse>> {
    let suggestions = state.service.color_suggestions(&request)?;

    Ok(Json(ColorSuggestionResponse { suggestions }))
}
