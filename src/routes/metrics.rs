use axum::{extract::State, Json};

use crate::routes::AppState;
use crate::services::metrics::PerformanceReport;

/// Handler for the latency report endpoint
pub async fn performance(State(state): State<AppState>) -> Json<PerformanceReport> {
    Json(state.service.performance_report())
}
