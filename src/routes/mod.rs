use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};
use crate::services::RecommendationService;

pub mod analysis;
pub mod colors;
pub mod metrics;
pub mod outfits;
pub mod recommendations;
pub mod try_on;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: RecommendationService,
}

/// Creates the application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/analysis", post(analysis::analyze))
        .route("/recommendations", post(recommendations::recommend))
        .route(
            "/recommendations/batch",
            post(recommendations::recommend_batch),
        )
        .route("/outfits", post(outfits::compose))
        .route("/colors", post(colors::suggest))
        .route("/try-on", post(try_on::process))
        .route("/metrics/performance", get(metrics::performance))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
