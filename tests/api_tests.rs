use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use serde_json::{json, Value};

use stylist_api::error::{AppError, AppResult};
use stylist_api::models::{
    BodyMeasurements, BodyShape, FaceShape, FitAnalysis, FitRating, ImagePayload, Size, SkinTone,
    TryOnRender, TryOnRequest, UserAnalysisProfile,
};
use stylist_api::routes::{create_router, AppState};
use stylist_api::services::{
    providers::VisionProvider, RecommendationService, RetryPolicy, ServiceOptions,
};

/// Provider returning canned successful responses
struct StubProvider;

#[async_trait::async_trait]
impl VisionProvider for StubProvider {
    async fn analyze(&self, _image: &ImagePayload) -> AppResult<UserAnalysisProfile> {
        Ok(UserAnalysisProfile {
            measurements: BodyMeasurements {
                shoulders: 40.0,
                chest: 36.0,
                waist: 28.0,
                hips: 38.0,
                height: 168.0,
            },
            skin_tone: SkinTone::Warm,
            body_shape: BodyShape::Hourglass,
            face_shape: FaceShape::Oval,
            confidence: 0.92,
        })
    }

    async fn try_on(&self, request: &TryOnRequest) -> AppResult<TryOnRender> {
        Ok(TryOnRender {
            processed_image_url: format!("{}?processed=1", request.photo.data),
            fit_analysis: FitAnalysis {
                overall_fit: FitRating::Good,
                size_recommendation: Size::M,
                adjustments_needed: vec!["Consider tailoring the sleeves".to_string()],
                confidence: 0.88,
            },
            processing_time_ms: 1340,
        })
    }

    async fn assess_quality(&self, _image_url: &str) -> AppResult<f64> {
        Ok(88.0)
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Provider whose calls always fail with a retryable error
struct FailingProvider;

#[async_trait::async_trait]
impl VisionProvider for FailingProvider {
    async fn analyze(&self, _image: &ImagePayload) -> AppResult<UserAnalysisProfile> {
        Err(AppError::Provider("backend unavailable".to_string()))
    }

    async fn try_on(&self, _request: &TryOnRequest) -> AppResult<TryOnRender> {
        Err(AppError::Provider("backend unavailable".to_string()))
    }

    async fn assess_quality(&self, _image_url: &str) -> AppResult<f64> {
        Err(AppError::Provider("backend unavailable".to_string()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

fn create_test_server_with(provider: Arc<dyn VisionProvider>) -> TestServer {
    // Short retry delays keep failure-path tests fast
    let options = ServiceOptions {
        retry: RetryPolicy {
            max_retries: 2,
            base_delay: Duration::from_millis(1),
            attempt_timeout: Duration::from_millis(250),
        },
        cache_ttl: Duration::from_secs(60),
        batch_size: 10,
    };

    let state = AppState {
        service: RecommendationService::new(provider, options),
    };
    TestServer::new(create_router(state)).unwrap()
}

fn create_test_server() -> TestServer {
    create_test_server_with(Arc::new(StubProvider))
}

fn image_json() -> Value {
    json!({
        "data": "base64-photo",
        "width": 400,
        "height": 600
    })
}

fn profile_json() -> Value {
    json!({
        "measurements": {
            "shoulders": 40.0,
            "chest": 36.0,
            "waist": 28.0,
            "hips": 38.0,
            "height": 168.0
        },
        "skin_tone": "warm",
        "body_shape": "hourglass",
        "face_shape": "oval",
        "confidence": 0.92
    })
}

fn preferences_json() -> Value {
    json!({
        "preferred_styles": ["classic"],
        "favorite_colors": ["red"],
        "price_range": { "min": 50.0, "max": 150.0 }
    })
}

fn item_json(id: &str, category: &str, style: &str, colors: Vec<&str>) -> Value {
    json!({
        "id": id,
        "name": format!("Item {}", id),
        "category": category,
        "style": style,
        "colors": colors,
        "price": 100.0,
        "rating": 4.6
    })
}

fn recommendation_request_json() -> Value {
    json!({
        "profile": profile_json(),
        "preferences": preferences_json(),
        "catalog": [
            item_json("dress-1", "dresses", "classic", vec!["red"]),
            item_json("shoes-1", "shoes", "bohemian", vec!["black"])
        ]
    })
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_photo_analysis() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/analysis")
        .json(&json!({ "image": image_json() }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["degraded"], false);
    assert_eq!(body["profile"]["body_shape"], "hourglass");
    assert_eq!(body["profile"]["skin_tone"], "warm");
}

#[tokio::test]
async fn test_photo_analysis_rejects_empty_image() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/analysis")
        .json(&json!({
            "image": { "data": "", "width": 400, "height": 600 }
        }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Image data"));
}

#[tokio::test]
async fn test_analysis_degrades_when_provider_fails() {
    let server = create_test_server_with(Arc::new(FailingProvider));

    let response = server
        .post("/api/v1/analysis")
        .json(&json!({ "image": image_json() }))
        .await;

    // The fallback profile is served instead of an error
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["degraded"], true);
    assert_eq!(body["profile"]["confidence"], 0.6);
    assert_eq!(body["profile"]["body_shape"], "rectangle");
}

#[tokio::test]
async fn test_recommendations() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&recommendation_request_json())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["degraded"], false);

    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 2);

    // The classic red dress is a perfect match for this profile
    assert_eq!(recommendations[0]["item"]["id"], "dress-1");
    assert_eq!(recommendations[0]["score"], 100.0);
    let reasons: Vec<&str> = recommendations[0]["reasons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap())
        .collect();
    assert!(reasons.contains(&"Highly rated by other customers"));

    // Descending score order
    let first = recommendations[0]["score"].as_f64().unwrap();
    let second = recommendations[1]["score"].as_f64().unwrap();
    assert!(first >= second);
}

#[tokio::test]
async fn test_identical_requests_get_identical_recommendations() {
    let server = create_test_server();
    let request = recommendation_request_json();

    let first = server.post("/api/v1/recommendations").json(&request).await;
    let second = server.post("/api/v1/recommendations").json(&request).await;

    first.assert_status_ok();
    second.assert_status_ok();

    let first_body: Value = first.json();
    let second_body: Value = second.json();
    assert_eq!(first_body["recommendations"], second_body["recommendations"]);
}

#[tokio::test]
async fn test_recommendations_reject_inverted_price_range() {
    let server = create_test_server();

    let mut request = recommendation_request_json();
    request["preferences"]["price_range"] = json!({ "min": 200.0, "max": 100.0 });

    let response = server.post("/api/v1/recommendations").json(&request).await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_batch_isolates_failed_chunk() {
    let server = create_test_server();

    // 25 requests in chunks of 10; request 12 poisons the second chunk
    let mut requests = Vec::new();
    for i in 0..25 {
        let mut request = recommendation_request_json();
        if i == 12 {
            request["preferences"]["price_range"] = json!({ "min": 200.0, "max": 100.0 });
        }
        requests.push(request);
    }

    let response = server
        .post("/api/v1/recommendations/batch")
        .json(&json!({ "requests": requests }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 25);

    for (i, result) in results.iter().enumerate() {
        let result = result.as_array().unwrap();
        if (10..20).contains(&i) {
            assert!(result.is_empty(), "request {} should be empty", i);
        } else {
            assert!(!result.is_empty(), "request {} should have results", i);
        }
    }
}

#[tokio::test]
async fn test_outfit_composition() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/outfits")
        .json(&json!({
            "catalog": [
                item_json("top-1", "tops", "classic", vec!["white"]),
                item_json("bottom-1", "bottoms", "classic", vec!["black"]),
                item_json("dress-1", "dresses", "classic", vec!["red"]),
                item_json("coat-1", "outerwear", "classic", vec!["black"])
            ],
            "profile": profile_json(),
            "preferences": preferences_json(),
            "occasion": "work"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let outfits = body["outfits"].as_array().unwrap();
    assert_eq!(outfits.len(), 2);

    for outfit in outfits {
        let items = outfit["items"].as_array().unwrap();
        assert!((1..=3).contains(&items.len()));
    }
}

#[tokio::test]
async fn test_color_suggestions() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/colors")
        .json(&json!({
            "item": item_json("dress-1", "dresses", "classic", vec!["red"]),
            "profile": profile_json()
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let suggestions = body["suggestions"].as_array().unwrap();
    assert!(!suggestions.is_empty());
    assert!(suggestions.len() <= 5);

    // Red flatters a warm skin tone, so the base color leads
    assert_eq!(suggestions[0]["harmony"], "skin-tone-match");
    assert_eq!(suggestions[0]["color"], "red");

    let confidences: Vec<f64> = suggestions
        .iter()
        .map(|s| s["confidence"].as_f64().unwrap())
        .collect();
    for window in confidences.windows(2) {
        assert!(window[0] >= window[1]);
    }
}

#[tokio::test]
async fn test_virtual_try_on() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/try-on")
        .json(&json!({
            "photo": image_json(),
            "items": [item_json("dress-1", "dresses", "classic", vec!["red"])],
            "lighting": {
                "brightness": 100.0,
                "contrast": 100.0,
                "warmth": 50.0,
                "scenario": "natural",
                "intensity": 1.0
            },
            "profile": profile_json()
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["processed_image_url"], "base64-photo?processed=1");
    assert_eq!(body["quality_score"], 88.0);
    assert_eq!(body["fit_analysis"]["overall_fit"], "good");
    assert_eq!(body["fit_analysis"]["size_recommendation"], "M");
}

#[tokio::test]
async fn test_try_on_rejects_too_many_items() {
    let server = create_test_server();

    let items: Vec<Value> = (0..6)
        .map(|i| item_json(&format!("item-{}", i), "tops", "casual", vec!["white"]))
        .collect();

    let response = server
        .post("/api/v1/try-on")
        .json(&json!({
            "photo": image_json(),
            "items": items,
            "lighting": {
                "brightness": 100.0,
                "contrast": 100.0,
                "warmth": 50.0,
                "scenario": "natural",
                "intensity": 1.0
            }
        }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_performance_metrics_are_exposed() {
    let server = create_test_server();

    server
        .post("/api/v1/analysis")
        .json(&json!({ "image": image_json() }))
        .await
        .assert_status_ok();
    server
        .post("/api/v1/recommendations")
        .json(&recommendation_request_json())
        .await
        .assert_status_ok();

    let response = server.get("/api/v1/metrics/performance").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["analysis"]["samples"], 1);
    assert_eq!(body["recommendation"]["samples"], 1);
    assert_eq!(body["try_on"]["samples"], 0);
    assert!(body["analysis"]["avg_ms"].as_f64().unwrap() >= 0.0);
}
