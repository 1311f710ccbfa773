use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheKey, ResponseCache};
use crate::error::{AppError, AppResult};
use crate::models::{
    BodyMeasurements, BodyShape, ClothingItem, ColorSuggestion, ColorSuggestionRequest,
    FaceShape, FitAnalysis, FitRating, ImagePayload, LightingSettings, Outfit, OutfitRequest,
    Recommendation, RecommendationRequest, Size, SkinTone, StylePreferences, TryOnRender,
    TryOnRequest, TryOnResult, UserAnalysisProfile, Variant,
};
use crate::services::metrics::{OperationKind, PerformanceReport, PerformanceTracker};
use crate::services::providers::VisionProvider;
use crate::services::{color_harmony, outfits, recommender, scoring};

/// Confidence attached to fallback analysis profiles and fit heuristics
const FALLBACK_CONFIDENCE: f64 = 0.6;

const MAX_TRY_ON_ITEMS: usize = 5;

const LOW_QUALITY_THRESHOLD: f64 = 70.0;
const LOW_BRIGHTNESS_THRESHOLD: f64 = 80.0;
const HIGH_CONTRAST_THRESHOLD: f64 = 120.0;

/// Retry policy for provider calls
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the initial attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each subsequent one
    pub base_delay: Duration,
    /// Budget for each individual attempt
    pub attempt_timeout: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based)
    fn backoff_delay(&self, retry: u32) -> Duration {
        self.base_delay * 2u32.pow(retry - 1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1_000),
            attempt_timeout: Duration::from_millis(10_000),
        }
    }
}

/// Tunables for the recommendation service
#[derive(Debug, Clone, Copy)]
pub struct ServiceOptions {
    pub retry: RetryPolicy,
    pub cache_ttl: Duration,
    /// Concurrent requests per batch chunk
    pub batch_size: usize,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            cache_ttl: Duration::from_secs(30 * 60),
            batch_size: 10,
        }
    }
}

/// Outcome of a retry-wrapped provider call
enum RetryOutcome<T> {
    /// One of the attempts succeeded
    Success(T),
    /// Every attempt failed with a retryable error; carries the last one
    Exhausted(AppError),
}

/// Recommendation engine with reliability wrapping
///
/// Owns the response cache and latency tracker. Cloning is cheap and clones
/// share both, so the service can be handed to spawned tasks directly.
#[derive(Clone)]
pub struct RecommendationService {
    provider: Arc<dyn VisionProvider>,
    cache: Arc<ResponseCache>,
    metrics: Arc<PerformanceTracker>,
    options: ServiceOptions,
}

impl RecommendationService {
    pub fn new(provider: Arc<dyn VisionProvider>, options: ServiceOptions) -> Self {
        Self {
            provider,
            cache: Arc::new(ResponseCache::new(options.cache_ttl)),
            metrics: Arc::new(PerformanceTracker::new()),
            options,
        }
    }

    /// Analyzes a user photo with retry and degraded fallback
    ///
    /// Exhausted retries synthesize a lower-confidence profile from the
    /// image proportions instead of failing the caller; only invalid input
    /// is surfaced as an error.
    pub async fn analyze_photo(&self, image: &ImagePayload) -> AppResult<UserAnalysisProfile> {
        validate_image(image)?;

        let start = Instant::now();
        let outcome = self
            .retry_with_backoff("analysis", || self.provider.analyze(image))
            .await;
        self.metrics.record(OperationKind::Analysis, start.elapsed());

        let profile = match outcome? {
            RetryOutcome::Success(profile) => profile,
            RetryOutcome::Exhausted(error) => {
                tracing::warn!(
                    error = %error,
                    provider = self.provider.name(),
                    "Analysis retries exhausted, falling back to heuristic profile"
                );
                fallback_profile(image)
            }
        };

        tracing::info!(
            confidence = profile.confidence,
            degraded = profile.is_degraded(),
            "Photo analysis completed"
        );

        Ok(profile)
    }

    /// Ranks a catalog for one request, serving from cache when possible
    ///
    /// Only control-variant requests touch the cache, and results computed
    /// from a degraded profile are never stored.
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> AppResult<Vec<Recommendation>> {
        validate_recommendation_request(request)?;

        let key = CacheKey::recommendations(
            request.profile.body_shape,
            request.profile.skin_tone,
            request.preferences.preferred_styles.clone(),
            request.occasion,
        );

        let cacheable = request.variant == Variant::Control;
        if cacheable {
            if let Some(cached) = self.cache.get(&key) {
                return Ok(cached);
            }
        }

        let start = Instant::now();
        let recommendations = recommender::recommend(
            &request.profile,
            &request.preferences,
            &request.catalog,
            request.occasion,
            request.variant,
        );
        self.metrics
            .record(OperationKind::Recommendation, start.elapsed());

        if cacheable && !request.profile.is_degraded() {
            self.cache.set(&key, recommendations.clone());
        }

        Ok(recommendations)
    }

    /// Processes a batch in fixed-size chunks
    ///
    /// Chunks run sequentially while the requests inside a chunk run
    /// concurrently. Any failure inside a chunk substitutes empty lists for
    /// that entire chunk; other chunks are unaffected, so this never fails
    /// the caller. Results keep request order.
    pub async fn recommend_batch(
        &self,
        requests: Vec<RecommendationRequest>,
    ) -> Vec<Vec<Recommendation>> {
        let total = requests.len();
        let batch_size = self.options.batch_size.max(1);
        let mut results: Vec<Vec<Recommendation>> = Vec::with_capacity(total);

        for (chunk_index, chunk) in requests.chunks(batch_size).enumerate() {
            let mut tasks = Vec::with_capacity(chunk.len());

            for request in chunk {
                let service = self.clone();
                let request = request.clone();
                tasks.push(tokio::spawn(async move { service.recommend(&request).await }));
            }

            let mut chunk_results = Vec::with_capacity(tasks.len());
            let mut chunk_error: Option<AppError> = None;

            for task in tasks {
                match task.await {
                    Ok(Ok(recommendations)) => chunk_results.push(recommendations),
                    Ok(Err(e)) => chunk_error = Some(AppError::Capacity(e.to_string())),
                    Err(e) => chunk_error = Some(AppError::Capacity(e.to_string())),
                }
            }

            match chunk_error {
                None => results.append(&mut chunk_results),
                Some(error) => {
                    tracing::warn!(
                        chunk = chunk_index,
                        size = chunk.len(),
                        error = %error,
                        "Batch chunk failed, substituting empty results"
                    );
                    results.extend(std::iter::repeat_with(Vec::new).take(chunk.len()));
                }
            }
        }

        tracing::info!(requests = total, "Batch recommendation completed");
        results
    }

    /// Composes outfit candidates from a catalog snapshot
    pub fn outfits(&self, request: &OutfitRequest) -> AppResult<Vec<Outfit>> {
        validate_profile(&request.profile)?;
        validate_preferences(&request.preferences)?;

        Ok(outfits::compose_outfits(
            &request.catalog,
            &request.profile,
            &request.preferences,
            request.occasion,
        ))
    }

    /// Suggests colors that pair with a base item
    pub fn color_suggestions(
        &self,
        request: &ColorSuggestionRequest,
    ) -> AppResult<Vec<ColorSuggestion>> {
        validate_profile(&request.profile)?;

        Ok(color_harmony::suggest_colors(&request.item, &request.profile))
    }

    /// Runs the try-on pipeline with retry, fallback, and quality assessment
    pub async fn try_on(&self, request: &TryOnRequest) -> AppResult<TryOnResult> {
        validate_try_on_request(request)?;

        let start = Instant::now();
        let result = self.run_try_on(request, start).await;
        self.metrics.record(OperationKind::TryOn, start.elapsed());

        if let Ok(result) = &result {
            tracing::info!(
                quality_score = result.quality_score,
                fit = ?result.fit_analysis.overall_fit,
                "Virtual try-on completed"
            );
        }

        result
    }

    async fn run_try_on(&self, request: &TryOnRequest, start: Instant) -> AppResult<TryOnResult> {
        let render = match self
            .retry_with_backoff("try-on", || self.provider.try_on(request))
            .await?
        {
            RetryOutcome::Success(render) => render,
            RetryOutcome::Exhausted(error) => {
                tracing::warn!(
                    error = %error,
                    provider = self.provider.name(),
                    "Try-on retries exhausted, falling back to heuristic fit"
                );
                fallback_render(request)
            }
        };

        let quality_score = match self
            .retry_with_backoff("quality-assessment", || {
                self.provider.assess_quality(&render.processed_image_url)
            })
            .await?
        {
            RetryOutcome::Success(score) => score,
            RetryOutcome::Exhausted(error) => {
                tracing::warn!(error = %error, "Quality assessment unavailable, estimating from lighting");
                estimate_quality(&request.lighting)
            }
        };

        let recommendations = improvement_recommendations(quality_score, &request.lighting);

        Ok(TryOnResult {
            processed_image_url: render.processed_image_url,
            fit_analysis: render.fit_analysis,
            processing_time_ms: start.elapsed().as_millis() as u64,
            quality_score,
            recommendations,
        })
    }

    /// Latency report across all tracked operations
    pub fn performance_report(&self) -> PerformanceReport {
        self.metrics.report()
    }

    /// Runs an operation with per-attempt timeout and exponential backoff
    ///
    /// Retryable failures are attempted up to `max_retries` more times; a
    /// fatal error aborts immediately. An elapsed timeout drops (and thereby
    /// cancels) the in-flight attempt.
    async fn retry_with_backoff<T, F, Fut>(
        &self,
        operation: &str,
        mut attempt_fn: F,
    ) -> AppResult<RetryOutcome<T>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let policy = self.options.retry;
        let attempts = policy.max_retries + 1;
        let mut last_error = None;

        for attempt in 1..=attempts {
            match tokio::time::timeout(policy.attempt_timeout, attempt_fn()).await {
                Ok(Ok(value)) => return Ok(RetryOutcome::Success(value)),
                Ok(Err(e)) if e.is_retryable() => {
                    tracing::warn!(operation, attempt, error = %e, "Attempt failed");
                    last_error = Some(e);
                }
                Ok(Err(e)) => return Err(e),
                Err(_) => {
                    let timeout_ms = policy.attempt_timeout.as_millis() as u64;
                    tracing::warn!(operation, attempt, timeout_ms, "Attempt timed out");
                    last_error = Some(AppError::Timeout(timeout_ms));
                }
            }

            if attempt < attempts {
                tokio::time::sleep(policy.backoff_delay(attempt)).await;
            }
        }

        // The loop always runs at least once, so an error was recorded
        let error = last_error
            .unwrap_or_else(|| AppError::Internal("retry loop recorded no error".to_string()));
        Ok(RetryOutcome::Exhausted(error))
    }
}

fn validate_image(image: &ImagePayload) -> AppResult<()> {
    if image.data.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Image data cannot be empty".to_string(),
        ));
    }
    if image.width == 0 || image.height == 0 {
        return Err(AppError::InvalidInput(
            "Image dimensions must be positive".to_string(),
        ));
    }
    Ok(())
}

fn validate_profile(profile: &UserAnalysisProfile) -> AppResult<()> {
    let m = &profile.measurements;
    let all_positive =
        m.shoulders > 0.0 && m.chest > 0.0 && m.waist > 0.0 && m.hips > 0.0 && m.height > 0.0;
    if !all_positive {
        return Err(AppError::InvalidInput(
            "Body measurements must be positive".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&profile.confidence) {
        return Err(AppError::InvalidInput(
            "Profile confidence must be between 0 and 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_preferences(preferences: &StylePreferences) -> AppResult<()> {
    if preferences.price_range.min > preferences.price_range.max {
        return Err(AppError::InvalidInput(
            "Price range minimum cannot exceed maximum".to_string(),
        ));
    }
    Ok(())
}

fn validate_recommendation_request(request: &RecommendationRequest) -> AppResult<()> {
    validate_profile(&request.profile)?;
    validate_preferences(&request.preferences)
}

fn validate_try_on_request(request: &TryOnRequest) -> AppResult<()> {
    validate_image(&request.photo)?;

    if request.items.is_empty() {
        return Err(AppError::InvalidInput(
            "At least one clothing item is required".to_string(),
        ));
    }
    if request.items.len() > MAX_TRY_ON_ITEMS {
        return Err(AppError::InvalidInput(format!(
            "Maximum {} clothing items allowed",
            MAX_TRY_ON_ITEMS
        )));
    }
    if let Some(profile) = &request.profile {
        validate_profile(profile)?;
    }
    Ok(())
}

/// Synthesizes a coarse profile from image proportions
///
/// Portrait images (aspect ratio above 1.3) scale the girth measurements up,
/// landscape images scale them down. The confidence marks the result as
/// degraded.
fn fallback_profile(image: &ImagePayload) -> UserAnalysisProfile {
    let aspect_ratio = image.aspect_ratio();
    let portrait = aspect_ratio > 1.3;

    let height_factor: f64 = if aspect_ratio > 1.5 {
        1.1
    } else if aspect_ratio < 1.2 {
        0.9
    } else {
        1.0
    };

    UserAnalysisProfile {
        measurements: BodyMeasurements {
            shoulders: 42.0,
            chest: (36.0_f64 * if portrait { 1.1 } else { 0.9 }).round(),
            waist: (30.0_f64 * if portrait { 1.0 } else { 0.8 }).round(),
            hips: (38.0_f64 * if portrait { 1.1 } else { 0.9 }).round(),
            height: (168.0 * height_factor).round(),
        },
        skin_tone: SkinTone::Neutral,
        body_shape: BodyShape::Rectangle,
        face_shape: FaceShape::Oval,
        confidence: FALLBACK_CONFIDENCE,
    }
}

/// Heuristic render used when the try-on backend is unavailable
///
/// Returns the unprocessed photo with a fit analysis derived from the body
/// shape table.
fn fallback_render(request: &TryOnRequest) -> TryOnRender {
    let fit = predict_fit(&request.items, request.profile.as_ref());

    TryOnRender {
        processed_image_url: request.photo.data.clone(),
        fit_analysis: FitAnalysis {
            overall_fit: fit,
            size_recommendation: recommend_size(request.profile.as_ref()),
            adjustments_needed: suggest_adjustments(fit),
            confidence: FALLBACK_CONFIDENCE,
        },
        processing_time_ms: 0,
    }
}

/// Fit rating from the mean body shape bonus across the requested items
fn predict_fit(items: &[ClothingItem], profile: Option<&UserAnalysisProfile>) -> FitRating {
    let profile = match profile {
        Some(profile) => profile,
        None => return FitRating::Good,
    };

    let total: f64 = items
        .iter()
        .map(|item| scoring::body_shape_compatibility(profile.body_shape, item.category))
        .sum();
    let mean = total / items.len() as f64;

    if mean >= 14.0 {
        FitRating::Excellent
    } else if mean >= 10.0 {
        FitRating::Good
    } else if mean > scoring::BODY_SHAPE_DEFAULT_BONUS {
        FitRating::Fair
    } else {
        FitRating::Poor
    }
}

/// Size from the chest measurement; defaults to M without a profile
fn recommend_size(profile: Option<&UserAnalysisProfile>) -> Size {
    let chest = match profile {
        Some(profile) => profile.measurements.chest,
        None => return Size::M,
    };

    if chest < 32.0 {
        Size::Xs
    } else if chest < 36.0 {
        Size::S
    } else if chest < 40.0 {
        Size::M
    } else if chest < 44.0 {
        Size::L
    } else if chest < 48.0 {
        Size::Xl
    } else {
        Size::Xxl
    }
}

/// Adjustment guidance keyed by the predicted fit
fn suggest_adjustments(fit: FitRating) -> Vec<String> {
    match fit {
        FitRating::Excellent => vec!["Perfect fit as shown".to_string()],
        FitRating::Good => vec!["Consider tailoring the sleeves".to_string()],
        FitRating::Fair => vec!["Consider sizing up for a more comfortable fit".to_string()],
        FitRating::Poor => vec![
            "This item runs small, size up".to_string(),
            "May need hemming for optimal length".to_string(),
        ],
    }
}

/// Quality estimate from lighting deviations when assessment is unavailable
///
/// Brightness and contrast are nominal at 100; each point of deviation costs
/// a fifth of a quality point.
fn estimate_quality(lighting: &LightingSettings) -> f64 {
    let brightness_penalty = (lighting.brightness - 100.0).abs() * 0.2;
    let contrast_penalty = (lighting.contrast - 100.0).abs() * 0.2;

    (100.0 - brightness_penalty - contrast_penalty).clamp(0.0, 100.0)
}

/// Improvement suggestions from the quality score and lighting settings
fn improvement_recommendations(quality_score: f64, lighting: &LightingSettings) -> Vec<String> {
    let mut recommendations = Vec::new();

    if quality_score < LOW_QUALITY_THRESHOLD {
        recommendations.push("Try adjusting the lighting for better results".to_string());
    }
    if lighting.brightness < LOW_BRIGHTNESS_THRESHOLD {
        recommendations.push("Increase brightness for clearer visualization".to_string());
    }
    if lighting.contrast > HIGH_CONTRAST_THRESHOLD {
        recommendations.push("Reduce contrast for more natural appearance".to_string());
    }

    recommendations
}
