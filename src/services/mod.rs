pub mod color_harmony;
pub mod engine;
pub mod metrics;
pub mod outfits;
pub mod providers;
pub mod recommender;
pub mod scoring;

pub use engine::{RecommendationService, RetryPolicy, ServiceOptions};
