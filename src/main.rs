use std::sync::Arc;
use std::time::Duration;

use stylist_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{
        providers::InferenceProvider, RecommendationService, RetryPolicy, ServiceOptions,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stylist_api=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    let provider = Arc::new(InferenceProvider::new(
        config.inference_api_url.clone(),
        config.inference_api_key.clone(),
    ));

    let options = ServiceOptions {
        retry: RetryPolicy {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
            attempt_timeout: Duration::from_millis(config.request_timeout_ms),
        },
        cache_ttl: Duration::from_secs(config.cache_ttl_secs),
        batch_size: config.batch_size,
    };

    let state = AppState {
        service: RecommendationService::new(provider, options),
    };
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, inference_api = %config.inference_api_url, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
