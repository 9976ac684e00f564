use anyhow::Context;
use std::sync::Arc;

use page_analyzer::api::{self, AppState};
use page_analyzer::cache::ResultCache;
use page_analyzer::scoring::{MetricSource, RandomMetricSource, SeededMetricSource};
use page_analyzer::{AppConfig, HttpFetcher, PageAnalyzer, TopicModelStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    let topics = match TopicModelStore::load(&config.topic_models_path) {
        Ok(store) => store,
        Err(e) => {
            tracing::warn!("⚠️ Could not load topic models: {}. Continuing without topics.", e);
            TopicModelStore::empty()
        }
    };

    let metrics: Arc<dyn MetricSource> = match config.metric_seed {
        Some(seed) => {
            tracing::info!("Using seeded placeholder metrics (seed {})", seed);
            Arc::new(SeededMetricSource::new(seed))
        }
        None => Arc::new(RandomMetricSource),
    };

    let state = Arc::new(AppState {
        analyzer: PageAnalyzer::new(Arc::new(topics)).with_metric_source(metrics),
        fetcher: Arc::new(HttpFetcher::new(config.fetch_timeout)),
        cache: ResultCache::new(config.cache_ttl, config.cache_max_entries),
    });

    let app = api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!("🚀 Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
