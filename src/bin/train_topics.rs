//! Rebuilds the topic-model store from the seed corpus.

use anyhow::{Context, Result};

use page_analyzer::lexicon::SentimentLexicon;
use page_analyzer::tagger::HeuristicTagger;
use page_analyzer::trainer::{self, TopicSeeds};
use page_analyzer::{AppConfig, HttpFetcher};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    let seeds = match &config.topic_seeds_path {
        Some(path) => TopicSeeds::load(path)
            .with_context(|| format!("loading seed corpus from {}", path.display()))?,
        None => TopicSeeds::bundled().context("parsing bundled seed corpus")?,
    };
    tracing::info!("🌱 Training {} topics", seeds.len());

    let fetcher = HttpFetcher::new(config.fetch_timeout);
    let store = trainer::train_topic_models(
        &seeds,
        &fetcher,
        SentimentLexicon::bundled(),
        &HeuristicTagger::new(),
        config.trainer_top_keywords,
    )
    .await;

    trainer::persist(&store, &config.topic_models_path).with_context(|| {
        format!("writing topic models to {}", config.topic_models_path.display())
    })?;

    Ok(())
}
