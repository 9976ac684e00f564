use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::trainer::DEFAULT_TOP_KEYWORDS;

/// Runtime settings read from the environment (and `.env`, if present).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub topic_models_path: PathBuf,
    /// `None` means the bundled seed corpus.
    pub topic_seeds_path: Option<PathBuf>,
    pub trainer_top_keywords: usize,
    pub fetch_timeout: Duration,
    pub cache_ttl: Duration,
    pub cache_max_entries: usize,
    /// Seeds placeholder metrics when set.
    pub metric_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            topic_models_path: PathBuf::from("topic_models.json"),
            topic_seeds_path: None,
            trainer_top_keywords: DEFAULT_TOP_KEYWORDS,
            fetch_timeout: Duration::from_secs(15),
            cache_ttl: Duration::from_secs(3600),
            cache_max_entries: 256,
            metric_seed: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unparseable values fall back to
    /// the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            bind_addr: get("ANALYZER_BIND_ADDR").unwrap_or(defaults.bind_addr),
            topic_models_path: get("TOPIC_MODELS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.topic_models_path),
            topic_seeds_path: get("TOPIC_SEEDS_PATH").map(PathBuf::from),
            trainer_top_keywords: parse_or(
                "TRAINER_TOP_KEYWORDS",
                get("TRAINER_TOP_KEYWORDS"),
                defaults.trainer_top_keywords,
            ),
            fetch_timeout: Duration::from_secs(parse_or(
                "FETCH_TIMEOUT_SECS",
                get("FETCH_TIMEOUT_SECS"),
                defaults.fetch_timeout.as_secs(),
            )),
            cache_ttl: Duration::from_secs(parse_or(
                "CACHE_TTL_SECS",
                get("CACHE_TTL_SECS"),
                defaults.cache_ttl.as_secs(),
            )),
            cache_max_entries: parse_or(
                "CACHE_MAX_ENTRIES",
                get("CACHE_MAX_ENTRIES"),
                defaults.cache_max_entries,
            ),
            metric_seed: get("METRIC_SEED").and_then(|raw| match raw.parse() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    tracing::warn!("Ignoring invalid METRIC_SEED '{}'", raw);
                    None
                }
            }),
        }
    }
}

fn parse_or<T: FromStr + std::fmt::Display>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {} '{}', using default {}", key, raw, default);
            default
        }),
    }
}
