use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain a page. Never reaches the scoring logic.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch URL: invalid URL '{0}'")]
    InvalidUrl(String),

    #[error("Failed to fetch URL: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to fetch URL: {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Failure to read or write the persisted topic-model store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("topic store I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("topic store is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("topic '{topic}' has an invalid record: {reason}")]
    InvalidRecord { topic: String, reason: String },
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Please provide a URL.")]
    EmptyUrl,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
