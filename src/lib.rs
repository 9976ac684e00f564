//! Web page audit engine: keyword-overlap topic detection, lexicon sentiment
//! with "words to improve", and heuristic SEO/content/visual scoring.

pub mod analyzer;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod lexicon;
pub mod page;
pub mod recommend;
pub mod scoring;
pub mod sentiment;
pub mod tagger;
pub mod text;
pub mod topic;
pub mod trainer;

pub use analyzer::{AnalysisResult, PageAnalyzer};
pub use config::AppConfig;
pub use error::{AnalyzeError, FetchError, StoreError};
pub use fetch::{HttpFetcher, PageFetcher};
pub use page::{HtmlPage, PageMarkup};
pub use topic::TopicModelStore;
