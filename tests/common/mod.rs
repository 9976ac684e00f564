use async_trait::async_trait;
use std::collections::HashMap;

use page_analyzer::error::FetchError;
use page_analyzer::fetch::{FetchedPage, PageFetcher};

/// Serves canned HTML; unknown URLs fail with an HTTP 404.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        match self.pages.get(url) {
            Some(html) => Ok(FetchedPage {
                final_url: url.to_string(),
                html: html.clone(),
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

/// A page with 300 body words and none of the structural signals.
#[allow(dead_code)]
pub fn bare_page() -> String {
    let body = vec!["lorem"; 300].join(" ");
    format!("<html><head></head><body><p>{body}</p></body></html>")
}

/// A well-formed travel blog post.
#[allow(dead_code)]
pub const TRAVEL_POST: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Island Hopping</title>
    <meta name="description" content="Two weeks island hopping with a backpack, cheap ferries, a lovely beach resort and friendly hostels.">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="author" content="Sam Rivera">
</head>
<body>
    <h1>Island Hopping</h1>
    <p>Our trip started at the beach resort. The ferry ride was amazing.</p>
    <p>We booked a hostel near the harbour. The beach resort staff were wonderful.</p>
    <img src="/ferry.jpg" alt="Ferry at dawn">
    <img src="/beach.jpg" alt="Empty beach">
    <img src="/hostel.jpg" alt="Hostel courtyard">
    <a href="https://twitter.com/samrivera">Twitter</a>
    <a href="https://x.com/samrivera_alt">X</a>
    <a href="https://github.com/samrivera">Github</a>
</body>
</html>"#;
