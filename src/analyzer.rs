//! The analysis pipeline: page markup in, [`AnalysisResult`] out.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::AnalyzeError;
use crate::fetch::PageFetcher;
use crate::lexicon::SentimentLexicon;
use crate::page::{HtmlPage, PageMarkup, PageSignals};
use crate::recommend::{self, SocialLink};
use crate::scoring::{self, CategoryScore, Issue, MetricSource, RandomMetricSource};
use crate::sentiment::{self, SentimentResult};
use crate::tagger::{HeuristicTagger, PosTagger};
use crate::topic::{self, TopicModelStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Categories {
    pub seo: CategoryScore,
    pub content: CategoryScore,
    pub visual: CategoryScore,
}

/// Full audit report for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    pub overall_score: u32,
    pub author: String,
    pub social_links: Vec<SocialLink>,
    pub topic: String,
    pub matched_keywords: Vec<String>,
    pub sentiment: SentimentResult,
    pub categories: Categories,
    pub recommendations: Vec<Issue>,
}

/// Shared, thread-safe analysis engine.
///
/// Holds the read-only topic store and the shared lexicon plus the pluggable
/// tagger and placeholder-metric source. Cloning is cheap.
#[derive(Clone)]
pub struct PageAnalyzer {
    topics: Arc<TopicModelStore>,
    lexicon: Arc<SentimentLexicon>,
    tagger: Arc<dyn PosTagger>,
    metrics: Arc<dyn MetricSource>,
}

impl PageAnalyzer {
    pub fn new(topics: Arc<TopicModelStore>) -> Self {
        Self {
            topics,
            lexicon: SentimentLexicon::shared(),
            tagger: Arc::new(HeuristicTagger::new()),
            metrics: Arc::new(RandomMetricSource),
        }
    }

    pub fn with_tagger(mut self, tagger: Arc<dyn PosTagger>) -> Self {
        self.tagger = tagger;
        self
    }

    pub fn with_metric_source(mut self, metrics: Arc<dyn MetricSource>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn topics(&self) -> &TopicModelStore {
        &self.topics
    }

    /// Runs the whole pipeline over already-parsed markup. Never fails; empty
    /// pages produce zero scores and the matching issues.
    pub fn analyze(&self, markup: &dyn PageMarkup) -> AnalysisResult {
        let text = markup.visible_text();
        let signals = PageSignals::extract(markup);

        let topic = topic::detect_topic(&text, &self.topics, self.tagger.as_ref());
        let sentiment = sentiment::analyze_sentiment(&text, &self.lexicon, self.tagger.as_ref());
        let scores = scoring::score_page(&signals, &sentiment, self.metrics.as_ref());
        let social_links = recommend::detect_social_links(&signals.links);
        let (recommendations, overall_score) = recommend::aggregate(&scores, &social_links);

        AnalysisResult {
            overall_score,
            author: signals.author,
            social_links,
            topic: topic.topic,
            matched_keywords: topic.matched_keywords,
            sentiment,
            categories: Categories {
                seo: scores.seo.category,
                content: scores.content.category,
                visual: scores.visual.category,
            },
            recommendations,
        }
    }

    pub fn analyze_html(&self, html: &str) -> AnalysisResult {
        self.analyze(&HtmlPage::parse(html))
    }

    /// Fetches `url` and analyzes the returned page.
    pub async fn analyze_url<F>(&self, fetcher: &F, url: &str) -> Result<AnalysisResult, AnalyzeError>
    where
        F: PageFetcher + ?Sized,
    {
        let url = url.trim();
        if url.is_empty() {
            return Err(AnalyzeError::EmptyUrl);
        }

        let page = fetcher.fetch(url).await?;
        let result = self.analyze_html(&page.html);
        tracing::info!(
            url = %page.final_url,
            overall = result.overall_score,
            topic = %result.topic,
            "✅ Analysis complete"
        );
        Ok(result)
    }
}
