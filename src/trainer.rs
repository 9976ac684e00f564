//! Offline topic-model training from seed pages.
//!
//! Each topic's keywords are the most frequent noun phrases across its seed
//! pages; its sentiment is the mean page polarity. Pages that cannot be
//! fetched are logged and count as neutral.

use std::collections::HashMap;
use std::path::Path;

use crate::error::StoreError;
use crate::fetch::PageFetcher;
use crate::lexicon::SentimentLexicon;
use crate::page::{HtmlPage, PageMarkup};
use crate::tagger::PosTagger;
use crate::topic::{self, TopicModel, TopicModelStore};

const BUNDLED_SEEDS: &str = include_str!("../data/topic_seeds.json");

/// Default number of keywords kept per topic.
pub const DEFAULT_TOP_KEYWORDS: usize = 50;

/// Ordered mapping of topic name to seed URLs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopicSeeds {
    topics: Vec<(String, Vec<String>)>,
}

impl TopicSeeds {
    pub fn new(topics: Vec<(String, Vec<String>)>) -> Self {
        Self { topics }
    }

    pub fn bundled() -> Result<Self, StoreError> {
        Self::from_json(BUNDLED_SEEDS)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parses `{ "<topic>": ["<url>", ...], ... }` keeping topic order.
    pub fn from_json(raw: &str) -> Result<Self, StoreError> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(raw)?;
        let topics = map
            .into_iter()
            .map(|(topic, value)| {
                let urls: Vec<String> =
                    serde_json::from_value(value).map_err(|e| StoreError::InvalidRecord {
                        topic: topic.clone(),
                        reason: e.to_string(),
                    })?;
                Ok((topic, urls))
            })
            .collect::<Result<Vec<_>, StoreError>>()?;
        Ok(Self { topics })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.topics.iter().map(|(t, urls)| (t.as_str(), urls.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

/// Phrase frequencies that remember first-seen order for tie-breaking.
#[derive(Default)]
struct PhraseCounter {
    counts: HashMap<String, (usize, usize)>,
}

impl PhraseCounter {
    fn add(&mut self, phrase: String) {
        let next = self.counts.len();
        self.counts.entry(phrase).or_insert((0, next)).0 += 1;
    }

    fn top(self, n: usize) -> Vec<String> {
        let mut ranked: Vec<(String, (usize, usize))> = self.counts.into_iter().collect();
        ranked.sort_by(|(_, (ca, fa)), (_, (cb, fb))| cb.cmp(ca).then(fa.cmp(fb)));
        ranked.into_iter().take(n).map(|(phrase, _)| phrase).collect()
    }
}

struct PageObservation {
    phrases: Vec<String>,
    polarity: f64,
}

fn observe(html: &str, lexicon: &SentimentLexicon, tagger: &dyn PosTagger) -> PageObservation {
    let text = HtmlPage::parse(html).visible_text();
    PageObservation {
        phrases: topic::candidate_keywords(&text, tagger),
        polarity: lexicon.compound(&text),
    }
}

/// Builds one model per seed topic, in seed order.
pub async fn train_topic_models<F>(
    seeds: &TopicSeeds,
    fetcher: &F,
    lexicon: &SentimentLexicon,
    tagger: &dyn PosTagger,
    top_n: usize,
) -> TopicModelStore
where
    F: PageFetcher + ?Sized,
{
    let mut models = Vec::with_capacity(seeds.len());

    for (topic, urls) in seeds.iter() {
        tracing::info!("📖 Training topic '{}' from {} pages", topic, urls.len());
        let mut counter = PhraseCounter::default();
        let mut polarity_sum = 0.0;

        for url in urls {
            match fetcher.fetch(url).await {
                Ok(page) => {
                    let observation = observe(&page.html, lexicon, tagger);
                    polarity_sum += observation.polarity;
                    for phrase in observation.phrases {
                        counter.add(phrase);
                    }
                }
                Err(e) => tracing::warn!("Skipping {} for '{}': {}", url, topic, e),
            }
        }

        let avg_sentiment = if urls.is_empty() {
            0.0
        } else {
            polarity_sum / urls.len() as f64
        };
        let keywords = counter.top(top_n);
        tracing::info!(
            "✅ Topic '{}': {} keywords, avg sentiment {:.3}",
            topic,
            keywords.len(),
            avg_sentiment
        );
        models.push(TopicModel::new(topic, keywords, avg_sentiment));
    }

    TopicModelStore::new(models)
}

/// Writes the store as pretty JSON via a temp file in the same directory and a
/// rename, so readers never observe a partial file.
pub fn persist(store: &TopicModelStore, path: impl AsRef<Path>) -> Result<(), StoreError> {
    let path = path.as_ref();
    let json = store.to_json_pretty()?;

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    std::fs::write(&tmp, json).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)?;

    tracing::info!("💾 Saved {} topic models to {}", store.len(), path.display());
    Ok(())
}
