//! Topic models and keyword-overlap topic detection.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::StoreError;
use crate::tagger::PosTagger;

/// Label returned when no topic matches.
pub const OTHER_TOPIC: &str = "Other";
/// Minimum keyword overlap for a topic to be eligible.
pub const MIN_OVERLAP: usize = 2;
/// Noun phrases must be longer than this many characters to count as keywords.
pub const MIN_KEYWORD_CHARS: usize = 3;

/// One trained topic: its name, keyword set and mean training-page polarity.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicModel {
    pub name: String,
    keywords: Vec<String>,
    keyword_set: HashSet<String>,
    pub avg_sentiment: f64,
}

impl TopicModel {
    /// Keywords are lowercased and deduplicated, keeping first occurrence order.
    pub fn new(name: impl Into<String>, keywords: Vec<String>, avg_sentiment: f64) -> Self {
        let mut keyword_set = HashSet::new();
        let keywords = keywords
            .into_iter()
            .map(|k| k.to_lowercase())
            .filter(|k| keyword_set.insert(k.clone()))
            .collect();
        Self {
            name: name.into(),
            keywords,
            keyword_set,
            avg_sentiment,
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.keyword_set.contains(keyword)
    }
}

/// On-disk shape of one topic.
#[derive(Debug, Serialize, Deserialize)]
struct TopicRecord {
    keywords: Vec<String>,
    avg_sentiment: f64,
}

/// Insertion-ordered, read-only collection of topic models.
#[derive(Debug, Clone, Default)]
pub struct TopicModelStore {
    models: Vec<TopicModel>,
}

impl TopicModelStore {
    pub fn new(models: Vec<TopicModel>) -> Self {
        Self { models }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the store from `path`. A missing file yields an empty store.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(raw) => {
                let store = Self::from_json(&raw)?;
                tracing::info!("📚 Loaded {} topic models from {}", store.len(), path.display());
                Ok(store)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("No topic models at {}. Topic detection will report '{}'.", path.display(), OTHER_TOPIC);
                Ok(Self::empty())
            }
            Err(source) => Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parses `{ "<topic>": { "keywords": [...], "avg_sentiment": f64 }, ... }`,
    /// keeping the document's topic order.
    pub fn from_json(raw: &str) -> Result<Self, StoreError> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(raw)?;
        let models = map
            .into_iter()
            .map(|(topic, value)| {
                let record: TopicRecord =
                    serde_json::from_value(value).map_err(|e| StoreError::InvalidRecord {
                        topic: topic.clone(),
                        reason: e.to_string(),
                    })?;
                Ok(TopicModel::new(topic, record.keywords, record.avg_sentiment))
            })
            .collect::<Result<Vec<_>, StoreError>>()?;
        Ok(Self { models })
    }

    pub fn to_json_pretty(&self) -> Result<String, StoreError> {
        let mut map = serde_json::Map::new();
        for model in &self.models {
            let record = TopicRecord {
                keywords: model.keywords.clone(),
                avg_sentiment: model.avg_sentiment,
            };
            map.insert(model.name.clone(), serde_json::to_value(record)?);
        }
        Ok(serde_json::to_string_pretty(&map)?)
    }

    pub fn get(&self, name: &str) -> Option<&TopicModel> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TopicModel> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Result of topic detection.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicMatch {
    pub topic: String,
    pub matched_keywords: Vec<String>,
}

impl TopicMatch {
    pub fn other() -> Self {
        Self {
            topic: OTHER_TOPIC.to_string(),
            matched_keywords: Vec::new(),
        }
    }

    pub fn is_other(&self) -> bool {
        self.topic == OTHER_TOPIC
    }
}

/// Lowercased noun phrases longer than [`MIN_KEYWORD_CHARS`] characters.
pub fn candidate_keywords(text: &str, tagger: &dyn PosTagger) -> Vec<String> {
    tagger
        .noun_phrases(text)
        .into_iter()
        .map(|p| p.to_lowercase())
        .filter(|p| p.chars().count() > MIN_KEYWORD_CHARS)
        .collect()
}

/// Picks the topic sharing the most keywords with `text`.
///
/// A topic needs at least [`MIN_OVERLAP`] shared keywords; on equal overlap the
/// earlier topic in store order wins. Matched keywords are listed in the
/// winning model's keyword order.
pub fn detect_topic(text: &str, store: &TopicModelStore, tagger: &dyn PosTagger) -> TopicMatch {
    if store.is_empty() {
        return TopicMatch::other();
    }

    let candidates: HashSet<String> = candidate_keywords(text, tagger).into_iter().collect();

    let mut best: Option<(&TopicModel, usize)> = None;
    for model in store.iter() {
        let overlap = candidates.iter().filter(|k| model.contains(k)).count();
        if overlap < MIN_OVERLAP {
            continue;
        }
        if best.map_or(true, |(_, max)| overlap > max) {
            best = Some((model, overlap));
        }
    }

    match best {
        Some((model, overlap)) => {
            tracing::debug!(topic = %model.name, overlap, "topic detected");
            TopicMatch {
                topic: model.name.clone(),
                matched_keywords: model
                    .keywords()
                    .iter()
                    .filter(|k| candidates.contains(*k))
                    .cloned()
                    .collect(),
            }
        }
        None => TopicMatch::other(),
    }
}
