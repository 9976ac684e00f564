//! Sentiment labelling and "words to improve" extraction.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

use crate::lexicon::SentimentLexicon;
use crate::tagger::PosTagger;

/// Compound score at or above which text is Positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound score at or below which text is Negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;
/// Lexicon valence below which a descriptive word is worth revising.
pub const IMPROVEMENT_VALENCE: f64 = -0.5;
/// Maximum number of improvement suggestions.
pub const MAX_IMPROVEMENTS: usize = 5;

const CONTEXT_WINDOW: usize = 3;
const SUGGESTION: &str = "Consider a more positive alternative";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn from_score(score: f64) -> Self {
        if score >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if score <= NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

/// A negative adjective or adverb found in the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Improvement {
    pub word: String,
    pub context: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SentimentResult {
    /// Compound polarity in [-1, 1]
    #[serde(rename = "score")]
    pub compound_score: f64,
    pub label: SentimentLabel,
    pub improvements: Vec<Improvement>,
}

/// Scores `text` and collects up to five distinct strongly negative
/// adjectives/adverbs, in order of first appearance.
pub fn analyze_sentiment(
    text: &str,
    lexicon: &SentimentLexicon,
    tagger: &dyn PosTagger,
) -> SentimentResult {
    let compound_score = lexicon.compound(text);
    let label = SentimentLabel::from_score(compound_score);

    let tagged = tagger.pos_tag(text);
    let mut seen = HashSet::new();
    let mut improvements = Vec::new();

    for (i, tagged_word) in tagged.iter().enumerate() {
        if improvements.len() >= MAX_IMPROVEMENTS {
            break;
        }
        if !(tagged_word.tag.is_adjective() || tagged_word.tag.is_adverb()) {
            continue;
        }
        let negative = lexicon
            .polarity(&tagged_word.word)
            .is_some_and(|valence| valence < IMPROVEMENT_VALENCE);
        if !negative || !seen.insert(tagged_word.word.to_lowercase()) {
            continue;
        }

        let from = i.saturating_sub(CONTEXT_WINDOW);
        let to = (i + CONTEXT_WINDOW + 1).min(tagged.len());
        let snippet: Vec<&str> = tagged[from..to].iter().map(|t| t.word.as_str()).collect();

        improvements.push(Improvement {
            word: tagged_word.word.clone(),
            context: format!("...{}...", snippet.join(" ")),
            suggestion: SUGGESTION.to_string(),
        });
    }

    tracing::debug!(
        score = compound_score,
        ?label,
        improvements = improvements.len(),
        "sentiment analyzed"
    );

    SentimentResult {
        compound_score,
        label,
        improvements,
    }
}
