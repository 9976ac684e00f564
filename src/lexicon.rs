//! VADER polarity scoring.
//!
//! Word valences live on a -4.0..=4.0 scale. Text polarity is VADER's compound
//! score in [-1, 1].

use once_cell::sync::Lazy;
use std::sync::Arc;
use vader_sentiment::SentimentIntensityAnalyzer;

static DEFAULT_LEXICON: Lazy<Arc<SentimentLexicon>> = Lazy::new(|| Arc::new(SentimentLexicon::new()));

/// Word-to-valence lookup plus whole-text compound polarity, backed by the
/// VADER lexicon and rules.
pub struct SentimentLexicon {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentLexicon {
    fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// The process-wide lexicon.
    pub fn bundled() -> &'static SentimentLexicon {
        &DEFAULT_LEXICON
    }

    /// Shared handle to [`SentimentLexicon::bundled`].
    pub fn shared() -> Arc<SentimentLexicon> {
        Arc::clone(&DEFAULT_LEXICON)
    }

    /// Raw valence of a single word, case-insensitive.
    pub fn polarity(&self, word: &str) -> Option<f64> {
        vader_sentiment::LEXICON
            .get(&unicase::UniCase::new(word.to_lowercase().as_str()))
            .copied()
    }

    /// Compound polarity of `text` in [-1, 1]. Empty or unscored text yields 0.0.
    pub fn compound(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        self.analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
    }
}

impl std::fmt::Debug for SentimentLexicon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentLexicon")
            .field("words", &vader_sentiment::LEXICON.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_lookup() {
        let lexicon = SentimentLexicon::bundled();
        assert!(lexicon.polarity("bad").is_some_and(|v| v < -2.0));
        assert!(lexicon.polarity("TERRIBLE").is_some_and(|v| v < -2.0));
        assert!(lexicon.polarity("atrocious").is_some_and(|v| v < -0.5));
        assert!(lexicon.polarity("grim").is_some_and(|v| v < -0.5));
        assert_eq!(lexicon.polarity("article"), None);
    }

    #[test]
    fn test_positive_text() {
        let score = SentimentLexicon::bundled().compound("This recipe is amazing and the photos are beautiful.");
        assert!(score >= 0.05, "score was {score}");
    }

    #[test]
    fn test_negative_text() {
        let lexicon = SentimentLexicon::bundled();
        for text in [
            "This article is very bad and terrible but informative.",
            "The service was atrocious.",
            "The outlook is grim.",
            "What a dismal, lousy, horrid experience.",
        ] {
            let score = lexicon.compound(text);
            assert!(score <= -0.05, "{text}: score was {score}");
        }
    }

    #[test]
    fn test_negation_flips_polarity() {
        let lexicon = SentimentLexicon::bundled();
        assert!(lexicon.compound("The service was good") > 0.0);
        assert!(lexicon.compound("The service was not good") < 0.0);
    }

    #[test]
    fn test_booster_intensifies() {
        let lexicon = SentimentLexicon::bundled();
        assert!(lexicon.compound("very good") > lexicon.compound("good"));
        assert!(lexicon.compound("very bad") < lexicon.compound("bad"));
    }

    #[test]
    fn test_empty_and_neutral_text() {
        let lexicon = SentimentLexicon::bundled();
        assert_eq!(lexicon.compound(""), 0.0);
        assert_eq!(lexicon.compound("   "), 0.0);
        assert_eq!(lexicon.compound("The train leaves at noon."), 0.0);
    }

    #[test]
    fn test_compound_is_bounded() {
        let text = "awesome ".repeat(200);
        let score = SentimentLexicon::bundled().compound(&text);
        assert!(score <= 1.0 && score > 0.9);
    }

    #[test]
    fn test_shared_handle_points_at_bundled_lexicon() {
        let a = SentimentLexicon::shared();
        let b = SentimentLexicon::shared();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(std::ptr::eq(a.as_ref(), SentimentLexicon::bundled()));
    }
}
