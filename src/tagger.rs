//! Part-of-speech tagging and noun-phrase extraction.
//!
//! The analyzer only depends on the [`PosTagger`] trait. [`HeuristicTagger`]
//! is a rule-based implementation: closed word classes come from fixed lists,
//! open classes are guessed from suffixes and capitalization.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::text;

/// Longest noun phrase emitted, in words.
const MAX_PHRASE_WORDS: usize = 4;

/// Coarse Penn-style part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Noun,
    PluralNoun,
    ProperNoun,
    Adjective,
    ComparativeAdjective,
    SuperlativeAdjective,
    Adverb,
    ComparativeAdverb,
    SuperlativeAdverb,
    Verb,
    PastVerb,
    Gerund,
    Modal,
    Determiner,
    Preposition,
    Pronoun,
    Conjunction,
    Number,
}

impl PosTag {
    /// Penn Treebank code for the tag.
    pub fn penn(&self) -> &'static str {
        match self {
            PosTag::Noun => "NN",
            PosTag::PluralNoun => "NNS",
            PosTag::ProperNoun => "NNP",
            PosTag::Adjective => "JJ",
            PosTag::ComparativeAdjective => "JJR",
            PosTag::SuperlativeAdjective => "JJS",
            PosTag::Adverb => "RB",
            PosTag::ComparativeAdverb => "RBR",
            PosTag::SuperlativeAdverb => "RBS",
            PosTag::Verb => "VB",
            PosTag::PastVerb => "VBD",
            PosTag::Gerund => "VBG",
            PosTag::Modal => "MD",
            PosTag::Determiner => "DT",
            PosTag::Preposition => "IN",
            PosTag::Pronoun => "PRP",
            PosTag::Conjunction => "CC",
            PosTag::Number => "CD",
        }
    }

    pub fn is_noun(&self) -> bool {
        matches!(self, PosTag::Noun | PosTag::PluralNoun | PosTag::ProperNoun)
    }

    pub fn is_adjective(&self) -> bool {
        matches!(
            self,
            PosTag::Adjective | PosTag::ComparativeAdjective | PosTag::SuperlativeAdjective
        )
    }

    pub fn is_adverb(&self) -> bool {
        matches!(
            self,
            PosTag::Adverb | PosTag::ComparativeAdverb | PosTag::SuperlativeAdverb
        )
    }
}

/// A word together with its tag, in text order.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedWord {
    pub word: String,
    pub tag: PosTag,
}

/// Tagging capability consumed by the topic classifier, the sentiment
/// analyzer and the trainer.
pub trait PosTagger: Send + Sync {
    /// Tags every word of `text` in order.
    fn pos_tag(&self, text: &str) -> Vec<TaggedWord>;

    /// Noun phrases found in `text`, in order of appearance, original case.
    fn noun_phrases(&self, text: &str) -> Vec<String>;
}

static DETERMINERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any",
        "all", "both", "either", "neither", "no", "another", "such", "what", "which",
        "whose", "my", "your", "his", "her", "its", "our", "their",
    ]
    .into_iter()
    .collect()
});

static PREPOSITIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "about", "above", "across", "after", "against", "along", "among", "around", "as",
        "at", "before", "behind", "below", "beneath", "beside", "between", "beyond", "by",
        "despite", "down", "during", "except", "for", "from", "in", "inside", "into", "like",
        "near", "of", "off", "on", "onto", "out", "outside", "over", "past", "since",
        "through", "throughout", "to", "toward", "towards", "under", "until", "up", "upon",
        "via", "with", "within", "without", "if", "because", "while", "although", "though",
        "unless", "whether", "than",
    ]
    .into_iter()
    .collect()
});

static PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "i", "me", "we", "us", "you", "he", "him", "she", "it", "they", "them", "myself",
        "yourself", "himself", "herself", "itself", "ourselves", "themselves", "who",
        "whom", "mine", "yours", "ours", "theirs", "someone", "anyone", "everyone",
        "something", "anything", "everything", "nothing", "nobody", "one",
    ]
    .into_iter()
    .collect()
});

static CONJUNCTIONS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| vec!["and", "or", "but", "nor", "yet", "so", "plus"].into_iter().collect());

static VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "is", "are", "was", "were", "be", "been", "am", "has", "have", "had", "do", "does",
        "did", "get", "gets", "got", "make", "makes", "made", "go", "goes", "went", "take",
        "takes", "took", "see", "seen", "saw", "know", "knew", "think", "say", "says",
        "said", "come", "came", "give", "gave", "find", "found", "let", "keep", "try",
        "use", "want", "need", "feel", "felt", "look", "looks", "seem", "seems", "read",
        "write", "wrote", "visit", "share", "click", "subscribe", "sign", "join", "check",
    ]
    .into_iter()
    .collect()
});

static MODALS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec!["can", "could", "may", "might", "must", "shall", "should", "will", "would"]
        .into_iter()
        .collect()
});

static ADVERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "very", "really", "too", "quite", "rather", "always", "never", "often", "sometimes",
        "not", "just", "also", "well", "almost", "still", "already", "here", "there", "now",
        "then", "soon", "again", "ever", "even", "only", "perhaps", "maybe", "much",
        "indeed", "yet", "away", "back", "instead", "once", "twice", "today", "tomorrow",
        "yesterday", "fast", "hard", "somewhat", "pretty", "n't",
    ]
    .into_iter()
    .collect()
});

static ADJECTIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "bad", "good", "great", "poor", "nice", "fine", "new", "old", "big", "small",
        "large", "little", "long", "short", "high", "low", "young", "early", "late",
        "hot", "cold", "warm", "cool", "fresh", "easy", "hard", "free", "full", "empty",
        "true", "false", "real", "main", "whole", "same", "different", "other", "own",
        "sad", "mad", "ugly", "cheap", "rich", "dark", "light", "bright", "quick", "slow",
        "weak", "strong", "dull", "wrong", "right", "sweet", "bitter", "rude", "lame",
        "dumb", "awful", "terrible", "horrible", "nasty", "lousy", "crappy", "messy",
        "boring", "annoying", "amazing", "interesting", "exciting", "stunning",
        "disappointing", "frustrating", "confusing", "depressing", "shocking",
        "disgusting", "pathetic", "stupid", "mediocre", "lazy", "sloppy", "clumsy",
        "happy", "pretty", "lovely", "tasty", "yummy", "crazy", "silly", "smart", "wise",
        "best", "worst", "better", "worse", "next", "last", "first", "few", "many",
        "several", "favorite", "perfect", "excellent", "superb", "brilliant", "gross",
        "dismal", "horrid", "grim", "vile", "bleak", "gloomy", "dire", "tragic", "harsh",
        "unpleasant", "dreadful", "worthless",
    ]
    .into_iter()
    .collect()
});

// Nouns that look like -ly adverbs.
static LY_NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "family", "supply", "reply", "italy", "july", "belly", "jelly", "rally", "ally",
        "bully", "fly", "butterfly", "assembly", "anomaly", "monopoly", "melody", "holly",
        "lily", "emily", "sally", "daily", "weekly", "monthly", "quarterly",
    ]
    .into_iter()
    .collect()
});

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "ical", "less", "ish", "ian"];

/// Rule-based tagger. Stateless and cheap to share.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTagger;

impl HeuristicTagger {
    pub fn new() -> Self {
        Self
    }

    fn tag_word(word: &str, sentence_start: bool) -> PosTag {
        let lower = word.to_lowercase();
        let w = lower.as_str();

        if w.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            return PosTag::Number;
        }
        if DETERMINERS.contains(w) {
            return PosTag::Determiner;
        }
        if PRONOUNS.contains(w) {
            return PosTag::Pronoun;
        }
        if CONJUNCTIONS.contains(w) {
            return PosTag::Conjunction;
        }
        if PREPOSITIONS.contains(w) {
            return PosTag::Preposition;
        }
        if MODALS.contains(w) {
            return PosTag::Modal;
        }
        if VERBS.contains(w) || w.ends_with("n't") {
            return PosTag::Verb;
        }
        match w {
            "more" | "less" => return PosTag::ComparativeAdverb,
            "most" | "least" => return PosTag::SuperlativeAdverb,
            "better" | "worse" => return PosTag::ComparativeAdjective,
            "best" | "worst" => return PosTag::SuperlativeAdjective,
            _ => {}
        }
        if ADVERBS.contains(w) {
            return PosTag::Adverb;
        }
        if ADJECTIVES.contains(w) {
            return PosTag::Adjective;
        }
        if w.len() > 4 && w.ends_with("ly") && !LY_NOUNS.contains(w) {
            return PosTag::Adverb;
        }
        if w.len() > 5 && ADJECTIVE_SUFFIXES.iter().any(|suffix| w.ends_with(suffix)) {
            return PosTag::Adjective;
        }
        if w.len() > 4 && w.ends_with("ing") {
            return PosTag::Gerund;
        }
        if w.len() > 4 && w.ends_with("ed") {
            return PosTag::PastVerb;
        }
        if !sentence_start && word.chars().next().is_some_and(char::is_uppercase) {
            return PosTag::ProperNoun;
        }
        if w.len() > 3 && w.ends_with('s') && !w.ends_with("ss") && !w.ends_with("us") {
            return PosTag::PluralNoun;
        }
        PosTag::Noun
    }

    fn tag_segment(segment: &str) -> Vec<TaggedWord> {
        text::words(segment)
            .into_iter()
            .enumerate()
            .map(|(i, word)| TaggedWord {
                tag: Self::tag_word(word, i == 0),
                word: word.to_string(),
            })
            .collect()
    }
}

impl PosTagger for HeuristicTagger {
    fn pos_tag(&self, text: &str) -> Vec<TaggedWord> {
        text::segments(text).flat_map(Self::tag_segment).collect()
    }

    fn noun_phrases(&self, text: &str) -> Vec<String> {
        let mut phrases = Vec::new();
        for segment in text::segments(text) {
            let tagged = Self::tag_segment(segment);
            let mut run: Vec<&TaggedWord> = Vec::new();
            for word in tagged.iter().chain(std::iter::once(&STOP_WORD)) {
                if word.tag.is_noun() || word.tag.is_adjective() {
                    run.push(word);
                    continue;
                }
                if let Some(phrase) = chunk_phrase(&run) {
                    phrases.push(phrase);
                }
                run.clear();
            }
        }
        phrases
    }
}

// Sentinel that closes the final run of a segment.
static STOP_WORD: TaggedWord = TaggedWord {
    word: String::new(),
    tag: PosTag::Conjunction,
};

/// Turns a run of adjectives and nouns into a phrase ending in its last noun.
fn chunk_phrase(run: &[&TaggedWord]) -> Option<String> {
    let last_noun = run.iter().rposition(|w| w.tag.is_noun())?;
    let start = (last_noun + 1).saturating_sub(MAX_PHRASE_WORDS);
    let words: Vec<&str> = run[start..=last_noun].iter().map(|w| w.word.as_str()).collect();
    Some(words.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<(String, &'static str)> {
        HeuristicTagger
            .pos_tag(text)
            .into_iter()
            .map(|t| (t.word, t.tag.penn()))
            .collect()
    }

    #[test]
    fn test_tags_adjectives_and_adverbs() {
        let tagged = tags("This article is very bad and terrible but informative.");
        assert_eq!(
            tagged,
            vec![
                ("This".to_string(), "DT"),
                ("article".to_string(), "NN"),
                ("is".to_string(), "VB"),
                ("very".to_string(), "RB"),
                ("bad".to_string(), "JJ"),
                ("and".to_string(), "CC"),
                ("terrible".to_string(), "JJ"),
                ("but".to_string(), "CC"),
                ("informative".to_string(), "JJ"),
            ]
        );
    }

    #[test]
    fn test_ly_suffix_is_adverb_unless_known_noun() {
        assert_eq!(HeuristicTagger::tag_word("horribly", false), PosTag::Adverb);
        assert_eq!(HeuristicTagger::tag_word("family", false), PosTag::Noun);
    }

    #[test]
    fn test_capitalized_mid_sentence_is_proper_noun() {
        assert_eq!(HeuristicTagger::tag_word("Lisbon", false), PosTag::ProperNoun);
        assert_eq!(HeuristicTagger::tag_word("Lisbon", true), PosTag::Noun);
    }

    #[test]
    fn test_noun_phrases_chunk_adjective_noun_runs() {
        let phrases = HeuristicTagger.noun_phrases("The best chocolate cake recipe is here. Try fresh basil, please");
        assert_eq!(phrases, vec!["best chocolate cake recipe", "fresh basil", "please"]);
    }

    #[test]
    fn test_noun_phrases_drop_trailing_adjectives() {
        let phrases = HeuristicTagger.noun_phrases("we made pasta fresh");
        assert_eq!(phrases, vec!["pasta"]);
    }

    #[test]
    fn test_noun_phrases_empty_text() {
        assert!(HeuristicTagger.noun_phrases("").is_empty());
        assert!(HeuristicTagger.pos_tag("   ").is_empty());
    }
}
