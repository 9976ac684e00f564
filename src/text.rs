//! Shared tokenization helpers for the tagger and page statistics.

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z'\-]*|[0-9]+(?:[.,][0-9]+)*").unwrap());

// Phrase-breaking punctuation: a noun phrase never spans one of these.
static SEGMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[.!?,;:()\[\]{}"|/\n\r\t]+"#).unwrap());

/// Splits text into word tokens, keeping inner apostrophes and hyphens.
pub fn words(text: &str) -> Vec<&str> {
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['\'', '-']))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Splits text at sentence and clause punctuation.
pub fn segments(text: &str) -> impl Iterator<Item = &str> {
    SEGMENT_RE.split(text).map(str::trim).filter(|s| !s.is_empty())
}

/// Whitespace-delimited word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
