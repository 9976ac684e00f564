//! SEO, content and visual category scoring.
//!
//! Each category has three metrics in a fixed order; the category score is the
//! floor of their mean. Metrics that are not measured from the page (keyword
//! density, readability, grammar, color scheme) come from a [`MetricSource`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::sync::Mutex;
use utoipa::ToSchema;

use crate::page::PageSignals;
use crate::sentiment::SentimentResult;

pub const KEYWORDS_RANGE: RangeInclusive<u32> = 60..=90;
pub const READABILITY_RANGE: RangeInclusive<u32> = 70..=95;
pub const GRAMMAR_RANGE: RangeInclusive<u32> = 75..=98;
pub const COLOR_SCHEME_RANGE: RangeInclusive<u32> = 80..=100;

const META_DESCRIPTION_MIN_CHARS: usize = 50;
const META_DESCRIPTION_MAX_CHARS: usize = 160;
const TARGET_WORD_COUNT: usize = 1000;
const MIN_IMAGES: usize = 3;
const ALT_TEXT_PENALTY: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A recommendation raised while scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Issue {
    pub priority: Priority,
    pub title: String,
    pub description: String,
}

impl Issue {
    pub fn new(priority: Priority, title: &str, description: impl Into<String>) -> Self {
        Self {
            priority,
            title: title.to_string(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryMetric {
    pub name: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryScore {
    pub score: u32,
    pub metrics: Vec<CategoryMetric>,
}

impl CategoryScore {
    /// Builds a category from `(name, value)` pairs; values are capped at 100.
    pub fn from_metrics(metrics: &[(&str, u32)]) -> Self {
        let metrics: Vec<CategoryMetric> = metrics
            .iter()
            .map(|(name, value)| CategoryMetric {
                name: name.to_string(),
                value: (*value).min(100),
            })
            .collect();
        let score = if metrics.is_empty() {
            0
        } else {
            metrics.iter().map(|m| m.value).sum::<u32>() / metrics.len() as u32
        };
        Self { score, metrics }
    }

    pub fn metric(&self, name: &str) -> Option<u32> {
        self.metrics.iter().find(|m| m.name == name).map(|m| m.value)
    }
}

/// A scored category plus the issues it raised, in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryReport {
    pub category: CategoryScore,
    pub issues: Vec<Issue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageScores {
    pub seo: CategoryReport,
    pub content: CategoryReport,
    pub visual: CategoryReport,
}

/// Supplier of the metrics the scorer does not measure itself.
///
/// Values outside a metric's documented range are clamped into it.
pub trait MetricSource: Send + Sync {
    fn keywords(&self) -> u32;
    fn readability(&self) -> u32;
    fn grammar(&self) -> u32;
    fn color_scheme(&self) -> u32;
}

/// Uniformly random placeholder metrics, drawn fresh for every analysis.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomMetricSource;

impl MetricSource for RandomMetricSource {
    fn keywords(&self) -> u32 {
        rand::thread_rng().gen_range(KEYWORDS_RANGE)
    }

    fn readability(&self) -> u32 {
        rand::thread_rng().gen_range(READABILITY_RANGE)
    }

    fn grammar(&self) -> u32 {
        rand::thread_rng().gen_range(GRAMMAR_RANGE)
    }

    fn color_scheme(&self) -> u32 {
        rand::thread_rng().gen_range(COLOR_SCHEME_RANGE)
    }
}

/// Reproducible placeholder metrics from a seeded generator.
pub struct SeededMetricSource {
    rng: Mutex<StdRng>,
}

impl SeededMetricSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn draw(&self, range: RangeInclusive<u32>) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(range)
    }
}

impl MetricSource for SeededMetricSource {
    fn keywords(&self) -> u32 {
        self.draw(KEYWORDS_RANGE)
    }

    fn readability(&self) -> u32 {
        self.draw(READABILITY_RANGE)
    }

    fn grammar(&self) -> u32 {
        self.draw(GRAMMAR_RANGE)
    }

    fn color_scheme(&self) -> u32 {
        self.draw(COLOR_SCHEME_RANGE)
    }
}

/// Constant placeholder metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMetricSource {
    pub keywords: u32,
    pub readability: u32,
    pub grammar: u32,
    pub color_scheme: u32,
}

impl Default for FixedMetricSource {
    fn default() -> Self {
        Self {
            keywords: 75,
            readability: 82,
            grammar: 86,
            color_scheme: 90,
        }
    }
}

impl MetricSource for FixedMetricSource {
    fn keywords(&self) -> u32 {
        self.keywords
    }

    fn readability(&self) -> u32 {
        self.readability
    }

    fn grammar(&self) -> u32 {
        self.grammar
    }

    fn color_scheme(&self) -> u32 {
        self.color_scheme
    }
}

fn clamp_to(value: u32, range: RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end())
}

/// Scores all three categories for one page.
pub fn score_page(
    signals: &PageSignals,
    sentiment: &SentimentResult,
    metrics: &dyn MetricSource,
) -> PageScores {
    let scores = PageScores {
        seo: score_seo(signals, metrics),
        content: score_content(signals, sentiment, metrics),
        visual: score_visual(signals, metrics),
    };
    tracing::debug!(
        seo = scores.seo.category.score,
        content = scores.content.category.score,
        visual = scores.visual.category.score,
        "page scored"
    );
    scores
}

fn score_seo(signals: &PageSignals, metrics: &dyn MetricSource) -> CategoryReport {
    const TITLE: &str = "SEO Optimization";
    let mut issues = Vec::new();

    let meta_description = match &signals.meta_description {
        None => {
            issues.push(Issue::new(Priority::High, TITLE, "Add a meta description."));
            0
        }
        Some(desc) => {
            let len = desc.chars().count();
            if !(META_DESCRIPTION_MIN_CHARS..=META_DESCRIPTION_MAX_CHARS).contains(&len) {
                issues.push(Issue::new(Priority::Medium, TITLE, "Optimize meta description length."));
                60
            } else {
                100
            }
        }
    };

    let headings = match signals.h1_count {
        0 => {
            issues.push(Issue::new(Priority::High, TITLE, "Add a main H1 heading."));
            0
        }
        1 => 100,
        _ => {
            issues.push(Issue::new(Priority::Medium, TITLE, "Use only one H1 heading."));
            50
        }
    };

    let keywords = clamp_to(metrics.keywords(), KEYWORDS_RANGE);

    CategoryReport {
        category: CategoryScore::from_metrics(&[
            ("Keywords", keywords),
            ("Meta Descriptions", meta_description),
            ("Headings", headings),
        ]),
        issues,
    }
}

fn score_content(
    signals: &PageSignals,
    sentiment: &SentimentResult,
    metrics: &dyn MetricSource,
) -> CategoryReport {
    let mut issues = Vec::new();

    let structure = if signals.word_count >= TARGET_WORD_COUNT {
        100
    } else {
        issues.push(Issue::new(
            Priority::Medium,
            "Content Length",
            format!("Consider expanding content (Current: {}).", signals.word_count),
        ));
        (signals.word_count * 100 / TARGET_WORD_COUNT) as u32
    };

    let readability = clamp_to(metrics.readability(), READABILITY_RANGE);
    let grammar = clamp_to(metrics.grammar(), GRAMMAR_RANGE);

    if sentiment.compound_score < 0.0 {
        issues.push(Issue::new(
            Priority::High,
            "Tone",
            "Sentiment is negative. Review highlighted words.",
        ));
    }

    CategoryReport {
        category: CategoryScore::from_metrics(&[
            ("Readability", readability),
            ("Grammar", grammar),
            ("Structure", structure),
        ]),
        issues,
    }
}

fn score_visual(signals: &PageSignals, metrics: &dyn MetricSource) -> CategoryReport {
    let mut issues = Vec::new();

    let mut layout: u32 = 100;
    if signals.images.len() < MIN_IMAGES {
        layout = 60;
        issues.push(Issue::new(Priority::Medium, "Visuals", "Add more images."));
    }
    let missing_alt = signals.missing_alt_count();
    if missing_alt > 0 {
        let penalty = u32::try_from(missing_alt)
            .unwrap_or(u32::MAX)
            .saturating_mul(ALT_TEXT_PENALTY);
        layout = layout.saturating_sub(penalty);
        issues.push(Issue::new(
            Priority::Medium,
            "Accessibility",
            format!("Add alt text to {} images.", missing_alt),
        ));
    }

    let mobile = if signals.has_viewport {
        100
    } else {
        issues.push(Issue::new(Priority::High, "Mobile", "Add a viewport meta tag."));
        0
    };

    let color_scheme = clamp_to(metrics.color_scheme(), COLOR_SCHEME_RANGE);

    CategoryReport {
        category: CategoryScore::from_metrics(&[
            ("Layout", layout),
            ("Color Scheme", color_scheme),
            ("Mobile Response", mobile),
        ]),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::ImageSignal;
    use crate::sentiment::SentimentLabel;

    fn neutral() -> SentimentResult {
        SentimentResult {
            compound_score: 0.0,
            label: SentimentLabel::Neutral,
            improvements: Vec::new(),
        }
    }

    fn image(has_alt: bool) -> ImageSignal {
        ImageSignal {
            src: Some("/img.png".to_string()),
            has_alt,
        }
    }

    fn healthy_page() -> PageSignals {
        PageSignals {
            author: "Ana".to_string(),
            meta_description: Some("d".repeat(120)),
            has_viewport: true,
            h1_count: 1,
            images: vec![image(true), image(true), image(true)],
            links: Vec::new(),
            word_count: 1500,
        }
    }

    fn titles(report: &CategoryReport) -> Vec<(Priority, &str)> {
        report
            .issues
            .iter()
            .map(|i| (i.priority, i.description.as_str()))
            .collect()
    }

    #[test]
    fn test_healthy_page_has_no_issues() {
        let scores = score_page(&healthy_page(), &neutral(), &FixedMetricSource::default());
        assert!(scores.seo.issues.is_empty());
        assert!(scores.content.issues.is_empty());
        assert!(scores.visual.issues.is_empty());
        // (75 + 100 + 100) / 3
        assert_eq!(scores.seo.category.score, 91);
        // (82 + 86 + 100) / 3
        assert_eq!(scores.content.category.score, 89);
        // (100 + 90 + 100) / 3
        assert_eq!(scores.visual.category.score, 96);
    }

    #[test]
    fn test_bare_page_scenario() {
        let page = PageSignals {
            word_count: 300,
            ..PageSignals::default()
        };
        let scores = score_page(&page, &neutral(), &RandomMetricSource);

        let keywords = scores.seo.category.metric("Keywords").unwrap();
        assert!(KEYWORDS_RANGE.contains(&keywords));
        assert_eq!(scores.seo.category.metric("Meta Descriptions"), Some(0));
        assert_eq!(scores.seo.category.metric("Headings"), Some(0));
        assert_eq!(scores.content.category.metric("Structure"), Some(30));
        assert_eq!(scores.visual.category.metric("Layout"), Some(60));
        assert_eq!(scores.visual.category.metric("Mobile Response"), Some(0));

        assert_eq!(
            titles(&scores.seo),
            vec![
                (Priority::High, "Add a meta description."),
                (Priority::High, "Add a main H1 heading."),
            ]
        );
        assert_eq!(
            titles(&scores.content),
            vec![(Priority::Medium, "Consider expanding content (Current: 300).")]
        );
        assert_eq!(
            titles(&scores.visual),
            vec![
                (Priority::Medium, "Add more images."),
                (Priority::High, "Add a viewport meta tag."),
            ]
        );
    }

    #[test]
    fn test_category_score_is_floor_of_metric_mean() {
        for seed in 0..20 {
            let scores = score_page(&healthy_page(), &neutral(), &SeededMetricSource::new(seed));
            for report in [&scores.seo, &scores.content, &scores.visual] {
                let sum: u32 = report.category.metrics.iter().map(|m| m.value).sum();
                assert_eq!(report.category.score, sum / 3);
            }
        }
    }

    #[test]
    fn test_meta_description_length_bounds() {
        let score_for = |len: usize| {
            let page = PageSignals {
                meta_description: Some("x".repeat(len)),
                ..healthy_page()
            };
            let seo = score_page(&page, &neutral(), &FixedMetricSource::default()).seo;
            (seo.category.metric("Meta Descriptions").unwrap(), seo.issues.len())
        };
        assert_eq!(score_for(49), (60, 1));
        assert_eq!(score_for(50), (100, 0));
        assert_eq!(score_for(160), (100, 0));
        assert_eq!(score_for(161), (60, 1));
    }

    #[test]
    fn test_multiple_h1_scores_half() {
        let page = PageSignals {
            h1_count: 3,
            ..healthy_page()
        };
        let seo = score_page(&page, &neutral(), &FixedMetricSource::default()).seo;
        assert_eq!(seo.category.metric("Headings"), Some(50));
        assert_eq!(titles(&seo), vec![(Priority::Medium, "Use only one H1 heading.")]);
    }

    #[test]
    fn test_missing_alt_text_penalty_floors_at_zero() {
        let page = PageSignals {
            images: (0..12).map(|_| image(false)).collect(),
            ..healthy_page()
        };
        let visual = score_page(&page, &neutral(), &FixedMetricSource::default()).visual;
        assert_eq!(visual.category.metric("Layout"), Some(0));
        assert_eq!(
            titles(&visual),
            vec![(Priority::Medium, "Add alt text to 12 images.")]
        );
    }

    #[test]
    fn test_few_images_and_missing_alt_stack() {
        let page = PageSignals {
            images: vec![image(false), image(true)],
            ..healthy_page()
        };
        let visual = score_page(&page, &neutral(), &FixedMetricSource::default()).visual;
        assert_eq!(visual.category.metric("Layout"), Some(50));
        assert_eq!(visual.issues.len(), 2);
    }

    #[test]
    fn test_negative_sentiment_raises_tone_issue_only() {
        let negative = SentimentResult {
            compound_score: -0.4,
            label: SentimentLabel::Negative,
            improvements: Vec::new(),
        };
        let baseline = score_page(&healthy_page(), &neutral(), &FixedMetricSource::default());
        let scored = score_page(&healthy_page(), &negative, &FixedMetricSource::default());
        assert_eq!(scored.content.category, baseline.content.category);
        assert_eq!(
            scored.content.issues,
            vec![Issue::new(
                Priority::High,
                "Tone",
                "Sentiment is negative. Review highlighted words."
            )]
        );
    }

    #[test]
    fn test_slightly_negative_neutral_text_still_raises_tone_issue() {
        let faint = SentimentResult {
            compound_score: -0.02,
            label: SentimentLabel::Neutral,
            improvements: Vec::new(),
        };
        let content = score_page(&healthy_page(), &faint, &FixedMetricSource::default()).content;
        assert_eq!(titles(&content), vec![(Priority::High, "Sentiment is negative. Review highlighted words.")]);
        assert_eq!(content.issues[0].title, "Tone");
    }

    #[test]
    fn test_out_of_range_metric_source_is_clamped() {
        let wild = FixedMetricSource {
            keywords: 0,
            readability: 500,
            grammar: 1,
            color_scheme: 1000,
        };
        let scores = score_page(&healthy_page(), &neutral(), &wild);
        assert_eq!(scores.seo.category.metric("Keywords"), Some(60));
        assert_eq!(scores.content.category.metric("Readability"), Some(95));
        assert_eq!(scores.content.category.metric("Grammar"), Some(75));
        assert_eq!(scores.visual.category.metric("Color Scheme"), Some(100));
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let a = SeededMetricSource::new(42);
        let b = SeededMetricSource::new(42);
        let draws_a: Vec<u32> = (0..8).map(|_| a.keywords()).collect();
        let draws_b: Vec<u32> = (0..8).map(|_| b.keywords()).collect();
        assert_eq!(draws_a, draws_b);
        assert!(draws_a.iter().all(|v| KEYWORDS_RANGE.contains(v)));
    }

    #[test]
    fn test_priority_serializes_uppercase() {
        let issue = Issue::new(Priority::Medium, "Visuals", "Add more images.");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["priority"], "MEDIUM");
        assert_eq!(json["description"], "Add more images.");
    }
}
