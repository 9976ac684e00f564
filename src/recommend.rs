//! Social presence detection and final recommendation ordering.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::scoring::{Issue, PageScores, Priority};

/// Known platforms as `(platform, domains)`, in reporting order.
const PLATFORMS: &[(&str, &[&str])] = &[
    ("Twitter", &["twitter.com", "x.com"]),
    ("Linkedin", &["linkedin.com"]),
    ("Instagram", &["instagram.com"]),
    ("Facebook", &["facebook.com"]),
    ("Github", &["github.com"]),
];

const SOCIAL_GROWTH: &str = "Social Growth";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

fn platform_for(link: &str) -> Option<&'static str> {
    let url = Url::parse(link).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();
    PLATFORMS
        .iter()
        .find(|(_, domains)| domains.iter().any(|d| host_matches(&host, d)))
        .map(|(platform, _)| *platform)
}

/// At most one link per platform, the first one found in `links`.
/// Relative or unparseable links are ignored.
pub fn detect_social_links(links: &[String]) -> Vec<SocialLink> {
    let mut found: Vec<SocialLink> = Vec::new();
    for link in links {
        let Some(platform) = platform_for(link) else {
            continue;
        };
        if found.iter().any(|s| s.platform == platform) {
            continue;
        }
        found.push(SocialLink {
            platform: platform.to_string(),
            url: link.clone(),
        });
    }
    found
}

/// LOW-priority suggestions for missing Twitter/X and LinkedIn presence.
pub fn social_growth_issues(social_links: &[SocialLink]) -> Vec<Issue> {
    let has = |platform: &str| social_links.iter().any(|s| s.platform == platform);
    let mut issues = Vec::new();
    if !has("Twitter") {
        issues.push(Issue::new(
            Priority::Low,
            SOCIAL_GROWTH,
            "Add Twitter/X to engage with the tech community.",
        ));
    }
    if !has("Linkedin") {
        issues.push(Issue::new(
            Priority::Low,
            SOCIAL_GROWTH,
            "Add LinkedIn to build professional credibility.",
        ));
    }
    issues
}

/// Recommendations in category order (SEO, content, visual, social) and the
/// overall score.
pub fn aggregate(scores: &PageScores, social_links: &[SocialLink]) -> (Vec<Issue>, u32) {
    let recommendations: Vec<Issue> = [&scores.seo, &scores.content, &scores.visual]
        .into_iter()
        .flat_map(|report| report.issues.iter().cloned())
        .chain(social_growth_issues(social_links))
        .collect();

    let overall = (scores.seo.category.score
        + scores.content.category.score
        + scores.visual.category.score)
        / 3;

    (recommendations, overall)
}
