//! Page markup access and the structural signals the scorer consumes.
//!
//! The scorer never sees a DOM. It reads a [`PageSignals`] value built from
//! anything implementing [`PageMarkup`]; [`HtmlPage`] is the `scraper`-backed
//! implementation used for fetched pages.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};

use crate::text;

/// Author label used when the page does not name one.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
/// Author candidates taken from markup must be shorter than this.
const MAX_AUTHOR_CHARS: usize = 50;

const INVISIBLE_TAGS: &[&str] = &["script", "style", "noscript", "template"];
const AUTHOR_CANDIDATES: &str = "span, a, div";

static META_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("meta[name]").unwrap());

/// One element returned by a tag query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkupElement {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
}

impl MarkupElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Narrow read-only view of a parsed page.
pub trait PageMarkup {
    /// Whether a `<meta name=...>` tag with this name exists.
    fn has_meta(&self, name: &str) -> bool;

    /// `content` of the first `<meta name=...>` tag with this name.
    fn meta_content(&self, name: &str) -> Option<String>;

    /// All elements matching a tag name (or comma-separated tag names), in
    /// document order.
    fn elements(&self, tag: &str) -> Vec<MarkupElement>;

    /// Visible text with script and style contents removed.
    fn visible_text(&self) -> String;
}

/// A parsed HTML document.
pub struct HtmlPage {
    document: Html,
}

impl HtmlPage {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    fn first_meta(&self, name: &str) -> Option<ElementRef<'_>> {
        self.document.select(&META_SELECTOR).find(|el| {
            el.value()
                .attr("name")
                .is_some_and(|n| n.trim().eq_ignore_ascii_case(name))
        })
    }
}

impl PageMarkup for HtmlPage {
    fn has_meta(&self, name: &str) -> bool {
        self.first_meta(name).is_some()
    }

    fn meta_content(&self, name: &str) -> Option<String> {
        self.first_meta(name)
            .and_then(|el| el.value().attr("content").map(|s| s.to_string()))
    }

    fn elements(&self, tag: &str) -> Vec<MarkupElement> {
        let Ok(selector) = Selector::parse(tag) else {
            return Vec::new();
        };
        self.document
            .select(&selector)
            .map(|el| MarkupElement {
                tag: el.value().name().to_string(),
                attributes: el
                    .value()
                    .attrs()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                text: el.text().collect::<String>(),
            })
            .collect()
    }

    fn visible_text(&self) -> String {
        let mut pieces: Vec<&str> = Vec::new();
        for node in self.document.tree.root().descendants() {
            let Node::Text(text) = node.value() else {
                continue;
            };
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| INVISIBLE_TAGS.contains(&el.name()))
            });
            if !hidden {
                pieces.push(text);
            }
        }
        pieces.join(" ")
    }
}

/// An `<img>` as far as the scorer cares.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSignal {
    pub src: Option<String>,
    pub has_alt: bool,
}

/// Structural facts about a page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSignals {
    pub author: String,
    /// Non-empty meta description, if any.
    pub meta_description: Option<String>,
    pub has_viewport: bool,
    pub h1_count: usize,
    pub images: Vec<ImageSignal>,
    /// Link targets of all anchors, in document order.
    pub links: Vec<String>,
    pub word_count: usize,
}

impl PageSignals {
    pub fn extract(markup: &dyn PageMarkup) -> Self {
        let images = markup
            .elements("img")
            .into_iter()
            .map(|img| ImageSignal {
                src: img.attr("src").map(|s| s.to_string()),
                has_alt: img.attr("alt").is_some_and(|alt| !alt.is_empty()),
            })
            .collect();

        let links = markup
            .elements("a")
            .into_iter()
            .filter_map(|a| a.attr("href").map(|h| h.trim().to_string()))
            .filter(|h| !h.is_empty())
            .collect();

        Self {
            author: extract_author(markup),
            meta_description: markup
                .meta_content("description")
                .filter(|d| !d.is_empty()),
            has_viewport: markup.has_meta("viewport"),
            h1_count: markup.elements("h1").len(),
            images,
            links,
            word_count: text::word_count(&markup.visible_text()),
        }
    }

    pub fn missing_alt_count(&self) -> usize {
        self.images.iter().filter(|img| !img.has_alt).count()
    }
}

/// Meta author, else the first short element whose class mentions "author".
fn extract_author(markup: &dyn PageMarkup) -> String {
    if markup.has_meta("author") {
        if let Some(author) = markup.meta_content("author").filter(|a| !a.trim().is_empty()) {
            return author.trim().to_string();
        }
    }

    markup
        .elements(AUTHOR_CANDIDATES)
        .into_iter()
        .find_map(|el| {
            let is_author = el
                .attr("class")
                .is_some_and(|class| class.to_lowercase().contains("author"));
            let name = el.text.trim();
            (is_author && name.chars().count() < MAX_AUTHOR_CHARS).then(|| name.to_string())
        })
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}
