use regex::Regex;
use scraper::node::Element;
use scraper::{ElementRef, Html, Node, Selector};
use serde::Serialize;

/// Tags whose subtrees never contain main content
const SKIP_TAGS: &[&str] = &[
    "script", "style", "noscript", "svg", "iframe", "nav", "header", "footer", "aside",
];

/// Cleaned body text extracted from one page
#[derive(Debug, Clone, Serialize)]
pub struct PageContent {
    pub content: String,
    pub content_length: usize,
    pub word_count: usize,
    pub truncated: bool,
}

/// Extracts and cleans the main text content of pages
///
/// Drops scripts, styles, structural chrome (nav/header/footer/aside), and
/// any element whose class or id matches common boilerplate patterns, then
/// collects the remaining text from the page's main content region.
#[derive(Debug)]
pub struct ContentExtractor {
    content_limit: Option<usize>,
    non_content_patterns: Vec<Regex>,
}

impl ContentExtractor {
    /// Creates a content extractor with an optional character limit
    pub fn new(content_limit: Option<usize>) -> Self {
        // Class/id fragments that mark navigation, chrome, and widgets
        let non_content_patterns = [
            r"(nav|navigation|menu|header|footer|sidebar|comment|widget|ad|banner|cookie)",
            r"(social|share|related|popular|tag|category|subscribe|newsletter)",
        ]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect();

        Self {
            content_limit,
            non_content_patterns,
        }
    }

    /// Extracts the cleaned text content from an HTML document
    pub fn extract(&self, html: &str) -> PageContent {
        let document = Html::parse_document(html);

        let mut raw = String::new();
        self.collect_text(main_region(&document), &mut raw);

        let mut content = normalize_whitespace(&raw);

        let mut truncated = false;
        if let Some(limit) = self.content_limit {
            if content.chars().count() > limit {
                content = content.chars().take(limit).collect();
                truncated = true;
            }
        }

        PageContent {
            content_length: content.chars().count(),
            word_count: content.split_whitespace().count(),
            content,
            truncated,
        }
    }

    /// Recursively collects text, skipping non-content subtrees
    ///
    /// A newline is appended after each paragraph element so that
    /// normalization can restore paragraph breaks.
    fn collect_text(&self, element: ElementRef, out: &mut String) {
        for node in element.children() {
            match node.value() {
                Node::Text(text) => {
                    out.push_str(text);
                    out.push(' ');
                }
                Node::Element(child) => {
                    if self.is_non_content(child) {
                        continue;
                    }
                    if let Some(child_ref) = ElementRef::wrap(node) {
                        self.collect_text(child_ref, out);
                        if child.name() == "p" {
                            out.push('\n');
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// Checks whether an element's subtree should be skipped entirely
    fn is_non_content(&self, element: &Element) -> bool {
        if SKIP_TAGS.contains(&element.name()) {
            return true;
        }

        for attr in ["class", "id"] {
            if let Some(value) = element.attr(attr) {
                let value = value.to_lowercase();
                if self
                    .non_content_patterns
                    .iter()
                    .any(|p| p.is_match(&value))
                {
                    return true;
                }
            }
        }

        false
    }
}

/// Finds the most content-dense region to extract from
///
/// Prefers a `<main>` or `<article>` element, then `<div id="content">`,
/// then the body, then the whole document.
fn main_region(document: &Html) -> ElementRef<'_> {
    for selector in ["main, article", "div#content", "body"] {
        if let Ok(selector) = Selector::parse(selector) {
            if let Some(element) = document.select(&selector).next() {
                return element;
            }
        }
    }

    document.root_element()
}

/// Collapses runs of whitespace and restores paragraph breaks
fn normalize_whitespace(raw: &str) -> String {
    raw.split('\n')
        .map(|segment| segment.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
