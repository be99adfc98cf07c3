use scraper::{Html, Selector};
use serde::Serialize;
use std::collections::HashMap;

/// SEO-relevant metadata extracted from one page
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub title_length: usize,
    pub meta_description: Option<String>,
    pub meta_description_length: usize,
    pub canonical: Option<String>,
    /// Text of the first H1 on the page
    pub h1: Option<String>,
    pub h1_count: usize,
    /// OpenGraph properties, keyed without the "og:" prefix
    pub open_graph: HashMap<String, String>,
    /// Twitter Card properties, keyed without the "twitter:" prefix
    pub twitter_card: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robots: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hreflang: Vec<HreflangEntry>,
}

/// One hreflang alternate declaration
#[derive(Debug, Clone, Serialize)]
pub struct HreflangEntry {
    pub href: String,
    pub hreflang: String,
}

/// Extracts SEO metadata from an HTML document
///
/// Collects the title, meta description, canonical URL, H1 headings,
/// OpenGraph and Twitter Card tags, the robots meta directive, and any
/// hreflang alternates. Missing fields stay `None`/empty; extraction
/// never fails.
pub fn extract_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);
    let mut metadata = PageMetadata::default();

    if let Some(title) = select_text(&document, "title") {
        metadata.title_length = title.chars().count();
        metadata.title = Some(title);
    }

    if let Some(description) = select_content_attr(&document, r#"meta[name="description"]"#) {
        metadata.meta_description_length = description.chars().count();
        metadata.meta_description = Some(description);
    }

    if let Ok(selector) = Selector::parse(r#"link[rel="canonical"]"#) {
        metadata.canonical = document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("href"))
            .map(|href| href.trim().to_string());
    }

    if let Ok(selector) = Selector::parse("h1") {
        let mut h1s = document.select(&selector);
        if let Some(first) = h1s.next() {
            let text = first.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                metadata.h1 = Some(text);
            }
            metadata.h1_count = 1 + h1s.count();
        }
    }

    metadata.open_graph = collect_prefixed(&document, r#"meta[property^="og:"]"#, "property", "og:");

    // Twitter tags appear with either a name or a property attribute
    metadata.twitter_card = collect_prefixed(
        &document,
        r#"meta[name^="twitter:"]"#,
        "name",
        "twitter:",
    );
    for (key, value) in collect_prefixed(
        &document,
        r#"meta[property^="twitter:"]"#,
        "property",
        "twitter:",
    ) {
        metadata.twitter_card.entry(key).or_insert(value);
    }

    metadata.robots = select_content_attr(&document, r#"meta[name="robots"]"#);

    if let Ok(selector) = Selector::parse(r#"link[rel="alternate"][hreflang]"#) {
        for element in document.select(&selector) {
            if let (Some(href), Some(hreflang)) = (
                element.value().attr("href"),
                element.value().attr("hreflang"),
            ) {
                metadata.hreflang.push(HreflangEntry {
                    href: href.trim().to_string(),
                    hreflang: hreflang.trim().to_string(),
                });
            }
        }
    }

    metadata
}

/// Text content of the first element matching the selector
fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// The content attribute of the first element matching the selector
fn select_content_attr(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collects prefixed meta tags into a map keyed without the prefix
fn collect_prefixed(
    document: &Html,
    selector: &str,
    attr: &str,
    prefix: &str,
) -> HashMap<String, String> {
    let mut map = HashMap::new();

    if let Ok(selector) = Selector::parse(selector) {
        for element in document.select(&selector) {
            if let (Some(property), Some(content)) =
                (element.value().attr(attr), element.value().attr("content"))
            {
                if let Some(key) = property.strip_prefix(prefix) {
                    map.insert(key.to_string(), content.trim().to_string());
                }
            }
        }
    }

    map
}
