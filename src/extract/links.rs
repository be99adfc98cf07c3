use crate::url::{canonicalize, is_crawlable_href, DomainScope};
use scraper::{Html, Selector};
use url::Url;

/// Extracts all internal links from an HTML document
///
/// Walks every `<a href>` element, skips non-retrievable hrefs
/// (`javascript:`, `mailto:`, `tel:`, `data:`, empty, fragment-only),
/// resolves the rest against `base_url`, strips fragments, and keeps only
/// links on the crawled domain.
///
/// The returned list preserves document order and is NOT deduplicated;
/// the graph and the occurrence collector both apply their own set
/// semantics downstream.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The page's own URL, for resolving relative hrefs
/// * `scope` - The crawl's domain scope
pub fn extract_internal_links(html: &str, base_url: &Url, scope: &DomainScope) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            let href = match element.value().attr("href") {
                Some(h) => h,
                None => continue,
            };

            if !is_crawlable_href(href) {
                continue;
            }

            if let Some(url) = canonicalize(base_url, href) {
                if scope.is_same_domain(url.as_str()) {
                    links.push(url.to_string());
                }
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> DomainScope {
        DomainScope::from_start_url("https://example.com").unwrap()
    }

    fn base() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    #[test]
    fn test_extracts_relative_and_absolute_internal_links() {
        let html = r#"<html><body>
            <a href="/about">About</a>
            <a href="https://example.com/contact">Contact</a>
        </body></html>"#;

        let links = extract_internal_links(html, &base(), &scope());
        assert_eq!(
            links,
            vec![
                "https://example.com/about".to_string(),
                "https://example.com/contact".to_string()
            ]
        );
    }

    #[test]
    fn test_excludes_external_links() {
        let html = r#"<html><body><a href="https://other.com/page">Out</a></body></html>"#;
        assert!(extract_internal_links(html, &base(), &scope()).is_empty());
    }

    #[test]
    fn test_www_variant_is_internal() {
        let html = r#"<html><body><a href="https://www.example.com/a">A</a></body></html>"#;
        let links = extract_internal_links(html, &base(), &scope());
        assert_eq!(links, vec!["https://www.example.com/a".to_string()]);
    }

    #[test]
    fn test_skips_non_retrievable_schemes() {
        let html = r##"<html><body>
            <a href="javascript:void(0)">JS</a>
            <a href="mailto:hi@example.com">Mail</a>
            <a href="tel:+123">Tel</a>
            <a href="#section">Anchor</a>
            <a href="/kept">Kept</a>
        </body></html>"##;

        let links = extract_internal_links(html, &base(), &scope());
        assert_eq!(links, vec!["https://example.com/kept".to_string()]);
    }

    #[test]
    fn test_strips_fragments() {
        let html = r#"<html><body><a href="/page#top">Top</a></body></html>"#;
        let links = extract_internal_links(html, &base(), &scope());
        assert_eq!(links, vec!["https://example.com/page".to_string()]);
    }

    #[test]
    fn test_keeps_duplicates_in_document_order() {
        let html = r#"<html><body>
            <a href="/b">B</a>
            <a href="/a">A</a>
            <a href="/b">B again</a>
        </body></html>"#;

        let links = extract_internal_links(html, &base(), &scope());
        assert_eq!(
            links,
            vec![
                "https://example.com/b".to_string(),
                "https://example.com/a".to_string(),
                "https://example.com/b".to_string()
            ]
        );
    }
}
