use url::Url;

/// Checks whether an href is worth resolving at all
///
/// Rejects empty strings, fragment-only references (same-page anchors),
/// and non-retrievable schemes: `javascript:`, `mailto:`, `tel:`, and
/// `data:` URIs.
///
/// # Examples
///
/// ```
/// use sitegraph::url::is_crawlable_href;
///
/// assert!(is_crawlable_href("/about"));
/// assert!(is_crawlable_href("https://example.com/page"));
/// assert!(!is_crawlable_href(""));
/// assert!(!is_crawlable_href("#section"));
/// assert!(!is_crawlable_href("mailto:hi@example.com"));
/// ```
pub fn is_crawlable_href(href: &str) -> bool {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return false;
    }

    !(href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:"))
}

/// Resolves an href against a base URL and strips the fragment
///
/// This is the sole normalization step applied to discovered links. It
/// deliberately does NOT collapse query-parameter ordering, default ports,
/// or trailing slashes: two URLs differing only in those respects are
/// distinct keys in the graph. Stricter normalization policies belong
/// here and nowhere else.
///
/// Returns `None` for hrefs that fail to resolve or resolve to a
/// non-http(s) URL.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitegraph::url::canonicalize;
///
/// let base = Url::parse("https://example.com/dir/page").unwrap();
/// let url = canonicalize(&base, "../other#section").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/other");
/// ```
pub fn canonicalize(base: &Url, href: &str) -> Option<Url> {
    match base.join(href.trim()) {
        Ok(mut url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                return None;
            }
            url.set_fragment(None);
            Some(url)
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/dir/page").unwrap()
    }

    #[test]
    fn test_empty_href_not_crawlable() {
        assert!(!is_crawlable_href(""));
        assert!(!is_crawlable_href("   "));
    }

    #[test]
    fn test_fragment_only_not_crawlable() {
        assert!(!is_crawlable_href("#top"));
    }

    #[test]
    fn test_script_mail_tel_data_not_crawlable() {
        assert!(!is_crawlable_href("javascript:void(0)"));
        assert!(!is_crawlable_href("mailto:test@example.com"));
        assert!(!is_crawlable_href("tel:+1234567890"));
        assert!(!is_crawlable_href("data:text/html,<h1>x</h1>"));
    }

    #[test]
    fn test_relative_and_absolute_crawlable() {
        assert!(is_crawlable_href("/about"));
        assert!(is_crawlable_href("about.html"));
        assert!(is_crawlable_href("https://example.com/page"));
    }

    #[test]
    fn test_canonicalize_resolves_relative() {
        let url = canonicalize(&base(), "/other").unwrap();
        assert_eq!(url.as_str(), "https://example.com/other");
    }

    #[test]
    fn test_canonicalize_strips_fragment() {
        let with = canonicalize(&base(), "https://example.com/page#section").unwrap();
        let without = canonicalize(&base(), "https://example.com/page").unwrap();
        assert_eq!(with, without);
        assert_eq!(with.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_canonicalize_rejects_non_http() {
        assert!(canonicalize(&base(), "ftp://example.com/file").is_none());
    }

    #[test]
    fn test_canonicalize_keeps_query_order() {
        let url = canonicalize(&base(), "/page?b=2&a=1").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page?b=2&a=1");
    }

    #[test]
    fn test_canonicalize_keeps_trailing_slash() {
        let with = canonicalize(&base(), "/page/").unwrap();
        let without = canonicalize(&base(), "/page").unwrap();
        // Deliberately distinct; see the function docs
        assert_ne!(with, without);
    }
}
