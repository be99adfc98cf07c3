//! Sitemap discovery and expansion
//!
//! Locates `{root}/sitemap.xml` and expands it into a same-domain URL
//! list. Both sitemap schemas are supported: a flat urlset and an index
//! of nested sitemaps. Index expansion is depth-first over the index
//! entries, bounded by a visited-location set and a depth limit so that a
//! self-referencing index terminates instead of looping forever.
//!
//! Any fetch or parse failure resolves to "absent" rather than an error;
//! the caller falls back to homepage-seeded crawling.

use crate::crawler::fetcher::{fetch_url, FetchOutcome};
use crate::url::DomainScope;
use reqwest::Client;
use sitemap::reader::{SiteMapEntity, SiteMapReader};
use std::collections::HashSet;
use std::io::Cursor;
use std::time::Duration;

/// Bound on nested-sitemap recursion depth
const MAX_SITEMAP_DEPTH: usize = 8;

/// Resolves a domain's sitemap into a seed URL list
pub struct SitemapResolver<'a> {
    client: &'a Client,
    scope: &'a DomainScope,
    /// Pacing delay between successive nested-sitemap fetches, same as the
    /// per-page crawl delay
    delay: Duration,
}

/// A parsed sitemap document: an index of nested sitemaps or a flat URL list
#[derive(Debug)]
enum SitemapDocument {
    Index(Vec<String>),
    UrlSet(Vec<String>),
}

impl<'a> SitemapResolver<'a> {
    pub fn new(client: &'a Client, scope: &'a DomainScope, delay: Duration) -> Self {
        Self {
            client,
            scope,
            delay,
        }
    }

    /// Resolves `{root}/sitemap.xml` into a URL list
    ///
    /// Returns `None` when the sitemap is missing, malformed, or contains
    /// no usable same-domain URLs; the caller then seeds from the homepage.
    pub async fn resolve(&self) -> Option<Vec<String>> {
        let sitemap_url = format!("{}/sitemap.xml", self.scope.root_url());
        self.resolve_from(&sitemap_url).await
    }

    /// Resolves an explicit sitemap URL into a URL list
    ///
    /// Used by sitemap-only mode; same absence semantics as [`resolve`].
    ///
    /// [`resolve`]: SitemapResolver::resolve
    pub async fn resolve_from(&self, sitemap_url: &str) -> Option<Vec<String>> {
        tracing::info!("Checking for sitemap at: {}", sitemap_url);

        let body = match fetch_url(self.client, sitemap_url).await {
            FetchOutcome::Success { body, .. } => body,
            FetchOutcome::HttpError { status_code } => {
                tracing::info!("No sitemap at {} (HTTP {})", sitemap_url, status_code);
                return None;
            }
            FetchOutcome::NetworkError { error } => {
                tracing::info!("No sitemap at {} ({})", sitemap_url, error);
                return None;
            }
        };

        let urls = self.expand(sitemap_url, &body).await;

        if urls.is_empty() {
            tracing::info!("Sitemap at {} contains no usable URLs", sitemap_url);
            None
        } else {
            tracing::info!("Resolved {} URLs from sitemap", urls.len());
            Some(urls)
        }
    }

    /// Expands a fetched sitemap document, following nested indexes
    ///
    /// Depth-first over index entries: a child sitemap's URLs land before
    /// any URL of its following sibling. The worklist carries a depth per
    /// entry and a set of already-expanded locations; both exist purely
    /// for termination.
    async fn expand(&self, root_location: &str, root_body: &str) -> Vec<String> {
        let mut urls = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(root_location.to_string());

        let mut stack: Vec<(String, usize)> = Vec::new();

        match parse_sitemap_document(root_body) {
            SitemapDocument::UrlSet(locations) => {
                self.collect_same_domain(locations, &mut urls);
            }
            SitemapDocument::Index(children) => {
                tracing::info!("Found a sitemap index with {} entries", children.len());
                for child in children.into_iter().rev() {
                    stack.push((child, 1));
                }
            }
        }

        while let Some((location, depth)) = stack.pop() {
            if depth > MAX_SITEMAP_DEPTH {
                tracing::warn!(
                    "Skipping nested sitemap {} beyond depth {}",
                    location,
                    MAX_SITEMAP_DEPTH
                );
                continue;
            }

            if !seen.insert(location.clone()) {
                tracing::warn!("Skipping already-expanded sitemap {}", location);
                continue;
            }

            tracing::debug!("Processing nested sitemap: {}", location);
            let body = match fetch_url(self.client, &location).await {
                FetchOutcome::Success { body, .. } => body,
                outcome => {
                    tracing::warn!(
                        "Failed to fetch nested sitemap {} (status {:?})",
                        location,
                        outcome.status_code()
                    );
                    continue;
                }
            };

            // Pace nested fetches like page fetches
            tokio::time::sleep(self.delay).await;

            match parse_sitemap_document(&body) {
                SitemapDocument::UrlSet(locations) => {
                    self.collect_same_domain(locations, &mut urls);
                }
                SitemapDocument::Index(children) => {
                    for child in children.into_iter().rev() {
                        stack.push((child, depth + 1));
                    }
                }
            }
        }

        urls
    }

    fn collect_same_domain(&self, locations: Vec<String>, urls: &mut Vec<String>) {
        for location in locations {
            if self.scope.is_same_domain(&location) {
                urls.push(location);
            } else {
                tracing::debug!("Dropping off-domain sitemap entry: {}", location);
            }
        }
    }
}

/// Parses one sitemap document
///
/// A document with any `<sitemap>` entries is treated as an index;
/// otherwise its `<url>` entries form a flat URL list. Malformed XML
/// simply yields an empty list.
fn parse_sitemap_document(body: &str) -> SitemapDocument {
    let mut children = Vec::new();
    let mut urls = Vec::new();

    for entity in SiteMapReader::new(Cursor::new(body.as_bytes())) {
        match entity {
            SiteMapEntity::SiteMap(entry) => {
                if let Some(location) = entry.loc.get_url() {
                    children.push(location.to_string());
                }
            }
            SiteMapEntity::Url(entry) => {
                if let Some(location) = entry.loc.get_url() {
                    urls.push(location.to_string());
                }
            }
            SiteMapEntity::Err(e) => {
                tracing::debug!("Sitemap parse error: {}", e);
            }
        }
    }

    if !children.is_empty() {
        SitemapDocument::Index(children)
    } else {
        SitemapDocument::UrlSet(urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_urlset() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/a</loc></url>
  <url><loc>https://example.com/b</loc></url>
</urlset>"#;

        match parse_sitemap_document(body) {
            SitemapDocument::UrlSet(urls) => {
                assert_eq!(
                    urls,
                    vec![
                        "https://example.com/a".to_string(),
                        "https://example.com/b".to_string()
                    ]
                );
            }
            SitemapDocument::Index(_) => panic!("expected a flat urlset"),
        }
    }

    #[test]
    fn test_parse_sitemap_index() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>https://example.com/sitemap-posts.xml</loc></sitemap>
  <sitemap><loc>https://example.com/sitemap-pages.xml</loc></sitemap>
</sitemapindex>"#;

        match parse_sitemap_document(body) {
            SitemapDocument::Index(children) => {
                assert_eq!(
                    children,
                    vec![
                        "https://example.com/sitemap-posts.xml".to_string(),
                        "https://example.com/sitemap-pages.xml".to_string()
                    ]
                );
            }
            SitemapDocument::UrlSet(_) => panic!("expected a sitemap index"),
        }
    }

    #[test]
    fn test_parse_malformed_document_is_empty() {
        match parse_sitemap_document("this is not XML at all") {
            SitemapDocument::UrlSet(urls) => assert!(urls.is_empty()),
            SitemapDocument::Index(_) => panic!("expected an empty urlset"),
        }
    }
}
