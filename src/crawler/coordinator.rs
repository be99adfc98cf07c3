//! Crawl session coordinator
//!
//! [`Crawler`] owns the whole lifecycle of one crawl: seeding the frontier
//! (from the sitemap or the start URL), the fetch/extract/record loop, and
//! the post-crawl classification that turns collected occurrence data into
//! the final [`CrawlReport`]. The session is consumed by [`Crawler::run`],
//! so a finished crawl cannot be restarted or re-finalized.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchOutcome};
use crate::crawler::frontier::Frontier;
use crate::crawler::sitemap::SitemapResolver;
use crate::extract::{extract_internal_links, extract_metadata, ContentExtractor};
use crate::graph::LinkGraph;
use crate::nav::NavigationLinkDetector;
use crate::output::{CrawlReport, LinkStructure, PageRecord};
use crate::url::DomainScope;
use crate::CrawlError;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// How the crawl frontier is seeded and grown
#[derive(Debug, Clone)]
pub enum CrawlMode {
    /// Seed from `{root}/sitemap.xml` when present, then follow links;
    /// fall back to the start URL when absent
    Auto,

    /// Ignore any sitemap; seed from the start URL and follow links
    NoSitemap,

    /// Crawl exactly the URLs of an explicit sitemap, without following
    /// discovered links
    SitemapOnly { sitemap_url: String },
}

/// One crawl session over a single domain
pub struct Crawler {
    config: Config,
    scope: DomainScope,
    start_url: String,
    client: Client,
    frontier: Frontier,
    graph: LinkGraph,
    detector: NavigationLinkDetector,
    content_extractor: ContentExtractor,
    pages: Vec<PageRecord>,
    /// URLs that entered the frontier via a sitemap
    sitemap_seeded: HashSet<String>,
    sitemap_url: Option<String>,
    sitemap_used: bool,
    sitemap_only: bool,
    /// Discovered links are enqueued only in link-following modes
    follow_links: bool,
}

impl Crawler {
    /// Creates a crawl session for the given start URL
    ///
    /// The start URL must be an absolute http(s) URL with a host; anything
    /// else is fatal before any request is made. The fragment, if any, is
    /// dropped so the seed matches the crawl's canonical URL form.
    pub fn new(start_url: &str, config: Config) -> crate::Result<Self> {
        let mut parsed = Url::parse(start_url)
            .map_err(|_| CrawlError::InvalidStartUrl(start_url.to_string()))?;
        parsed.set_fragment(None);

        let scope = DomainScope::from_start_url(parsed.as_str())
            .map_err(|_| CrawlError::InvalidStartUrl(start_url.to_string()))?;

        let client = build_http_client(&config.user_agent)?;
        let detector = NavigationLinkDetector::new(config.crawler.nav_threshold);
        let content_extractor = ContentExtractor::new(config.crawler.content_limit);

        Ok(Self {
            config,
            scope,
            start_url: parsed.to_string(),
            client,
            frontier: Frontier::new(),
            graph: LinkGraph::new(),
            detector,
            content_extractor,
            pages: Vec::new(),
            sitemap_seeded: HashSet::new(),
            sitemap_url: None,
            sitemap_used: false,
            sitemap_only: false,
            follow_links: true,
        })
    }

    /// Runs the crawl to completion, consuming the session
    pub async fn run(mut self, mode: CrawlMode) -> crate::Result<CrawlReport> {
        tracing::info!(
            "Starting crawl of {} (max {} pages, threshold {:.2})",
            self.start_url,
            self.config.crawler.max_pages,
            self.config.crawler.nav_threshold
        );

        self.seed(mode).await;
        self.crawl_loop().await;
        Ok(self.finalize())
    }

    /// Seeds the frontier according to the crawl mode
    async fn seed(&mut self, mode: CrawlMode) {
        let delay = self.delay();

        match mode {
            CrawlMode::NoSitemap => {
                tracing::info!("Sitemap disabled, seeding from start URL");
                self.frontier.enqueue(&self.start_url);
            }
            CrawlMode::Auto => {
                let resolver = SitemapResolver::new(&self.client, &self.scope, delay);
                let sitemap_url = format!("{}/sitemap.xml", self.scope.root_url());

                match resolver.resolve().await {
                    Some(urls) => {
                        self.sitemap_url = Some(sitemap_url);
                        self.seed_from_sitemap(urls);
                    }
                    None => {
                        tracing::info!("No usable sitemap, seeding from start URL");
                        self.frontier.enqueue(&self.start_url);
                    }
                }
            }
            CrawlMode::SitemapOnly { sitemap_url } => {
                self.sitemap_only = true;
                self.follow_links = false;

                let resolver = SitemapResolver::new(&self.client, &self.scope, delay);
                match resolver.resolve_from(&sitemap_url).await {
                    Some(urls) => {
                        self.sitemap_url = Some(sitemap_url);
                        self.seed_from_sitemap(urls);
                    }
                    None => {
                        tracing::warn!(
                            "Sitemap-only mode but {} yielded no URLs, seeding from start URL",
                            sitemap_url
                        );
                        self.sitemap_url = Some(sitemap_url);
                        self.frontier.enqueue(&self.start_url);
                    }
                }
            }
        }
    }

    fn seed_from_sitemap(&mut self, urls: Vec<String>) {
        self.sitemap_used = true;
        tracing::info!("Seeding frontier with {} sitemap URLs", urls.len());

        for url in urls {
            self.sitemap_seeded.insert(url.clone());
            self.frontier.enqueue(&url);
        }
    }

    /// The fetch/extract/record loop
    ///
    /// Runs until the frontier is exhausted or the visited count reaches
    /// the page cap. Failed pages count toward the cap like successful
    /// ones. A fixed pacing delay follows every fetch.
    async fn crawl_loop(&mut self) {
        let max_pages = self.config.crawler.max_pages;
        let delay = self.delay();

        while !self.frontier.is_exhausted() && self.frontier.visited_count() < max_pages {
            let url = match self.frontier.dequeue() {
                Some(url) => url,
                None => break,
            };

            // Single dedup gate: a URL dequeued twice is fetched once
            if !self.frontier.mark_visited(&url) {
                continue;
            }

            tracing::info!(
                "Crawling page {}/{}: {}",
                self.frontier.visited_count(),
                max_pages,
                url
            );

            match fetch_url(&self.client, &url).await {
                FetchOutcome::Success { status_code, body } => {
                    self.record_page(&url, status_code, &body);
                }
                FetchOutcome::HttpError { status_code } => {
                    tracing::warn!("HTTP {} for {}", status_code, url);
                    self.pages.push(PageRecord::failure(
                        url.clone(),
                        Some(status_code),
                        format!("HTTP {}", status_code),
                        self.sitemap_seeded.contains(&url),
                    ));
                }
                FetchOutcome::NetworkError { error } => {
                    tracing::warn!("Network error for {}: {}", url, error);
                    self.pages.push(PageRecord::failure(
                        url.clone(),
                        None,
                        error,
                        self.sitemap_seeded.contains(&url),
                    ));
                }
            }

            tokio::time::sleep(delay).await;
        }

        tracing::info!(
            "Crawl phase complete: {} pages visited, {} still queued",
            self.frontier.visited_count(),
            self.frontier.queue_len()
        );
    }

    /// Extracts and records one successfully fetched page
    fn record_page(&mut self, url: &str, status_code: u16, body: &str) {
        let base = match Url::parse(url) {
            Ok(base) => base,
            Err(e) => {
                // Should not happen for URLs that passed canonicalization
                tracing::warn!("Dropping unparseable visited URL {}: {}", url, e);
                return;
            }
        };

        let links = extract_internal_links(body, &base, &self.scope);
        self.graph.add_page_links(url, &links, &mut self.detector);

        if self.follow_links {
            self.frontier.enqueue_all(&links);
        }

        let metadata = extract_metadata(body);
        let content = Some(self.content_extractor.extract(body));

        // The graph's deduplicated, document-ordered view of this page
        let internal_links = self.graph.outgoing_of(url, false);

        self.pages.push(PageRecord::success(
            url.to_string(),
            status_code,
            self.sitemap_seeded.contains(url),
            metadata,
            content,
            internal_links,
        ));
    }

    /// Classification and report assembly
    ///
    /// Consumes the session: the detector is classified exactly once, the
    /// graph's filtered views are derived from the result, and every
    /// successful page record is backfilled with its backlink counts,
    /// filtered links, and navigation links.
    fn finalize(mut self) -> CrawlReport {
        tracing::info!(
            "Analyzing navigation links across {} pages",
            self.detector.total_pages()
        );

        let global = self.detector.classify();
        self.graph.apply_global_filtering(&global);

        for page in &mut self.pages {
            if !page.is_success() {
                continue;
            }

            page.backlinks_count = Some(self.graph.backlink_count_of(&page.url, false));

            let filtered = self.graph.outgoing_of(&page.url, true);
            page.filtered_internal_links_count = Some(filtered.len());
            page.filtered_internal_links = Some(filtered);
            page.filtered_backlinks_count = Some(self.graph.backlink_count_of(&page.url, true));

            let nav_links: Vec<String> = page
                .internal_links
                .iter()
                .flatten()
                .filter(|link| global.is_global(link))
                .cloned()
                .collect();
            page.nav_links_count = Some(nav_links.len());
            page.nav_links = Some(nav_links);
        }

        let link_structure = if self.config.output.no_link_structure {
            None
        } else {
            let (filtered_outgoing, filtered_backlinks) = match self.graph.filtered_maps() {
                Some((outgoing, backlinks)) => (outgoing.clone(), backlinks.clone()),
                None => Default::default(),
            };

            Some(LinkStructure {
                outgoing_links: self.graph.outgoing_map().clone(),
                backlinks: self.graph.backlinks_map().clone(),
                link_stats: self.graph.summary(),
                global_links: global.stats(),
                filtered_outgoing_links: filtered_outgoing,
                filtered_backlinks,
                filtered_link_stats: self.graph.filtered_summary(),
            })
        };

        tracing::info!(
            "Crawl finished: {} pages, {} links mapped, {} navigation links",
            self.pages.len(),
            self.graph.edge_count(),
            global.len()
        );

        CrawlReport {
            start_url: self.start_url,
            base_domain: self.scope.normalized_host().to_string(),
            sitemap_url: self.sitemap_url,
            sitemap_used: self.sitemap_used,
            sitemap_only: self.sitemap_only,
            pages_crawled: self.pages.len(),
            max_pages: self.config.crawler.max_pages,
            nav_threshold: self.config.crawler.nav_threshold,
            nav_links_detected: global.len(),
            crawl_date: chrono::Utc::now(),
            pages: self.pages,
            link_structure,
        }
    }

    fn delay(&self) -> Duration {
        Duration::from_millis(self.config.crawler.delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_relative_start_url() {
        let result = Crawler::new("not-a-url", Config::default());
        assert!(matches!(result, Err(CrawlError::InvalidStartUrl(_))));
    }

    #[test]
    fn test_new_rejects_non_http_scheme() {
        let result = Crawler::new("ftp://example.com/", Config::default());
        assert!(matches!(result, Err(CrawlError::InvalidStartUrl(_))));
    }

    #[test]
    fn test_new_strips_fragment_from_start_url() {
        let crawler = Crawler::new("https://example.com/page#section", Config::default()).unwrap();
        assert_eq!(crawler.start_url, "https://example.com/page");
    }
}
