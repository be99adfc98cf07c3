//! The crawl engine: HTTP fetching, the frontier, sitemap seeding, and
//! the session coordinator that ties them together.

mod coordinator;
mod fetcher;
mod frontier;
mod sitemap;

pub use coordinator::{CrawlMode, Crawler};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome};
pub use frontier::Frontier;
pub use sitemap::SitemapResolver;
