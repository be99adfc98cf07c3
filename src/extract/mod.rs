//! HTML extraction for crawled pages
//!
//! This module turns a fetched HTML body into the data the crawler
//! records for each page:
//! - internal links (resolved, fragment-stripped, same-domain)
//! - SEO metadata (title, description, canonical, H1, social tags)
//! - cleaned body text for semantic analysis

mod content;
mod links;
mod metadata;

pub use content::{ContentExtractor, PageContent};
pub use links::extract_internal_links;
pub use metadata::{extract_metadata, HreflangEntry, PageMetadata};
