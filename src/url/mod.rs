//! URL handling module for Sitegraph
//!
//! This module provides the crawl's domain scope (same-domain membership
//! with www-insensitive host comparison), link crawlability checks, and
//! the single canonicalization step applied to every discovered link.

mod canonical;
mod scope;

pub use canonical::{canonicalize, is_crawlable_href};
pub use scope::DomainScope;
