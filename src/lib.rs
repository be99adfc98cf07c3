//! Sitegraph: a single-domain link cartographer
//!
//! This crate crawls one web domain, maps the internal hyperlink graph,
//! and statistically separates site-wide navigation/boilerplate links from
//! content-relevant links. Results are emitted as structured JSON for
//! downstream content-cluster analysis.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod graph;
pub mod nav;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Sitegraph operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Invalid start URL '{0}': must be an absolute http(s) URL with a host")]
    InvalidStartUrl(String),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Sitegraph operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlMode, Crawler};
pub use graph::LinkGraph;
pub use nav::{GlobalLinks, NavigationLinkDetector};
pub use output::CrawlReport;
pub use crate::url::{canonicalize, is_crawlable_href, DomainScope};
