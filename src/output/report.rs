//! Report structures serialized into the JSON results

use crate::extract::{PageContent, PageMetadata};
use crate::graph::{FilteredLinkStats, LinkStats};
use crate::nav::NavStats;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// The complete result of one crawl session
#[derive(Debug, Serialize)]
pub struct CrawlReport {
    pub start_url: String,
    pub base_domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sitemap_url: Option<String>,
    pub sitemap_used: bool,
    pub sitemap_only: bool,
    pub pages_crawled: usize,
    pub max_pages: usize,
    pub nav_threshold: f64,
    pub nav_links_detected: usize,
    pub crawl_date: DateTime<Utc>,
    pub pages: Vec<PageRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_structure: Option<LinkStructure>,
}

/// One visited URL in the report
///
/// Error pages carry only `url`, `status_code` (null for network errors),
/// `error`, and `from_sitemap`; all extraction and link fields are absent.
#[derive(Debug, Serialize)]
pub struct PageRecord {
    pub url: String,
    /// HTTP status; null when no response was received at all
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub from_sitemap: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PageMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<PageContent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_links: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_links_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backlinks_count: Option<usize>,

    // Classification-derived fields, backfilled after the crawl phase
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtered_internal_links: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtered_internal_links_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtered_backlinks_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_links: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_links_count: Option<usize>,
}

impl PageRecord {
    /// Record for a successfully retrieved page
    ///
    /// Link counts and classification fields are filled in after the crawl
    /// completes; until then they stay absent.
    pub fn success(
        url: String,
        status_code: u16,
        from_sitemap: bool,
        metadata: PageMetadata,
        content: Option<PageContent>,
        internal_links: Vec<String>,
    ) -> Self {
        Self {
            url,
            status_code: Some(status_code),
            error: None,
            from_sitemap,
            title: metadata.title.clone(),
            metadata: Some(metadata),
            content,
            internal_links_count: Some(internal_links.len()),
            internal_links: Some(internal_links),
            backlinks_count: None,
            filtered_internal_links: None,
            filtered_internal_links_count: None,
            filtered_backlinks_count: None,
            nav_links: None,
            nav_links_count: None,
        }
    }

    /// Record for a failed page
    ///
    /// `status_code` is `Some` for HTTP errors and `None` for network
    /// errors, so the JSON carries a null status when no response arrived.
    pub fn failure(
        url: String,
        status_code: Option<u16>,
        error: String,
        from_sitemap: bool,
    ) -> Self {
        Self {
            url,
            status_code,
            error: Some(error),
            from_sitemap,
            title: None,
            metadata: None,
            content: None,
            internal_links: None,
            internal_links_count: None,
            backlinks_count: None,
            filtered_internal_links: None,
            filtered_internal_links_count: None,
            filtered_backlinks_count: None,
            nav_links: None,
            nav_links_count: None,
        }
    }

    /// True when the page was retrieved and parsed
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// The domain-wide link graph portion of the report
#[derive(Debug, Serialize)]
pub struct LinkStructure {
    pub outgoing_links: HashMap<String, Vec<String>>,
    pub backlinks: HashMap<String, Vec<String>>,
    pub link_stats: LinkStats,
    pub global_links: NavStats,
    pub filtered_outgoing_links: HashMap<String, Vec<String>>,
    pub filtered_backlinks: HashMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtered_link_stats: Option<FilteredLinkStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_record_serializes_null_status() {
        let record = PageRecord::failure(
            "https://example.com/down".to_string(),
            None,
            "Connection refused".to_string(),
            false,
        );

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["status_code"].is_null());
        assert_eq!(json["error"], "Connection refused");
        assert!(json.get("internal_links").is_none());
    }

    #[test]
    fn test_success_record_omits_error() {
        let record = PageRecord::success(
            "https://example.com/".to_string(),
            200,
            true,
            PageMetadata::default(),
            None,
            vec!["https://example.com/a".to_string()],
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status_code"], 200);
        assert!(json.get("error").is_none());
        assert_eq!(json["internal_links_count"], 1);
        assert_eq!(json["from_sitemap"], true);
    }
}
