//! Navigation link detection
//!
//! Two-phase statistical classifier for site-wide boilerplate links.
//! During the crawl, [`NavigationLinkDetector`] collects which pages each
//! link target occurs on. After the crawl, [`NavigationLinkDetector::classify`]
//! consumes the detector and produces a frozen [`GlobalLinks`] set: a link
//! is global/navigation when it occurs on at least `threshold` fraction of
//! the crawled pages.
//!
//! Consuming the detector makes the phase ordering a type-level guarantee:
//! classification can only run once, nothing can be recorded afterwards,
//! and filtering is only reachable through the classified handle.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Default occurrence threshold: a link on >= 80% of pages is navigation
pub const DEFAULT_NAV_THRESHOLD: f64 = 0.8;

/// Occurrence collector for the crawl phase
#[derive(Debug)]
pub struct NavigationLinkDetector {
    threshold: f64,
    total_pages: usize,
    /// For each link target, the set of distinct page URLs it was seen on
    occurrences: HashMap<String, HashSet<String>>,
}

impl NavigationLinkDetector {
    /// Creates a detector with the given occurrence threshold (0.0 - 1.0)
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            total_pages: 0,
            occurrences: HashMap::new(),
        }
    }

    /// Records the links found on one crawled page
    ///
    /// Increments the distinct-page count once per call and adds `page_url`
    /// to the occurrence set of every link in `links`. Set semantics:
    /// a link repeated on the same page counts once, so no occurrence count
    /// can ever exceed the number of pages recorded.
    pub fn record_page_links(&mut self, page_url: &str, links: &[String]) {
        self.total_pages += 1;

        for link in links {
            self.occurrences
                .entry(link.clone())
                .or_default()
                .insert(page_url.to_string());
        }
    }

    /// Number of pages recorded so far
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// The configured occurrence threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Classifies global/navigation links, consuming the detector
    ///
    /// Computes `threshold_count = total_pages * threshold` (floating point,
    /// no rounding) and marks every link whose occurrence-set size is
    /// `>= threshold_count` as global. With zero pages recorded, nothing is
    /// classified.
    ///
    /// Occurrence ratios are only meaningful against the final page count,
    /// which is why this takes `self` by value: once the handle exists the
    /// dataset can no longer grow.
    pub fn classify(self) -> GlobalLinks {
        let threshold_count = self.total_pages as f64 * self.threshold;

        let mut global = HashSet::new();
        let mut occurrence_counts = HashMap::new();

        if self.total_pages > 0 {
            for (link, sources) in &self.occurrences {
                if sources.len() as f64 >= threshold_count {
                    global.insert(link.clone());
                    occurrence_counts.insert(link.clone(), sources.len());
                }
            }
        }

        tracing::info!(
            "Classified {} global/navigation links ({} pages, threshold {:.2})",
            global.len(),
            self.total_pages,
            self.threshold
        );

        GlobalLinks {
            threshold: self.threshold,
            threshold_count,
            total_pages: self.total_pages,
            global,
            occurrence_counts,
        }
    }
}

impl Default for NavigationLinkDetector {
    fn default() -> Self {
        Self::new(DEFAULT_NAV_THRESHOLD)
    }
}

/// The frozen result of navigation-link classification
///
/// Immutable once produced; all post-crawl filtering goes through this.
#[derive(Debug)]
pub struct GlobalLinks {
    threshold: f64,
    threshold_count: f64,
    total_pages: usize,
    global: HashSet<String>,
    occurrence_counts: HashMap<String, usize>,
}

impl GlobalLinks {
    /// Checks whether a URL was classified as a global/navigation link
    pub fn is_global(&self, url: &str) -> bool {
        self.global.contains(url)
    }

    /// Number of classified global links
    pub fn len(&self) -> usize {
        self.global.len()
    }

    /// True when nothing was classified
    pub fn is_empty(&self) -> bool {
        self.global.is_empty()
    }

    /// Removes global links from a list, preserving input order
    pub fn filter(&self, links: &[String]) -> Vec<String> {
        links
            .iter()
            .filter(|link| !self.global.contains(*link))
            .cloned()
            .collect()
    }

    /// Classifier statistics for the report
    pub fn stats(&self) -> NavStats {
        let mut global_links: Vec<String> = self.global.iter().cloned().collect();
        global_links.sort();

        NavStats {
            total_pages_analyzed: self.total_pages,
            detection_threshold: self.threshold,
            detection_threshold_count: self.threshold_count,
            global_links_detected: self.global.len(),
            global_links,
            global_link_occurrences: self.occurrence_counts.clone(),
        }
    }
}

/// Statistics about detected global/navigation links
#[derive(Debug, Clone, Serialize)]
pub struct NavStats {
    pub total_pages_analyzed: usize,
    pub detection_threshold: f64,
    pub detection_threshold_count: f64,
    pub global_links_detected: usize,
    pub global_links: Vec<String>,
    pub global_link_occurrences: HashMap<String, usize>,
}
