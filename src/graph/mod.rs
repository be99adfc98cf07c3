//! Internal link graph
//!
//! Stores directed edges between pages of the crawled domain as two
//! adjacency maps (outgoing links and backlinks), with idempotent edge
//! insertion and summary statistics. After navigation-link classification,
//! filtered views of both maps can be derived exactly once via
//! [`LinkGraph::apply_global_filtering`], which requires the classified
//! [`GlobalLinks`] handle so that filtering cannot run early.

use crate::nav::{GlobalLinks, NavigationLinkDetector};
use serde::Serialize;
use std::collections::HashMap;

/// Number of entries in the top-ranked page lists
const TOP_PAGES: usize = 10;

/// Directed link graph over page URLs
#[derive(Debug, Default)]
pub struct LinkGraph {
    /// source URL -> targets, insertion-ordered with set semantics
    outgoing: HashMap<String, Vec<String>>,
    /// target URL -> sources, insertion-ordered with set semantics
    backlinks: HashMap<String, Vec<String>>,
    /// Sources in first-seen order, for stable ranking ties
    source_order: Vec<String>,
    /// Targets in first-seen order
    target_order: Vec<String>,
    /// Incremented exactly once per distinct (source, target) pair
    edge_count: usize,
    /// Populated once by apply_global_filtering
    filtered: Option<FilteredViews>,
}

#[derive(Debug)]
struct FilteredViews {
    outgoing: HashMap<String, Vec<String>>,
    backlinks: HashMap<String, Vec<String>>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a directed edge, idempotently
    ///
    /// The edge is added to both adjacency maps only if the ordered pair is
    /// not already present; the global edge counter increments only on the
    /// first insertion.
    pub fn add_edge(&mut self, source: &str, target: &str) {
        if !self.outgoing.contains_key(source) {
            self.source_order.push(source.to_string());
        }
        let targets = self.outgoing.entry(source.to_string()).or_default();
        if !targets.iter().any(|t| t == target) {
            targets.push(target.to_string());
            self.edge_count += 1;
        }

        if !self.backlinks.contains_key(target) {
            self.target_order.push(target.to_string());
        }
        let sources = self.backlinks.entry(target.to_string()).or_default();
        if !sources.iter().any(|s| s == source) {
            sources.push(source.to_string());
        }
    }

    /// Records all outgoing links of a page and forwards the occurrence
    /// data to the navigation-link detector
    pub fn add_page_links(
        &mut self,
        source: &str,
        targets: &[String],
        detector: &mut NavigationLinkDetector,
    ) {
        for target in targets {
            self.add_edge(source, target);
        }

        detector.record_page_links(source, targets);
    }

    /// Outgoing links of a page
    ///
    /// With `filter_global` set and filtering applied, classified global
    /// links are excluded; otherwise the unfiltered list is returned.
    pub fn outgoing_of(&self, url: &str, filter_global: bool) -> Vec<String> {
        self.select(&self.outgoing, |f| &f.outgoing, url, filter_global)
    }

    /// Pages linking to a URL
    pub fn backlinks_of(&self, url: &str, filter_global: bool) -> Vec<String> {
        self.select(&self.backlinks, |f| &f.backlinks, url, filter_global)
    }

    /// Number of pages linking to a URL
    pub fn backlink_count_of(&self, url: &str, filter_global: bool) -> usize {
        self.backlinks_of(url, filter_global).len()
    }

    fn select(
        &self,
        unfiltered: &HashMap<String, Vec<String>>,
        filtered_map: impl Fn(&FilteredViews) -> &HashMap<String, Vec<String>>,
        url: &str,
        filter_global: bool,
    ) -> Vec<String> {
        if filter_global {
            if let Some(filtered) = &self.filtered {
                return filtered_map(filtered).get(url).cloned().unwrap_or_default();
            }
        }
        unfiltered.get(url).cloned().unwrap_or_default()
    }

    /// Total number of distinct edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Derives the filtered adjacency maps from the classified link set
    ///
    /// Requiring the [`GlobalLinks`] handle ties this call to a completed
    /// classification phase. Both maps filter their link lists element-wise:
    /// classified global URLs are removed from every target list and from
    /// every source list, so a global page still keeps its non-global
    /// backlink sources. Entries whose filtered list would be empty are
    /// dropped, matching the unfiltered maps' "no entry means no links"
    /// convention.
    pub fn apply_global_filtering(&mut self, global: &GlobalLinks) {
        let mut filtered_outgoing = HashMap::new();
        for (source, targets) in &self.outgoing {
            let kept = global.filter(targets);
            if !kept.is_empty() {
                filtered_outgoing.insert(source.clone(), kept);
            }
        }

        let mut filtered_backlinks = HashMap::new();
        for (target, sources) in &self.backlinks {
            let kept = global.filter(sources);
            if !kept.is_empty() {
                filtered_backlinks.insert(target.clone(), kept);
            }
        }

        tracing::debug!(
            "Filtered link maps: {} -> {} pages with outgoing links, {} -> {} with backlinks",
            self.outgoing.len(),
            filtered_outgoing.len(),
            self.backlinks.len(),
            filtered_backlinks.len()
        );

        self.filtered = Some(FilteredViews {
            outgoing: filtered_outgoing,
            backlinks: filtered_backlinks,
        });
    }

    /// The unfiltered outgoing-link map, for export
    pub fn outgoing_map(&self) -> &HashMap<String, Vec<String>> {
        &self.outgoing
    }

    /// The unfiltered backlink map, for export
    pub fn backlinks_map(&self) -> &HashMap<String, Vec<String>> {
        &self.backlinks
    }

    /// The filtered maps, once filtering has been applied
    pub fn filtered_maps(
        &self,
    ) -> Option<(&HashMap<String, Vec<String>>, &HashMap<String, Vec<String>>)> {
        self.filtered.as_ref().map(|f| (&f.outgoing, &f.backlinks))
    }

    /// Summary statistics over the graph
    ///
    /// Top lists rank by descending degree; ties keep discovery order
    /// (stable sort over the first-seen sequence).
    pub fn summary(&self) -> LinkStats {
        LinkStats {
            total_links_mapped: self.edge_count,
            pages_with_outgoing_links: self.outgoing.len(),
            pages_with_backlinks: self.backlinks.len(),
            most_linked_pages: top_by_degree(&self.target_order, &self.backlinks, |url, count| {
                RankedPage {
                    url,
                    backlink_count: Some(count),
                    outgoing_link_count: None,
                }
            }),
            most_linking_pages: top_by_degree(&self.source_order, &self.outgoing, |url, count| {
                RankedPage {
                    url,
                    backlink_count: None,
                    outgoing_link_count: Some(count),
                }
            }),
        }
    }

    /// Summary statistics over the filtered views
    ///
    /// Returns `None` until filtering has been applied.
    pub fn filtered_summary(&self) -> Option<FilteredLinkStats> {
        let filtered = self.filtered.as_ref()?;

        Some(FilteredLinkStats {
            pages_with_filtered_outgoing_links: filtered.outgoing.len(),
            pages_with_filtered_backlinks: filtered.backlinks.len(),
            most_linked_pages_filtered: top_by_degree(
                &self.target_order,
                &filtered.backlinks,
                |url, count| RankedPage {
                    url,
                    backlink_count: Some(count),
                    outgoing_link_count: None,
                },
            ),
        })
    }
}

/// Ranks pages by degree, keeping first-seen order on ties
fn top_by_degree(
    order: &[String],
    map: &HashMap<String, Vec<String>>,
    make: impl Fn(String, usize) -> RankedPage,
) -> Vec<RankedPage> {
    let mut ranked: Vec<(&String, usize)> = order
        .iter()
        .filter_map(|url| map.get(url).map(|links| (url, links.len())))
        .collect();

    // Stable sort: equal degrees keep discovery order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(TOP_PAGES);

    ranked
        .into_iter()
        .map(|(url, count)| make(url.clone(), count))
        .collect()
}

/// One entry in a top-pages ranking
#[derive(Debug, Clone, Serialize)]
pub struct RankedPage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backlink_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outgoing_link_count: Option<usize>,
}

/// Graph-level statistics
#[derive(Debug, Clone, Serialize)]
pub struct LinkStats {
    pub total_links_mapped: usize,
    pub pages_with_outgoing_links: usize,
    pub pages_with_backlinks: usize,
    pub most_linked_pages: Vec<RankedPage>,
    pub most_linking_pages: Vec<RankedPage>,
}

/// Statistics over the filtered (non-navigation) views
#[derive(Debug, Clone, Serialize)]
pub struct FilteredLinkStats {
    pub pages_with_filtered_outgoing_links: usize,
    pub pages_with_filtered_backlinks: usize,
    pub most_linked_pages_filtered: Vec<RankedPage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::NavigationLinkDetector;

    fn links(urls: &[&str]) -> Vec<String> {
        urls.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn test_add_edge_is_idempotent() {
        let mut graph = LinkGraph::new();
        graph.add_edge("https://example.com/a", "https://example.com/b");
        graph.add_edge("https://example.com/a", "https://example.com/b");

        assert_eq!(
            graph.outgoing_of("https://example.com/a", false),
            links(&["https://example.com/b"])
        );
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.backlink_count_of("https://example.com/b", false), 1);
    }

    #[test]
    fn test_edge_counter_counts_distinct_pairs() {
        let mut graph = LinkGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("a", "c");
        graph.add_edge("b", "c");
        graph.add_edge("a", "b");

        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_add_page_links_forwards_occurrences() {
        let mut graph = LinkGraph::new();
        let mut detector = NavigationLinkDetector::new(0.8);

        graph.add_page_links("a", &links(&["b", "c", "b"]), &mut detector);

        assert_eq!(detector.total_pages(), 1);
        // Duplicate target deduped in the graph too
        assert_eq!(graph.outgoing_of("a", false), links(&["b", "c"]));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_backlinks_accumulate_sources() {
        let mut graph = LinkGraph::new();
        graph.add_edge("a", "x");
        graph.add_edge("b", "x");
        graph.add_edge("c", "x");

        assert_eq!(graph.backlinks_of("x", false), links(&["a", "b", "c"]));
        assert_eq!(graph.backlink_count_of("x", false), 3);
    }

    #[test]
    fn test_unknown_url_has_no_links() {
        let graph = LinkGraph::new();
        assert!(graph.outgoing_of("nowhere", false).is_empty());
        assert_eq!(graph.backlink_count_of("nowhere", true), 0);
    }

    #[test]
    fn test_filter_flag_without_classification_returns_unfiltered() {
        let mut graph = LinkGraph::new();
        graph.add_edge("a", "b");

        assert_eq!(graph.outgoing_of("a", true), links(&["b"]));
    }

    #[test]
    fn test_apply_global_filtering() {
        let mut graph = LinkGraph::new();
        let mut detector = NavigationLinkDetector::new(1.0);

        graph.add_page_links("p1", &links(&["nav", "c1"]), &mut detector);
        graph.add_page_links("p2", &links(&["nav", "c2"]), &mut detector);

        let global = detector.classify();
        assert!(global.is_global("nav"));

        graph.apply_global_filtering(&global);

        assert_eq!(graph.outgoing_of("p1", true), links(&["c1"]));
        assert_eq!(graph.outgoing_of("p1", false), links(&["nav", "c1"]));
        // "nav" keeps its backlinks: p1 and p2 are not global URLs
        assert_eq!(graph.backlink_count_of("nav", false), 2);
        assert_eq!(graph.backlink_count_of("nav", true), 2);
    }

    #[test]
    fn test_global_sources_removed_from_backlinks() {
        let mut graph = LinkGraph::new();
        let mut detector = NavigationLinkDetector::new(1.0);

        // "about" appears on every page, including itself, so it is global;
        // "x" appears once and is not.
        graph.add_page_links("a", &links(&["about", "x"]), &mut detector);
        graph.add_page_links("b", &links(&["about"]), &mut detector);
        graph.add_page_links("about", &links(&["about"]), &mut detector);

        let global = detector.classify();
        assert!(global.is_global("about"));
        graph.apply_global_filtering(&global);

        // The global page keeps its non-global sources; its own global
        // self-link source is removed
        assert_eq!(graph.backlinks_of("about", false), links(&["a", "b", "about"]));
        assert_eq!(graph.backlinks_of("about", true), links(&["a", "b"]));
        assert_eq!(graph.backlink_count_of("about", true), 2);

        // A global source is also removed from a non-global target's list
        assert_eq!(graph.backlinks_of("x", true), links(&["a"]));
    }

    #[test]
    fn test_filtered_maps_drop_empty_entries() {
        let mut graph = LinkGraph::new();
        let mut detector = NavigationLinkDetector::new(0.0);

        // A self-link: the only target and the only source are both global
        graph.add_page_links("nav", &links(&["nav"]), &mut detector);
        let global = detector.classify();
        graph.apply_global_filtering(&global);

        let (outgoing, backlinks) = graph.filtered_maps().unwrap();
        assert!(outgoing.is_empty());
        assert!(backlinks.is_empty());
    }

    #[test]
    fn test_summary_rankings() {
        let mut graph = LinkGraph::new();
        // "hub" links out three times; "popular" is linked from two pages
        graph.add_edge("hub", "popular");
        graph.add_edge("hub", "x");
        graph.add_edge("hub", "y");
        graph.add_edge("other", "popular");

        let stats = graph.summary();
        assert_eq!(stats.total_links_mapped, 4);
        assert_eq!(stats.pages_with_outgoing_links, 2);
        assert_eq!(stats.most_linking_pages[0].url, "hub");
        assert_eq!(stats.most_linking_pages[0].outgoing_link_count, Some(3));
        assert_eq!(stats.most_linked_pages[0].url, "popular");
        assert_eq!(stats.most_linked_pages[0].backlink_count, Some(2));
    }

    #[test]
    fn test_summary_ties_keep_discovery_order() {
        let mut graph = LinkGraph::new();
        graph.add_edge("first", "a");
        graph.add_edge("second", "b");

        let stats = graph.summary();
        // Both have degree 1; first-seen wins
        assert_eq!(stats.most_linking_pages[0].url, "first");
        assert_eq!(stats.most_linking_pages[1].url, "second");
    }

    #[test]
    fn test_filtered_summary_requires_filtering() {
        let graph = LinkGraph::new();
        assert!(graph.filtered_summary().is_none());
    }
}
