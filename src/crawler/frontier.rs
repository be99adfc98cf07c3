//! Crawl frontier: the FIFO work queue plus the visited set
//!
//! The visited set, not the queue, is the source of truth preventing
//! re-fetch: duplicate enqueues of a URL are harmless and are resolved at
//! dequeue time by the caller checking [`Frontier::mark_visited`].

use std::collections::{HashSet, VecDeque};

/// Ordered queue of not-yet-visited URLs and the set of visited ones
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<String>,
    visited: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a URL to the back of the queue
    ///
    /// Already-visited URLs are skipped up front; duplicates still in the
    /// queue are tolerated and resolved at dequeue time.
    pub fn enqueue(&mut self, url: &str) {
        if !self.visited.contains(url) {
            self.queue.push_back(url.to_string());
        }
    }

    /// Appends multiple URLs in order
    pub fn enqueue_all<'a>(&mut self, urls: impl IntoIterator<Item = &'a String>) {
        for url in urls {
            self.enqueue(url);
        }
    }

    /// Removes and returns the next URL in FIFO order
    pub fn dequeue(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    /// Marks a URL visited; returns false if it already was
    ///
    /// This test-and-set is the single gate that guarantees each URL is
    /// fetched at most once.
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Checks whether a URL has been visited
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Number of URLs visited so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of URLs still queued (may include duplicates)
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// True when no URLs remain to dequeue
    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new();
        frontier.enqueue("a");
        frontier.enqueue("b");
        frontier.enqueue("c");

        assert_eq!(frontier.dequeue(), Some("a".to_string()));
        assert_eq!(frontier.dequeue(), Some("b".to_string()));
        assert_eq!(frontier.dequeue(), Some("c".to_string()));
        assert_eq!(frontier.dequeue(), None);
    }

    #[test]
    fn test_mark_visited_is_test_and_set() {
        let mut frontier = Frontier::new();
        assert!(frontier.mark_visited("a"));
        assert!(!frontier.mark_visited("a"));
        assert_eq!(frontier.visited_count(), 1);
    }

    #[test]
    fn test_visited_urls_not_enqueued() {
        let mut frontier = Frontier::new();
        frontier.mark_visited("a");
        frontier.enqueue("a");
        assert!(frontier.is_exhausted());
    }

    #[test]
    fn test_duplicate_enqueues_tolerated() {
        let mut frontier = Frontier::new();
        frontier.enqueue("a");
        frontier.enqueue("a");
        assert_eq!(frontier.queue_len(), 2);

        // The caller's mark_visited gate resolves the duplicate
        let first = frontier.dequeue().unwrap();
        assert!(frontier.mark_visited(&first));
        let second = frontier.dequeue().unwrap();
        assert!(!frontier.mark_visited(&second));
    }

    #[test]
    fn test_enqueue_all_preserves_order() {
        let mut frontier = Frontier::new();
        let urls = vec!["a".to_string(), "b".to_string()];
        frontier.enqueue_all(&urls);

        assert_eq!(frontier.dequeue(), Some("a".to_string()));
        assert_eq!(frontier.dequeue(), Some("b".to_string()));
    }
}
