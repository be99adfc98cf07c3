//! JSON result writers
//!
//! Writes the consolidated results file, the links-only variant, and the
//! optional per-page file tree next to the results path.

use crate::output::report::CrawlReport;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Longest filename derived from a page URL
const MAX_FILENAME_LEN: usize = 200;

/// Writes the full report as pretty-printed JSON
pub fn save_consolidated(report: &CrawlReport, path: &Path) -> crate::Result<()> {
    let content = serde_json::to_string_pretty(report)?;
    std::fs::write(path, content)?;

    tracing::info!(
        "Saved {} pages to {}",
        report.pages.len(),
        path.display()
    );
    Ok(())
}

/// Writes only the link-structure portion of the report
///
/// Used for re-running the graph analysis without re-serializing page
/// bodies. Keeps just enough session context to interpret the maps.
pub fn save_links_only(report: &CrawlReport, path: &Path) -> crate::Result<()> {
    let content = serde_json::to_string_pretty(&json!({
        "start_url": report.start_url,
        "base_domain": report.base_domain,
        "crawl_date": report.crawl_date,
        "pages_crawled": report.pages_crawled,
        "nav_threshold": report.nav_threshold,
        "link_structure": report.link_structure,
    }))?;
    std::fs::write(path, content)?;

    tracing::info!("Saved link structure to {}", path.display());
    Ok(())
}

/// Writes one JSON file per successfully crawled page
///
/// Files land in [`pages_dir_for`] next to the results path, named after a
/// filesystem-safe form of each URL, plus a `_metadata.json` summarizing
/// the session. Error pages are skipped. Returns the number of page files
/// written.
pub fn save_individual_pages(report: &CrawlReport, results_path: &Path) -> crate::Result<usize> {
    let dir = pages_dir_for(results_path);
    std::fs::create_dir_all(&dir)?;

    let mut written = 0;
    for page in &report.pages {
        if !page.is_success() {
            continue;
        }

        let file_path = dir.join(format!("{}.json", safe_filename(&page.url)));
        let content = serde_json::to_string_pretty(page)?;
        std::fs::write(&file_path, content)?;
        written += 1;
    }

    let metadata = json!({
        "start_url": report.start_url,
        "base_domain": report.base_domain,
        "crawl_date": report.crawl_date,
        "pages_crawled": report.pages_crawled,
        "pages_saved": written,
        "nav_threshold": report.nav_threshold,
        "nav_links_detected": report.nav_links_detected,
        "sitemap_used": report.sitemap_used,
    });
    std::fs::write(
        dir.join("_metadata.json"),
        serde_json::to_string_pretty(&metadata)?,
    )?;

    tracing::info!("Saved {} individual pages to {}", written, dir.display());
    Ok(written)
}

/// Directory for per-page files, derived from the results path
///
/// `sitegraph_results.json` maps to `sitegraph_results_pages/`.
pub fn pages_dir_for(results_path: &Path) -> PathBuf {
    let stem = results_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sitegraph_results");

    results_path.with_file_name(format!("{}_pages", stem))
}

/// Converts a URL into a filesystem-safe filename
///
/// Scheme separators, slashes, and query punctuation all become
/// underscores; the result is capped so long URLs stay writable.
fn safe_filename(url: &str) -> String {
    let mut name = url
        .replace("://", "_")
        .replace(['/', '?', '&', '=', '#'], "_");

    if name.chars().count() > MAX_FILENAME_LEN {
        name = name.chars().take(MAX_FILENAME_LEN).collect();
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::PageRecord;
    use chrono::Utc;
    use tempfile::tempdir;

    fn sample_report() -> CrawlReport {
        CrawlReport {
            start_url: "https://example.com".to_string(),
            base_domain: "example.com".to_string(),
            sitemap_url: None,
            sitemap_used: false,
            sitemap_only: false,
            pages_crawled: 2,
            max_pages: 100,
            nav_threshold: 0.8,
            nav_links_detected: 0,
            crawl_date: Utc::now(),
            pages: vec![
                PageRecord::success(
                    "https://example.com/".to_string(),
                    200,
                    false,
                    Default::default(),
                    None,
                    vec![],
                ),
                PageRecord::failure(
                    "https://example.com/gone".to_string(),
                    Some(404),
                    "HTTP 404".to_string(),
                    false,
                ),
            ],
            link_structure: None,
        }
    }

    #[test]
    fn test_safe_filename_replaces_url_punctuation() {
        assert_eq!(
            safe_filename("https://example.com/blog/post?id=7"),
            "https_example.com_blog_post_id_7"
        );
    }

    #[test]
    fn test_safe_filename_caps_length() {
        let long = format!("https://example.com/{}", "a".repeat(500));
        assert_eq!(safe_filename(&long).len(), MAX_FILENAME_LEN);
    }

    #[test]
    fn test_pages_dir_derivation() {
        let dir = pages_dir_for(Path::new("/tmp/out/results.json"));
        assert_eq!(dir, PathBuf::from("/tmp/out/results_pages"));
    }

    #[test]
    fn test_save_consolidated_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.json");

        save_consolidated(&sample_report(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["pages_crawled"], 2);
        assert_eq!(value["pages"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_individual_pages_skip_errors() {
        let dir = tempdir().unwrap();
        let results_path = dir.path().join("results.json");

        let written = save_individual_pages(&sample_report(), &results_path).unwrap();
        assert_eq!(written, 1);

        let pages_dir = pages_dir_for(&results_path);
        assert!(pages_dir.join("_metadata.json").exists());
        assert!(pages_dir.join("https_example.com_.json").exists());
    }
}
