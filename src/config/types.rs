use serde::Deserialize;

/// Main configuration structure for Sitegraph
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of pages to visit
    #[serde(default = "default_max_pages", rename = "max-pages")]
    pub max_pages: usize,

    /// Fixed pacing delay between requests (milliseconds)
    #[serde(default = "default_delay_ms", rename = "delay-ms")]
    pub delay_ms: u64,

    /// Occurrence-ratio threshold for navigation-link detection (0.0 - 1.0)
    #[serde(default = "default_nav_threshold", rename = "nav-threshold")]
    pub nav_threshold: f64,

    /// Maximum characters of body text to extract per page
    #[serde(default, rename = "content-limit")]
    pub content_limit: Option<usize>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(default = "default_crawler_name", rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(default = "default_crawler_version", rename = "crawler-version")]
    pub crawler_version: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the consolidated JSON results file
    #[serde(default = "default_results_path", rename = "results-path")]
    pub results_path: String,

    /// Write one JSON file per page into a directory derived from the
    /// results path
    #[serde(default, rename = "individual-files")]
    pub individual_files: bool,

    /// Emit only the link-structure portion of the results
    #[serde(default, rename = "links-only")]
    pub links_only: bool,

    /// Omit the link-structure portion entirely (smaller files)
    #[serde(default, rename = "no-link-structure")]
    pub no_link_structure: bool,
}

fn default_max_pages() -> usize {
    100
}

fn default_delay_ms() -> u64 {
    500
}

fn default_nav_threshold() -> f64 {
    crate::nav::DEFAULT_NAV_THRESHOLD
}

fn default_crawler_name() -> String {
    "sitegraph".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_results_path() -> String {
    "sitegraph_results.json".to_string()
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            delay_ms: default_delay_ms(),
            nav_threshold: default_nav_threshold(),
            content_limit: None,
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_path: default_results_path(),
            individual_files: false,
            links_only: false,
            no_link_structure: false,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}
