//! Sitegraph main entry point
//!
//! This is the command-line interface for the Sitegraph domain crawler.

use anyhow::Context;
use clap::Parser;
use sitegraph::config::{load_config, validate, Config};
use sitegraph::crawler::{CrawlMode, Crawler};
use sitegraph::output::{save_consolidated, save_individual_pages, save_links_only};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Sitegraph: a single-domain link cartographer
///
/// Sitegraph crawls one website, maps its internal link graph, and
/// statistically separates site-wide navigation links from content links.
/// Results are written as JSON for content-cluster analysis.
#[derive(Parser, Debug)]
#[command(name = "sitegraph")]
#[command(version)]
#[command(about = "Crawl a domain and map its internal link graph", long_about = None)]
struct Cli {
    /// Start URL of the domain to crawl (absolute http(s) URL)
    #[arg(value_name = "URL")]
    url: String,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of pages to visit
    #[arg(short, long, value_name = "N")]
    max_pages: Option<usize>,

    /// Delay between requests in milliseconds
    #[arg(short, long, value_name = "MS")]
    delay: Option<u64>,

    /// Occurrence-ratio threshold for navigation-link detection (0.0 - 1.0)
    #[arg(short = 't', long, value_name = "RATIO")]
    nav_threshold: Option<f64>,

    /// Maximum characters of body text to extract per page
    #[arg(long, value_name = "CHARS")]
    content_limit: Option<usize>,

    /// Skip sitemap discovery and seed from the start URL
    #[arg(long, conflicts_with = "sitemap_only")]
    no_sitemap: bool,

    /// Crawl exactly the URLs of this sitemap, without following links
    #[arg(long, value_name = "SITEMAP_URL")]
    sitemap_only: Option<String>,

    /// Path of the JSON results file
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Also write one JSON file per crawled page
    #[arg(short, long)]
    individual_files: bool,

    /// Write only the link structure, without page records
    #[arg(long, conflicts_with = "no_link_structure")]
    links_only: bool,

    /// Omit the link structure from the results
    #[arg(short = 'n', long)]
    no_link_structure: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    let results_path = config.output.results_path.clone();
    let output = config.output.clone();

    let mode = if let Some(sitemap_url) = cli.sitemap_only.clone() {
        CrawlMode::SitemapOnly { sitemap_url }
    } else if cli.no_sitemap {
        CrawlMode::NoSitemap
    } else {
        CrawlMode::Auto
    };

    let crawler = Crawler::new(&cli.url, config)?;
    let report = crawler.run(mode).await?;

    let path = Path::new(&results_path);
    if output.links_only {
        save_links_only(&report, path).context("Failed to save link structure")?;
    } else {
        save_consolidated(&report, path).context("Failed to save results")?;
    }

    if output.individual_files {
        let written =
            save_individual_pages(&report, path).context("Failed to save individual pages")?;
        println!("✓ {} individual page files written", written);
    }

    println!(
        "✓ Crawled {} pages of {} ({} navigation links detected)",
        report.pages_crawled, report.base_domain, report.nav_links_detected
    );
    println!("✓ Results saved to: {}", results_path);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitegraph=info,warn"),
            1 => EnvFilter::new("sitegraph=debug,info"),
            2 => EnvFilter::new("sitegraph=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration and applies CLI overrides on top
///
/// Overrides are re-validated, so an out-of-range `--nav-threshold` fails
/// here rather than mid-crawl.
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path).context("Failed to load configuration")?
        }
        None => Config::default(),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(delay) = cli.delay {
        config.crawler.delay_ms = delay;
    }
    if let Some(threshold) = cli.nav_threshold {
        config.crawler.nav_threshold = threshold;
    }
    if let Some(limit) = cli.content_limit {
        config.crawler.content_limit = Some(limit);
    }
    if let Some(output) = &cli.output {
        config.output.results_path = output.clone();
    }
    if cli.individual_files {
        config.output.individual_files = true;
    }
    if cli.links_only {
        config.output.links_only = true;
    }
    if cli.no_link_structure {
        config.output.no_link_structure = true;
    }

    validate(&config).context("Invalid configuration")?;

    Ok(config)
}
