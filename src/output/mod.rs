//! Result reporting and JSON serialization

mod json;
mod report;

pub use json::{pages_dir_for, save_consolidated, save_individual_pages, save_links_only};
pub use report::{CrawlReport, LinkStructure, PageRecord};
