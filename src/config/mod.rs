//! Configuration handling for Sitegraph
//!
//! Configuration can come from a TOML file, from defaults, or from CLI
//! overrides applied on top of either. Validation runs on every load.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
pub use validation::validate;
