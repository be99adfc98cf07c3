use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sitegraph::config::load_config;
///
/// let config = load_config(Path::new("sitegraph.toml")).unwrap();
/// println!("Max pages: {}", config.crawler.max_pages);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}
