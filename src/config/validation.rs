use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if !(0.0..=1.0).contains(&config.nav_threshold) {
        return Err(ConfigError::Validation(format!(
            "nav_threshold must be between 0.0 and 1.0, got {}",
            config.nav_threshold
        )));
    }

    if let Some(limit) = config.content_limit {
        if limit < 1 {
            return Err(ConfigError::Validation(format!(
                "content_limit must be >= 1 when set, got {}",
                limit
            )));
        }
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_path.is_empty() {
        return Err(ConfigError::Validation(
            "results_path cannot be empty".to_string(),
        ));
    }

    if config.links_only && config.no_link_structure {
        return Err(ConfigError::Validation(
            "links_only and no_link_structure are mutually exclusive".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_max_pages_rejected() {
        let mut config = Config::default();
        config.crawler.max_pages = 0;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let mut config = Config::default();
        config.crawler.nav_threshold = 1.5;
        assert!(validate(&config).is_err());

        config.crawler.nav_threshold = -0.1;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_threshold_bounds_accepted() {
        let mut config = Config::default();
        config.crawler.nav_threshold = 0.0;
        assert!(validate(&config).is_ok());

        config.crawler.nav_threshold = 1.0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_crawler_name_rejected() {
        let mut config = Config::default();
        config.user_agent.crawler_name = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_crawler_name_with_spaces_rejected() {
        let mut config = Config::default();
        config.user_agent.crawler_name = "my crawler".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_results_path_rejected() {
        let mut config = Config::default();
        config.output.results_path = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_conflicting_output_flags_rejected() {
        let mut config = Config::default();
        config.output.links_only = true;
        config.output.no_link_structure = true;
        assert!(validate(&config).is_err());
    }
}
