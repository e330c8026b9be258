use crate::config::types::{
    CatalogConfig, Config, OutputConfig, SelectorConfig, TimingConfig, UserAgentConfig,
};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalog_config(&config.catalog)?;
    validate_selectors(&config.selectors)?;
    validate_timing_config(&config.timing)?;
    validate_output_config(&config.output)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates the catalog location
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.root_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid root_url '{}': {}", config.root_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "root_url '{}' must use http or https",
            config.root_url
        )));
    }

    if config.path_marker.trim().is_empty() {
        return Err(ConfigError::Validation(
            "path_marker cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates that every selector parses
fn validate_selectors(config: &SelectorConfig) -> Result<(), ConfigError> {
    for (name, selector) in [
        ("side-menu", &config.side_menu),
        ("listing-item", &config.listing_item),
        ("subcategory", &config.subcategory),
        ("title", &config.title),
        ("price", &config.price),
        ("rating", &config.rating),
        ("reviews", &config.reviews),
        ("pagination", &config.pagination),
        ("pagination-last", &config.pagination_last),
    ] {
        if Selector::parse(selector).is_err() {
            return Err(ConfigError::InvalidSelector(format!(
                "{} = '{}'",
                name, selector
            )));
        }
    }

    Ok(())
}

/// Validates wait budgets
fn validate_timing_config(config: &TimingConfig) -> Result<(), ConfigError> {
    if config.element_wait_ms == 0 {
        return Err(ConfigError::Validation(
            "element_wait_ms must be > 0".to_string(),
        ));
    }

    if config.poll_interval_ms == 0 || config.poll_interval_ms > config.element_wait_ms {
        return Err(ConfigError::Validation(format!(
            "poll_interval_ms must be between 1 and element_wait_ms ({}), got {}",
            config.element_wait_ms, config.poll_interval_ms
        )));
    }

    if config.click_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "click_retries must be >= 1, got {}",
            config.click_retries
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.table_path.is_empty() {
        return Err(ConfigError::Validation(
            "table_path cannot be empty".to_string(),
        ));
    }

    if config.table_fallback_path.is_empty() {
        return Err(ConfigError::Validation(
            "table_fallback_path cannot be empty".to_string(),
        ));
    }

    if config.table_path == config.table_fallback_path {
        return Err(ConfigError::Validation(format!(
            "table_fallback_path must differ from table_path ('{}')",
            config.table_path
        )));
    }

    if config.summary_path.is_empty() {
        return Err(ConfigError::Validation(
            "summary_path cannot be empty".to_string(),
        ));
    }

    if config.top_n == 0 {
        return Err(ConfigError::Validation("top_n must be >= 1".to_string()));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
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

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}
