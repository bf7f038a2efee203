use crate::config::types::{
    Config, EndpointConfig, HttpConfig, OutputConfig, PacingConfig, DESCRIPTION_ID_PLACEHOLDER,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_http_config(&config.http)?;
    validate_endpoint_config(&config.endpoints)?;
    validate_pacing_config(&config.pacing)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Replaces the output directory, rejecting a value that would not validate
///
/// Used for the command-line override, which is applied after the file has
/// already been validated.
pub fn override_output_directory(config: &mut Config, directory: &str) -> Result<(), ConfigError> {
    let output = OutputConfig {
        directory: directory.to_string(),
    };
    validate_output_config(&output)?;
    config.output = output;
    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 || config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be between 1 and timeout-secs ({}), got {}",
            config.timeout_secs, config.connect_timeout_secs
        )));
    }

    if config.user_agents.is_empty() {
        return Err(ConfigError::Validation(
            "user-agents must contain at least one entry".to_string(),
        ));
    }

    if let Some(blank) = config.user_agents.iter().position(|ua| ua.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "user-agents entry #{} is blank",
            blank
        )));
    }

    Ok(())
}

/// Validates endpoint URLs
fn validate_endpoint_config(config: &EndpointConfig) -> Result<(), ConfigError> {
    validate_http_url("search-url", &config.search_url)?;
    validate_http_url("site-base-url", &config.site_base_url)?;
    validate_http_url("image-base-url", &config.image_base_url)?;

    if !config.description_url.contains(DESCRIPTION_ID_PLACEHOLDER) {
        return Err(ConfigError::Validation(format!(
            "description-url must contain the {} placeholder",
            DESCRIPTION_ID_PLACEHOLDER
        )));
    }
    validate_http_url("description-url", &config.description_url_for(0))?;

    Ok(())
}

/// Validates that a configured URL parses and uses an HTTP scheme
fn validate_http_url(name: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", name, value, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            name, value
        )));
    }

    Ok(())
}

/// Validates jitter ranges
fn validate_pacing_config(config: &PacingConfig) -> Result<(), ConfigError> {
    if config.page_delay_min_ms > config.page_delay_max_ms {
        return Err(ConfigError::Validation(format!(
            "page-delay-min-ms ({}) must not exceed page-delay-max-ms ({})",
            config.page_delay_min_ms, config.page_delay_max_ms
        )));
    }

    if config.detail_delay_min_ms > config.detail_delay_max_ms {
        return Err(ConfigError::Validation(format!(
            "detail-delay-min-ms ({}) must not exceed detail-delay-max-ms ({})",
            config.detail_delay_min_ms, config.detail_delay_max_ms
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}
