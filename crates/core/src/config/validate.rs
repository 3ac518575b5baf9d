use reqwest::Url;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Ratings URL parses as an http(s) URL with a host
/// - Ratings timeout is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let url = Url::parse(config.ratings.url.trim()).map_err(|e| {
        ConfigError::ValidationError(format!(
            "ratings.url '{}' is not a valid URL: {}",
            config.ratings.url, e
        ))
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::ValidationError(format!(
            "ratings.url must be an http(s) URL with a host, got '{}'",
            config.ratings.url
        )));
    }

    if config.ratings.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "ratings.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
