use crate::config::settings::Config;
use crate::error::SwapError;
use url::Url;

/// Loads the configuration from the environment and rejects values that
/// would only fail later at the first fetch.
pub fn load_config() -> Result<Config, SwapError> {
    let config = Config::from_env();

    Url::parse(&config.feed_url)
        .map_err(|e| SwapError::ConfigError(format!("FEED_URL is not a valid URL: {}", e)))?;

    config.validate_and_log();
    Ok(config)
}
