use std::env;

pub const DEFAULT_FEED_URL: &str = "https://interview.switcheo.com/prices.json";
pub const DEFAULT_ICON_BASE_URL: &str =
    "https://raw.githubusercontent.com/Switcheo/token-icons/main/tokens";

#[derive(Debug, Clone)]
pub struct Config {
    pub feed_url: String,
    pub http_timeout_secs: u64,
    pub icon_base_url: String,
    /// Simulated settlement delay applied by the submission flow.
    pub submit_delay_ms: u64,
    /// How long the success banner stays up before amounts are cleared.
    pub success_clear_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            feed_url: env::var("FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string()),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            icon_base_url: env::var("ICON_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_ICON_BASE_URL.to_string()),
            submit_delay_ms: env::var("SUBMIT_DELAY_MS")
                .unwrap_or_else(|_| "2000".to_string())
                .parse()
                .unwrap_or(2000),
            success_clear_ms: env::var("SUCCESS_CLEAR_MS")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        }
    }

    pub fn validate_and_log(&self) {
        log::info!("Application Configuration Loaded: {:?}", self);
        if self.feed_url.is_empty() {
            log::error!("FEED_URL cannot be empty.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // Only inspect fields no test environment is expected to override.
        let config = Config::from_env();
        assert!(!config.feed_url.is_empty());
        assert!(config.http_timeout_secs > 0);
        assert!(config.submit_delay_ms > 0);
    }
}
