use thiserror::Error;

/// Error taxonomy for the exchange core. Every variant is recovered
/// locally (surfaced as an inline message); none of them tear down the
/// session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SwapError {
    /// Price feed fetch failed or returned unparsable data.
    #[error("Feed Unavailable: {0}")]
    FeedUnavailable(String),

    /// A selected symbol has no entry in the catalog.
    #[error("Price Unavailable: {0}")]
    PriceUnavailable(String),

    /// Input amount is empty or non-positive at submission time.
    #[error("Invalid Amount: {0}")]
    InvalidAmount(String),

    /// From-symbol equals to-symbol at submission time.
    #[error("Same Token Swap: {0}")]
    SameTokenSwap(String),

    /// Configuration errors (bad feed URL, etc.)
    #[error("Config Error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for SwapError {
    fn from(err: reqwest::Error) -> Self {
        SwapError::FeedUnavailable(format!("HTTP request error: {}", err))
    }
}

impl From<serde_json::Error> for SwapError {
    fn from(err: serde_json::Error) -> Self {
        SwapError::FeedUnavailable(format!("JSON deserialization error: {}", err))
    }
}

impl From<url::ParseError> for SwapError {
    fn from(err: url::ParseError) -> Self {
        SwapError::ConfigError(format!("Invalid URL: {}", err))
    }
}

impl SwapError {
    /// Determines if an error is recoverable through retry.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SwapError::FeedUnavailable(_) => true, // The feed might come back
            SwapError::PriceUnavailable(_) => false, // Needs a different token selection
            SwapError::InvalidAmount(_) => false,  // Input needs fixing
            SwapError::SameTokenSwap(_) => false,  // Input needs fixing
            SwapError::ConfigError(_) => false,    // Config needs fixing
        }
    }

    /// The user-visible message rendered inline by the presentation layer.
    pub fn user_message(&self) -> &'static str {
        match self {
            SwapError::FeedUnavailable(_) => "Failed to load token prices",
            SwapError::PriceUnavailable(_) => "Price data unavailable for selected tokens",
            SwapError::InvalidAmount(_) => "Please enter a valid amount",
            SwapError::SameTokenSwap(_) => "Cannot swap the same currency",
            SwapError::ConfigError(_) => "Configuration error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_match_ui_contract() {
        assert_eq!(
            SwapError::FeedUnavailable("timeout".to_string()).user_message(),
            "Failed to load token prices"
        );
        assert_eq!(
            SwapError::PriceUnavailable("XRP".to_string()).user_message(),
            "Price data unavailable for selected tokens"
        );
        assert_eq!(
            SwapError::InvalidAmount("empty".to_string()).user_message(),
            "Please enter a valid amount"
        );
        assert_eq!(
            SwapError::SameTokenSwap("BTC".to_string()).user_message(),
            "Cannot swap the same currency"
        );
    }

    #[test]
    fn test_recoverability_classification() {
        assert!(SwapError::FeedUnavailable("503".to_string()).is_recoverable());
        assert!(!SwapError::PriceUnavailable("XRP".to_string()).is_recoverable());
        assert!(!SwapError::SameTokenSwap("BTC".to_string()).is_recoverable());
    }
}
