//! Price feed client. One GET against a public JSON endpoint returning
//! an array of `{currency, price, date?}` records. A failed load is a
//! single terminal error for that attempt; there is deliberately no
//! retry policy here (the upstream source specifies none).

use crate::catalog::RawPriceEntry;
use crate::error::SwapError;
use async_trait::async_trait;
use log::{info, warn};
use std::time::Duration;

/// Seam between the session and whatever produces raw price records.
/// Tests swap in a canned implementation.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_prices(&self) -> Result<Vec<RawPriceEntry>, SwapError>;
}

/// HTTP implementation against the configured feed URL.
#[derive(Debug)]
pub struct HttpPriceFeed {
    client: reqwest::Client,
    feed_url: String,
    timeout: Duration,
}

impl HttpPriceFeed {
    pub fn new(feed_url: &str, timeout: Duration) -> Result<Self, SwapError> {
        // Fail fast on a malformed URL instead of at first fetch.
        url::Url::parse(feed_url)?;
        Ok(Self {
            client: reqwest::Client::new(),
            feed_url: feed_url.to_string(),
            timeout,
        })
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }
}

#[async_trait]
impl PriceSource for HttpPriceFeed {
    async fn fetch_prices(&self) -> Result<Vec<RawPriceEntry>, SwapError> {
        info!("Fetching token prices from {}", self.feed_url);

        let response = self
            .client
            .get(&self.feed_url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                warn!("Price feed request to {} failed: {}", self.feed_url, e);
                SwapError::FeedUnavailable(format!("request failed: {}", e))
            })?;

        if !response.status().is_success() {
            warn!("Price feed returned HTTP {}", response.status());
            return Err(SwapError::FeedUnavailable(format!(
                "feed returned status {}",
                response.status()
            )));
        }

        let entries: Vec<RawPriceEntry> = response.json().await.map_err(|e| {
            warn!("Price feed payload could not be parsed: {}", e);
            SwapError::FeedUnavailable(format!("unparsable payload: {}", e))
        })?;

        info!("Price feed returned {} raw entries", entries.len());
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_malformed_feed_url() {
        let err = HttpPriceFeed::new("not a url", Duration::from_secs(10)).unwrap_err();
        assert!(matches!(err, SwapError::ConfigError(_)));
    }

    #[test]
    fn test_accepts_https_feed_url() {
        let feed =
            HttpPriceFeed::new("https://interview.switcheo.com/prices.json", Duration::from_secs(10))
                .unwrap();
        assert_eq!(feed.feed_url(), "https://interview.switcheo.com/prices.json");
    }
}
