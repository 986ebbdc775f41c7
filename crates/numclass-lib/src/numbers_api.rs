//! Numbers API client.
//!
//! Fetches trivia for a number from `GET {base}/{n}?json` and returns the
//! response body unchanged.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::debug;

use crate::error::{Error, Result};
use crate::facts::{FactProvider, FactUnavailable};

/// Default base URL of the public Numbers API.
pub const DEFAULT_NUMBERS_API_BASE: &str = "http://numbersapi.com";

/// Default upper bound on a single fact request.
pub const DEFAULT_FACT_TIMEOUT: Duration = Duration::from_millis(3_000);

/// Connection settings for [`NumbersApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumbersApiConfig {
    /// Base URL without a trailing slash, e.g. `http://numbersapi.com`.
    pub base_url: String,
    /// Total time allowed for one request, including reading the body.
    pub timeout: Duration,
}

impl Default for NumbersApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NUMBERS_API_BASE.to_string(),
            timeout: DEFAULT_FACT_TIMEOUT,
        }
    }
}

impl NumbersApiConfig {
    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// [`FactProvider`] backed by the Numbers API (`GET {base}/{n}?json`).
///
/// The underlying `reqwest` client is built once and reused for every
/// request; cloning the provider shares the same connection pool.
#[derive(Debug, Clone)]
pub struct NumbersApiClient {
    client: Client,
    base_url: String,
}

impl NumbersApiClient {
    /// Build a client with a bounded timeout.
    pub fn new(config: NumbersApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(user_agent())
            .build()
            .map_err(|e| Error::ClientBuild {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL queried for `number`.
    pub fn fact_url(&self, number: u64) -> String {
        format!("{}/{}?json", self.base_url, number)
    }
}

#[async_trait]
impl FactProvider for NumbersApiClient {
    async fn fetch_fact(&self, number: u64) -> std::result::Result<String, FactUnavailable> {
        let url = self.fact_url(number);
        debug!(url = %url, "requesting fun fact");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FactUnavailable::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(unavailable)?;
        if body.trim().is_empty() {
            return Err(FactUnavailable::EmptyBody);
        }

        Ok(body)
    }

    fn name(&self) -> &str {
        "numbersapi"
    }
}

fn unavailable(error: reqwest::Error) -> FactUnavailable {
    if error.is_timeout() {
        FactUnavailable::Timeout
    } else {
        FactUnavailable::Transport(error.to_string())
    }
}

fn user_agent() -> String {
    format!(
        "numclass-lib/{version} ({repo})",
        version = env!("CARGO_PKG_VERSION"),
        repo = "https://github.com/scetrov/numclass-rs"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = NumbersApiConfig::default();
        assert_eq!(config.base_url, "http://numbersapi.com");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_config_strips_trailing_slash() {
        let config = NumbersApiConfig::default().with_base_url("http://localhost:9000/");
        assert_eq!(config.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_fact_url() {
        let client = NumbersApiClient::new(NumbersApiConfig::default()).unwrap();
        assert_eq!(client.fact_url(371), "http://numbersapi.com/371?json");
        assert_eq!(client.name(), "numbersapi");
    }
}
