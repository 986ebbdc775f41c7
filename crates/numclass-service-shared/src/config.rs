//! Service configuration read from environment variables.
//!
//! # Environment Variables
//!
//! - `SERVICE_PORT`: HTTP port (default: 8080)
//! - `NUMBERS_API_BASE_URL`: Base URL of the trivia service (default: `http://numbersapi.com`)
//! - `FACT_TIMEOUT_MS`: Upper bound on one trivia request in milliseconds (default: 3000)
//! - `FACT_PROVIDER`: `numbersapi` (default) or `offline`
//! - `ALLOW_DECIMAL_INPUT`: accept decimal input by truncation (default: true)

use std::time::Duration;

use numclass_lib::{
    NumbersApiConfig, ParseOptions, DEFAULT_FACT_TIMEOUT, DEFAULT_NUMBERS_API_BASE,
};
use serde::{Deserialize, Serialize};

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Which fact provider the service should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FactSource {
    /// Query the Numbers API over HTTP (default).
    #[default]
    NumbersApi,
    /// Never query; every response uses the fallback fact.
    Offline,
}

impl FactSource {
    /// Parse a provider name.
    ///
    /// Accepts "offline" or "none" for [`FactSource::Offline`]; any other value
    /// selects the Numbers API.
    pub fn from_name(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "offline" | "none" => FactSource::Offline,
            _ => FactSource::NumbersApi,
        }
    }
}

/// Runtime configuration for the classification service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Port the HTTP listener binds to.
    pub port: u16,
    /// Fact provider selection.
    pub fact_source: FactSource,
    /// Base URL of the Numbers API.
    pub numbers_api_base_url: String,
    /// Timeout for a single fact request.
    pub fact_timeout: Duration,
    /// Accept decimal input such as `4.9` by truncating toward zero.
    pub allow_decimal: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            fact_source: FactSource::NumbersApi,
            numbers_api_base_url: DEFAULT_NUMBERS_API_BASE.to_string(),
            fact_timeout: DEFAULT_FACT_TIMEOUT,
            allow_decimal: true,
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables, falling back to
    /// defaults for anything missing or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// Lets tests supply values without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = lookup("SERVICE_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let fact_source = lookup("FACT_PROVIDER")
            .map(|v| FactSource::from_name(&v))
            .unwrap_or(defaults.fact_source);

        let numbers_api_base_url = lookup("NUMBERS_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.numbers_api_base_url);

        let fact_timeout = lookup("FACT_TIMEOUT_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.fact_timeout);

        let allow_decimal = lookup("ALLOW_DECIMAL_INPUT")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(defaults.allow_decimal);

        Self {
            port,
            fact_source,
            numbers_api_base_url,
            fact_timeout,
            allow_decimal,
        }
    }

    /// Parsing options derived from this configuration.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            allow_decimal: self.allow_decimal,
        }
    }

    /// Numbers API client settings derived from this configuration.
    pub fn numbers_api(&self) -> NumbersApiConfig {
        NumbersApiConfig::default()
            .with_base_url(self.numbers_api_base_url.clone())
            .with_timeout(self.fact_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServiceConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.port, 8080);
        assert!(config.allow_decimal);
        assert_eq!(config.fact_timeout, Duration::from_millis(3000));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SERVICE_PORT", "9090"),
            ("FACT_PROVIDER", "offline"),
            ("NUMBERS_API_BASE_URL", "http://localhost:3000/"),
            ("FACT_TIMEOUT_MS", "250"),
            ("ALLOW_DECIMAL_INPUT", "FALSE"),
        ]);

        assert_eq!(config.port, 9090);
        assert_eq!(config.fact_source, FactSource::Offline);
        assert_eq!(config.fact_timeout, Duration::from_millis(250));
        assert!(!config.allow_decimal);
        assert_eq!(config.parse_options(), ParseOptions::strict());
        assert_eq!(config.numbers_api().base_url, "http://localhost:3000");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("SERVICE_PORT", "not-a-port"),
            ("FACT_TIMEOUT_MS", "0"),
            ("NUMBERS_API_BASE_URL", "  "),
        ]);

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.fact_timeout, DEFAULT_FACT_TIMEOUT);
        assert_eq!(config.numbers_api_base_url, DEFAULT_NUMBERS_API_BASE);
    }

    #[test]
    fn test_fact_source_from_str() {
        assert_eq!(FactSource::from_name("offline"), FactSource::Offline);
        assert_eq!(FactSource::from_name("NONE"), FactSource::Offline);
        assert_eq!(FactSource::from_name("numbersapi"), FactSource::NumbersApi);
        assert_eq!(FactSource::from_name("other"), FactSource::NumbersApi);
    }
}
