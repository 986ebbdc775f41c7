//! Application state for the classification service.
//!
//! This module provides the shared state structure that axum handlers use to
//! reach the configured fact provider and parsing options.

use std::sync::Arc;

use numclass_lib::{Error as LibError, FactProvider, NumbersApiClient, OfflineFacts, ParseOptions};

use crate::config::{FactSource, ServiceConfig};
use crate::facts::MeteredFacts;

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to build the Numbers API client.
    FactClient(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FactClient(e) => write!(f, "failed to initialize fact provider: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FactClient(e) => Some(e),
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::FactClient(err)
    }
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable (`Arc` internally); share it through axum's `State`
/// extractor. The fact provider, and with it the HTTP connection pool, is
/// built once at startup.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use numclass_service_shared::{AppState, ServiceConfig};
///
/// async fn handler(State(state): State<AppState>) {
///     let facts = state.facts();
///     // ... use facts
/// }
///
/// let state = AppState::from_config(&ServiceConfig::from_env()).unwrap();
/// let app = Router::new()
///     .route("/api/classify-number", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    facts: Arc<dyn FactProvider>,
    parse_options: ParseOptions,
}

impl AppState {
    /// Build application state from service configuration.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, AppStateError> {
        let facts: Arc<dyn FactProvider> = match config.fact_source {
            FactSource::NumbersApi => {
                let api = config.numbers_api();
                tracing::info!(
                    base_url = %api.base_url,
                    timeout_ms = api.timeout.as_millis() as u64,
                    "using Numbers API for fun facts"
                );
                Arc::new(MeteredFacts::new(NumbersApiClient::new(api)?))
            }
            FactSource::Offline => {
                tracing::info!("fun fact lookups disabled, fallback text will be used");
                Arc::new(MeteredFacts::new(OfflineFacts))
            }
        };

        Ok(Self::from_components(facts, config.parse_options()))
    }

    /// Create application state from pre-built components.
    ///
    /// Useful for tests that inject a stub provider.
    pub fn from_components(facts: Arc<dyn FactProvider>, parse_options: ParseOptions) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                facts,
                parse_options,
            }),
        }
    }

    /// The configured fact provider.
    pub fn facts(&self) -> &dyn FactProvider {
        self.inner.facts.as_ref()
    }

    /// Parsing options applied to every request.
    pub fn parse_options(&self) -> &ParseOptions {
        &self.inner.parse_options
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("fact_provider", &self.inner.facts.name())
            .field("allow_decimal", &self.inner.parse_options.allow_decimal)
            .finish()
    }
}
