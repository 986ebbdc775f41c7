//! Shared infrastructure for the number classification HTTP service.
//!
//! This crate provides the HTTP glue around `numclass-lib`:
//!
//! - [`AppState`]: The configured fact provider and parsing options
//! - [`ServiceConfig`]: Environment-driven configuration
//! - [`health`]: Health check handlers for Kubernetes liveness/readiness probes
//! - [`ClassifyResponse`]: 200/400 responses for the classification endpoint
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking, metrics and CORS layers
//!
//! # Architecture
//!
//! The service follows a thin-handler pattern where all classification logic
//! resides in `numclass-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Extract the raw `number` query parameter                 │
//! │  - Call numclass_lib::classify                              │
//! │  - Record metrics and format the 200/400 response           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a canned fact provider and state
//! builders. Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

pub mod config;
mod facts;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{FactSource, ServiceConfig};
pub use facts::MeteredFacts;
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_classification_rejected, record_fun_fact_latency,
    record_fun_fact_unavailable, record_number_classified, MetricsConfig, MetricsError,
};
pub use middleware::{cors_layer, extract_or_generate_request_id, MetricsLayer, RequestId};
pub use request::ClassifyQuery;
pub use response::ClassifyResponse;
pub use state::{AppState, AppStateError};
