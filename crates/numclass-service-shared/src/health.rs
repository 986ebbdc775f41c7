//! Health check handlers for Kubernetes probes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator, always "ok" while the process can answer.
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Name of the configured fact provider (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fact_provider: Option<String>,

    /// Whether decimal input is accepted (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_input: Option<bool>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            fact_provider: None,
            decimal_input: None,
        }
    }

    /// Create a ready status describing the loaded configuration.
    pub fn ready(service: &str, version: &str, fact_provider: &str, decimal_input: bool) -> Self {
        Self {
            fact_provider: Some(fact_provider.to_string()),
            decimal_input: Some(decimal_input),
            ..Self::alive(service, version)
        }
    }
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"numclass-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// The service holds no data that must be loaded, so readiness only reports
/// the active configuration. The fact provider being down never makes the
/// service unready because classifications still succeed with the fallback.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"numclass-service-shared","version":"0.1.0","fact_provider":"numbersapi","decimal_input":true}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> impl IntoResponse {
    let status = HealthStatus::ready(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        state.facts().name(),
        state.parse_options().allow_decimal,
    );
    (StatusCode::OK, Json(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_alive() {
        let status = HealthStatus::alive("test-service", "1.0.0");
        assert_eq!(status.status, "ok");
        assert_eq!(status.service, "test-service");
        assert!(status.fact_provider.is_none());
        assert!(status.decimal_input.is_none());
    }

    #[test]
    fn test_health_status_ready() {
        let status = HealthStatus::ready("test-service", "1.0.0", "numbersapi", true);
        assert_eq!(status.status, "ok");
        assert_eq!(status.fact_provider.as_deref(), Some("numbersapi"));
        assert_eq!(status.decimal_input, Some(true));
    }

    #[test]
    fn test_health_status_serialization() {
        let status = HealthStatus::alive("classify", "0.1.0");
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"service\":\"classify\""));
        assert!(!json.contains("fact_provider"));
    }
}
