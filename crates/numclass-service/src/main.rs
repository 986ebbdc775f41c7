//! Number classification HTTP microservice.
//!
//! Classifies an integer's mathematical properties and attaches a trivia fact
//! from the Numbers API.
//!
//! # Endpoints
//!
//! - `GET /api/classify-number?number=<text>` - Classify a number
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Kubernetes liveness probe
//! - `GET /health/ready` - Kubernetes readiness probe
//!
//! # Configuration
//!
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `NUMBERS_API_BASE_URL` - Trivia service base URL (default: http://numbersapi.com)
//! - `FACT_TIMEOUT_MS` - Trivia request timeout (default: 3000)
//! - `FACT_PROVIDER` - `numbersapi` (default) or `offline`
//! - `ALLOW_DECIMAL_INPUT` - Accept `4.9` as `4` (default: true)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text

use std::net::SocketAddr;

use axum::{
    Extension, Router,
    extract::{RawQuery, State},
    routing::get,
};
use tracing::{error, info};

use numclass_lib::classify;
use numclass_service_shared::{
    AppState, ClassifyQuery, ClassifyResponse, LoggingConfig, MetricsConfig, MetricsLayer,
    RequestId, ServiceConfig, cors_layer, health_live, health_ready, init_logging, init_metrics,
    metrics_handler, record_classification_rejected, record_number_classified,
};

/// Path of the classification endpoint.
const CLASSIFY_PATH: &str = "/api/classify-number";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (reads LOG_FORMAT from environment)
    let logging_config = LoggingConfig::from_env().with_service("classify");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Metrics are optional
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env();
    info!(
        port = config.port,
        fact_source = ?config.fact_source,
        allow_decimal = config.allow_decimal,
        "starting classification service"
    );

    let state = AppState::from_config(&config).map_err(|e| {
        error!(error = %e, "failed to build application state");
        e
    })?;

    let app = build_router(state, &metrics_config.path);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Explicit route table for the service.
fn build_router(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route(CLASSIFY_PATH, get(classify_handler))
        .route(metrics_path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(cors_layer())
        .layer(MetricsLayer)
        .with_state(state)
}

/// Handle GET /api/classify-number requests.
async fn classify_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    RawQuery(raw_query): RawQuery,
) -> ClassifyResponse {
    let query = ClassifyQuery::from_query_string(raw_query.as_deref());
    info!(
        request_id = %request_id,
        number = query.raw().unwrap_or_default(),
        "handling classification request"
    );

    let result = classify(query.raw(), state.parse_options(), state.facts()).await;

    match &result {
        Ok(classification) => {
            record_number_classified(classification.parity().as_str());
            info!(
                request_id = %request_id,
                number = classification.number,
                is_prime = classification.is_prime,
                is_perfect = classification.is_perfect,
                "number classified"
            );
        }
        Err(e) => {
            let reason = query.rejection_reason();
            record_classification_rejected(reason);
            info!(request_id = %request_id, reason, error = %e, "rejected classification input");
        }
    }

    ClassifyResponse::from(result)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use numclass_lib::{FactUnavailable, ParseOptions};
    use numclass_service_shared::test_utils::{StaticFacts, state_with_fact, test_state};
    use serde_json::{Value, json};

    use super::*;

    fn server(state: AppState) -> TestServer {
        TestServer::new(build_router(state, "/metrics")).unwrap()
    }

    async fn classify_body(server: &TestServer, number: &str) -> (StatusCode, Value) {
        let response = server
            .get(CLASSIFY_PATH)
            .add_query_param("number", number)
            .await;
        (response.status_code(), response.json::<Value>())
    }

    #[tokio::test]
    async fn test_classify_armstrong_number() {
        let server = server(state_with_fact(r#"{"text":"371 is an Armstrong number"}"#));
        let (status, body) = classify_body(&server, "371").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "number": 371,
                "is_prime": false,
                "is_perfect": false,
                "properties": ["armstrong", "odd"],
                "digit_sum": 11,
                "fun_fact": "{\"text\":\"371 is an Armstrong number\"}"
            })
        );
    }

    #[tokio::test]
    async fn test_classify_perfect_even_number() {
        let server = server(state_with_fact("28 is perfect"));
        let (status, body) = classify_body(&server, "28").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_perfect"], true);
        assert_eq!(body["is_prime"], false);
        assert_eq!(body["properties"], json!(["even"]));
        assert_eq!(body["digit_sum"], 10);
    }

    #[tokio::test]
    async fn test_negative_number_rejected() {
        let facts = Arc::new(StaticFacts::fact("unused"));
        let server = server(test_state(facts.clone(), ParseOptions::default()));
        let (status, body) = classify_body(&server, "-5").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"number": "-5", "error": true}));
        assert_eq!(facts.calls(), 0);
    }

    #[tokio::test]
    async fn test_non_numeric_rejected() {
        let server = server(state_with_fact("unused"));
        let (status, body) = classify_body(&server, "abc").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"number": "abc", "error": true}));
    }

    #[tokio::test]
    async fn test_empty_number_rejected() {
        let server = server(state_with_fact("unused"));
        let (status, body) = classify_body(&server, "").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"number": "", "error": true}));
    }

    #[tokio::test]
    async fn test_missing_number_rejected() {
        let server = server(state_with_fact("unused"));
        let response = server.get(CLASSIFY_PATH).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({"number": "", "error": true})
        );
    }

    #[tokio::test]
    async fn test_repeated_number_rejected_as_json() {
        let facts = Arc::new(StaticFacts::fact("unused"));
        let server = server(test_state(facts.clone(), ParseOptions::default()));
        let response = server
            .get(&format!("{}?number=5&number=7", CLASSIFY_PATH))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        assert_eq!(
            response.json::<Value>(),
            json!({"number": "5,7", "error": true})
        );
        assert_eq!(facts.calls(), 0);
    }

    #[tokio::test]
    async fn test_large_prime_classified() {
        let server = server(state_with_fact("big"));
        let (status, body) = classify_body(&server, "9223372036854775783").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["number"], 9_223_372_036_854_775_783u64);
        assert_eq!(body["is_prime"], true);
        assert_eq!(body["is_perfect"], false);
        assert_eq!(body["properties"], json!(["odd"]));
    }

    #[tokio::test]
    async fn test_decimal_input_truncates() {
        let server = server(state_with_fact("4 is a number"));
        let (status, body) = classify_body(&server, "4.9").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["number"], 4);
        assert_eq!(body["properties"], json!(["armstrong", "even"]));
    }

    #[tokio::test]
    async fn test_decimal_input_rejected_when_disabled() {
        let facts = Arc::new(StaticFacts::fact("unused"));
        let server = server(test_state(facts, ParseOptions::strict()));
        let (status, body) = classify_body(&server, "4.9").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"number": "4.9", "error": true}));
    }

    #[tokio::test]
    async fn test_fact_failure_falls_back() {
        let facts = Arc::new(StaticFacts::failing(FactUnavailable::Timeout));
        let server = server(test_state(facts.clone(), ParseOptions::default()));
        let (status, body) = classify_body(&server, "7").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["number"], 7);
        assert_eq!(body["is_prime"], true);
        assert_eq!(body["properties"], json!(["armstrong", "odd"]));
        assert_eq!(body["fun_fact"], "No fun fact available");
        assert_eq!(facts.calls(), 1);
    }

    #[tokio::test]
    async fn test_zero_edge_case() {
        let server = server(state_with_fact("zero"));
        let (status, body) = classify_body(&server, "0").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_prime"], false);
        assert_eq!(body["is_perfect"], false);
        assert_eq!(body["properties"], json!(["armstrong", "even"]));
        assert_eq!(body["digit_sum"], 0);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let server = server(state_with_fact("fact"));
        let response = server
            .get(CLASSIFY_PATH)
            .add_query_param("number", "2")
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static("https://example.com"),
            )
            .await;

        response.assert_status_ok();
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }

    #[tokio::test]
    async fn test_request_id_echoed() {
        let server = server(state_with_fact("fact"));
        let response = server
            .get(CLASSIFY_PATH)
            .add_query_param("number", "13")
            .add_header(
                HeaderName::from_static("x-request-id"),
                HeaderValue::from_static("req-abc"),
            )
            .await;

        response.assert_status_ok();
        assert_eq!(
            response
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok()),
            Some("req-abc")
        );
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let server = server(state_with_fact("fact"));

        let live = server.get("/health/live").await;
        live.assert_status_ok();
        assert_eq!(live.json::<Value>()["status"], "ok");

        let ready = server.get("/health/ready").await;
        ready.assert_status_ok();
        let body = ready.json::<Value>();
        assert_eq!(body["fact_provider"], "static");
        assert_eq!(body["decimal_input"], true);
    }

    #[tokio::test]
    async fn test_metrics_endpoint_responds() {
        let server = server(state_with_fact("fact"));
        let response = server.get("/metrics").await;

        response.assert_status_ok();
        assert!(!response.text().is_empty());
    }
}
