//! HTTP responses for the classification endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use numclass_lib::{ClassificationError, ClassificationResult, Error as LibError};
use serde::Serialize;

/// Either a classification (200) or a rejected-input body (400).
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ClassifyResponse {
    Success(ClassificationResult),
    Rejected(ClassificationError),
}

impl ClassifyResponse {
    /// HTTP status for this response.
    pub fn status(&self) -> StatusCode {
        match self {
            ClassifyResponse::Success(_) => StatusCode::OK,
            ClassifyResponse::Rejected(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<Result<ClassificationResult, LibError>> for ClassifyResponse {
    fn from(result: Result<ClassificationResult, LibError>) -> Self {
        match result {
            Ok(classification) => ClassifyResponse::Success(classification),
            Err(error) => ClassifyResponse::Rejected(ClassificationError::from(&error)),
        }
    }
}

impl IntoResponse for ClassifyResponse {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ClassifyResponse::Success(body) => (status, Json(body)).into_response(),
            ClassifyResponse::Rejected(body) => (status, Json(body)).into_response(),
        }
    }
}
