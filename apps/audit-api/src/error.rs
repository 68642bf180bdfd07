//! Error types for the audit server

use audit_engine::AuditError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Could not extract text from the document")]
    ExtractionEmpty,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Classification failed: {0}")]
    Classification(String),

    #[error("{0}")]
    Timeout(String),

    #[error("Inference backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl ServerError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ServerError::ExtractionEmpty => (StatusCode::BAD_REQUEST, "EXTRACTION_EMPTY"),
            ServerError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ServerError::Classification(_) => (StatusCode::BAD_GATEWAY, "CLASSIFICATION_FAILED"),
            ServerError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT"),
            ServerError::BackendUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "BACKEND_UNAVAILABLE")
            }
            ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::InvalidRequest(rejection.body_text())
    }
}

impl From<AuditError> for ServerError {
    fn from(err: AuditError) -> Self {
        match err {
            AuditError::ExtractionEmpty => ServerError::ExtractionEmpty,
            AuditError::ClassificationFailed { .. }
            | AuditError::MalformedClassification { .. } => {
                ServerError::Classification(err.to_string())
            }
            AuditError::Timeout { .. } => ServerError::Timeout(err.to_string()),
            AuditError::BackendInit(msg) => ServerError::BackendUnavailable(msg),
            AuditError::InvalidConfig(msg) => ServerError::Internal(msg),
        }
    }
}
