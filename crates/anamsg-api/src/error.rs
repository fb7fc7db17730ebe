//! # Application Error
//!
//! Maps domain errors to structured HTTP responses. Bodies carry the
//! `{error, details}` shape the browser frontend consumes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use anamsg_core::CodecError;
use anamsg_crypto::CryptoError;

/// Application-level error type that maps to HTTP responses.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required request parameter was absent.
    #[error("Missing required parameters")]
    MissingParameters(String),

    /// A request parameter was present but invalid.
    #[error("Validation failed")]
    Validation(String),

    /// Internal server error.
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameters(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> &str {
        match self {
            ApiError::MissingParameters(d) | ApiError::Validation(d) | ApiError::Internal(d) => d,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.to_string(),
            "details": self.details(),
        });
        (self.status(), axum::Json(body)).into_response()
    }
}

impl From<CodecError> for ApiError {
    fn from(err: CodecError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<CryptoError> for ApiError {
    fn from(err: CryptoError) -> Self {
        match err {
            // Recovery exhaustion is reported as output by the handler,
            // never as an HTTP failure; reaching here is a server bug.
            CryptoError::IndexNotFound { .. } => ApiError::Internal(err.to_string()),
            _ => ApiError::Validation(err.to_string()),
        }
    }
}
