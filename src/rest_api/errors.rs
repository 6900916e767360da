//! # REST API Errors
//!
//! Error types for the car REST API.
//!
//! Validation failures are answered with status 422 and the bare
//! field→message map as body. Every other error uses
//! `{ "error": <message>, "code": <status> }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::validation::ValidationErrorMap;

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Candidate record rejected by the car schema
    #[error("Car record failed validation ({} field(s))", .0.len())]
    Validation(ValidationErrorMap),

    /// Request body is not JSON or exceeds the size limit
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Path id is not a car id
    #[error("Invalid car id: {0}")]
    InvalidId(String),

    /// Car not found
    #[error("Car {0} not found")]
    NotFound(u64),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Internal error (store lock poisoned, missing validated record)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RestError::InvalidBody(_) | RestError::InvalidId(_) => StatusCode::BAD_REQUEST,
            RestError::NotFound(_) => StatusCode::NOT_FOUND,
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<RestError> for ErrorResponse {
    fn from(err: RestError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            RestError::Validation(errors) => (status, Json(errors)).into_response(),
            other => (status, Json(ErrorResponse::from(other))).into_response(),
        }
    }
}
