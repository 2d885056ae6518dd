//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service and its
//! mapping onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::config::ConfigError;
use goal_tracker_core::ports::PortError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("{0}")]
    Port(#[from] PortError),

    /// The request body's `action` discriminator matched no known action.
    #[error("Invalid action")]
    InvalidAction,

    /// Login with an unknown email or a wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// A malformed request body.
    #[error("{0}")]
    BadRequest(String),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for each failure class. Nothing here is retried; every
    /// variant carries a message suitable for direct display.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Port(PortError::Credential(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Port(PortError::Unauthorized) => StatusCode::UNAUTHORIZED,
            ApiError::Port(PortError::DuplicateEmail) => StatusCode::BAD_REQUEST,
            ApiError::Port(PortError::RateLimited) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Port(PortError::QuotaExhausted) => StatusCode::PAYMENT_REQUIRED,
            ApiError::Port(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidAction | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Config(_) | ApiError::Io(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
