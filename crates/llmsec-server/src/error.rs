//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use llmsec_core::SecurityError;
use serde_json::json;
use thiserror::Error;

/// Errors that can occur while starting the server
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors returned to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body could not be read as a security request
    #[error("{0}")]
    BadRequest(String),

    /// The pipeline failed
    #[error(transparent)]
    Security(#[from] SecurityError),

    /// No such route
    #[error("Not found")]
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) | ApiError::Security(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        };
        if let ApiError::Security(err) = &self {
            tracing::warn!("Security check failed: {}", err);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
