//! REST API handlers

use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use llmsec_core::{Orchestrator, SecurityRequest, SecurityResult};
use serde::{Deserialize, Serialize};

use crate::ApiError;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "security-core";

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the server
    pub status: String,
    /// Service name
    pub service: String,
    /// Server version
    pub version: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Run one request through the orchestrator
///
/// The body is parsed as JSON whatever its `Content-Type`. Malformed bodies
/// and pipeline failures both answer 400 with `{error}`.
pub async fn check(
    State(orchestrator): State<Arc<Orchestrator>>,
    body: Bytes,
) -> Result<Json<SecurityResult>, ApiError> {
    let request: SecurityRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))?;
    let result = orchestrator.process(&request).await?;
    Ok(Json(result))
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
