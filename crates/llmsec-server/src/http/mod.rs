//! HTTP server module

mod api;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use llmsec_core::Orchestrator;
use tower_http::trace::TraceLayer;

pub use api::{HealthResponse, SERVICE_NAME};

/// Create the HTTP router with all routes configured
pub fn create_router(orchestrator: Arc<Orchestrator>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/check", post(api::check))
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(orchestrator)
}
