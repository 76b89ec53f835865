//! llmsec-server - HTTP entry point for the LLM security orchestrator
//!
//! Thin shim: builds a request from the HTTP body, runs it through one shared
//! [`Orchestrator`], and returns the result as JSON.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /health` | `{status, service, version}` |
//! | `POST /check` | `SecurityResult`, or 400 `{error}` |
//! | anything else | 404 `{error: "Not found"}` |

mod error;
pub mod http;

use std::sync::Arc;

use llmsec_core::{Orchestrator, ServerConfig};
use tokio::net::TcpListener;

pub use error::{ApiError, ServerError};
pub use http::create_router;

/// The security HTTP server
pub struct SecurityServer {
    config: ServerConfig,
    orchestrator: Arc<Orchestrator>,
}

impl SecurityServer {
    /// Create a server around an orchestrator
    pub fn new(config: ServerConfig, orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            config,
            orchestrator,
        }
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server, binding to the configured address
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::Bind {
                addr: addr.clone(),
                source: e,
            })?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, create_router(self.orchestrator))
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        Ok(())
    }
}
