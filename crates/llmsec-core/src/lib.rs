//! # LLM Security Core
//!
//! Security-decision orchestrator for LLM traffic.
//! Mediates prompts, model outputs and runtime events through policy
//! evaluation, content filtering, runtime enforcement and incident signaling.
//!
//! ## Collaborators
//!
//! The core owns no policy rules, filters or alerting of its own. It reaches
//! five external systems through the adapters in `llmsec-adapters`:
//!
//! | Step | Collaborator | Role |
//! |------|--------------|------|
//! | 1 | Policy engine | Returns ordered policy decisions |
//! | 3 | Shield | Filters and redacts content |
//! | 5 | Edge agent | Enforces the primary decision at runtime |
//! | 2, 6, 7 | Incident manager | Receives violation signals |
//! | - | Config manager | Settings and secrets for the entry points |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      LLM SECURITY CORE                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │   request ──► Policy ──deny──► Incident(high) ──► blocked       │
//! │                 │                                               │
//! │                 ▼                                               │
//! │              Shield (prompt/output, or filter/redact asked)     │
//! │                 │                                               │
//! │                 ▼                                               │
//! │             Edge Agent ─rejected─► Incident(medium) ──► blocked │
//! │                 │                                               │
//! │                 ▼                                               │
//! │     residual non-allow ──► Incident(low) ──► allowed            │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use llmsec_core::{SecurityCore, SecurityRequest, RequestKind};
//!
//! let orchestrator = SecurityCore::builder()
//!     .policy_engine(my_engine)
//!     .build();
//!
//! let request = SecurityRequest::new("r1", RequestKind::Prompt, "hi");
//! let result = orchestrator.process(&request).await?;
//! if result.allowed {
//!     forward(result.filtered);
//! }
//! ```
//!
//! ## Security Notes
//!
//! - Steps run in a fixed order that is not configurable
//! - Any deny wins over every other decision
//! - At most one incident is raised per request
//! - Adapter failures abort the request; there is no fail-open default

mod adapters;
mod builder;
mod config;
mod error;
mod handler;
mod orchestrator;

pub use adapters::Adapters;
pub use builder::{SecurityCore, SecurityCoreBuilder};
pub use config::{BackendConfig, SecurityCoreConfig, ServerConfig, PORT_ENV};
pub use error::SecurityError;
pub use handler::{
    EventOutcome, SecurityEvent, SecurityHandler, EVENT_CONFIG_RELOAD, EVENT_SECURITY_REQUEST,
};
pub use orchestrator::Orchestrator;

// Re-export model and adapter types for convenience
pub use llmsec_adapters::{AdapterError, AdapterMode};
pub use llmsec_model::{
    FilterMode, IncidentKind, IncidentSignal, PolicyAction, PolicyDecision, Redaction,
    RequestKind, RequestMetadata, SecurityRequest, SecurityResult, Severity, Violation,
    INCIDENT_SOURCE,
};

/// Core result type for security operations.
pub type Result<T> = std::result::Result<T, SecurityError>;

#[cfg(test)]
mod tests;
