//! # LLM Security Model
//!
//! Request-scoped value types that flow through the security orchestrator.
//!
//! ## Overview
//!
//! | Type | Direction | Purpose |
//! |------|-----------|---------|
//! | [`SecurityRequest`] | inbound | A prompt, model output, or runtime event to mediate |
//! | [`PolicyDecision`] | policy engine → core | One rule's verdict on a request |
//! | [`IncidentSignal`] | core → incident manager | A raised violation |
//! | [`SecurityResult`] | outbound | The single aggregate verdict per request |
//!
//! All types serialize to camelCase JSON. The request kind travels under the
//! `type` key so the wire shape matches what upstream callers send.
//!
//! ## Usage
//!
//! ```rust
//! use llmsec_model::{RequestKind, SecurityRequest};
//!
//! let request = SecurityRequest::new("r1", RequestKind::Prompt, "hi");
//! let json = serde_json::to_value(&request).unwrap();
//! assert_eq!(json["type"], "prompt");
//! ```

mod decision;
mod incident;
mod request;
mod result;

pub use decision::{PolicyAction, PolicyDecision};
pub use incident::{IncidentKind, IncidentSignal, Severity, INCIDENT_SOURCE};
pub use request::{FilterMode, RequestKind, RequestMetadata, SecurityRequest};
pub use result::{Redaction, SecurityResult, Violation};
