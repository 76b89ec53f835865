//! # LLM Security Adapters
//!
//! Narrow contracts through which the orchestrator reaches the five external
//! systems it coordinates. None of those systems live here; this crate only
//! defines how to talk to them.
//!
//! ## Adapter Set
//!
//! | Adapter | Backend trait | Simulator behavior |
//! |---------|---------------|--------------------|
//! | [`PolicyAdapter`] | [`PolicyEngine`] | One `{policyId: "default", action: allow}` decision |
//! | [`ShieldAdapter`] | [`Shield`] | Pass-through, no redactions |
//! | [`EdgeAgentAdapter`] | [`EdgeAgent`] | Enforced unless the decision is deny |
//! | [`IncidentAdapter`] | [`IncidentManager`] | Fresh `sim-incident-*` id per call |
//! | [`ConfigAdapter`] | [`ConfigManager`] | Every key absent |
//!
//! Each adapter is an enum over two variants:
//!
//! - **Bound**: forwards to a backend trait object and normalizes its reply
//! - **Simulator**: fixed, deterministic fallback for standalone operation
//!
//! The variant is chosen once, at construction. Passing `None` to an
//! adapter's `new` selects the simulator.
//!
//! ```text
//!            ┌──────────────┐
//!  core ───► │ PolicyAdapter│──► Bound(Arc<dyn PolicyEngine>) ──► backend
//!            └──────────────┘──► Simulator
//! ```
//!
//! ## Remote Backends
//!
//! [`RemoteBackend`] implements every behavioral backend trait over HTTP/JSON,
//! so a single collaborator URL is enough to bind an adapter.
//!
//! ## Error Contract
//!
//! Every adapter call returns [`AdapterError`] on failure, tagged with the
//! collaborator that failed. Adapters never retry.

mod config;
mod edge_agent;
mod error;
mod incident;
mod policy;
mod remote;
mod shield;

pub use config::{ConfigAdapter, ConfigManager, StaticConfig};
pub use edge_agent::{EdgeAgent, EdgeAgentAdapter, Enforcement, EnforcementReply};
pub use error::{AdapterError, BackendError, Result};
pub use incident::{IncidentAdapter, IncidentManager, IncidentReceipt, SIMULATED_INCIDENT_PREFIX};
pub use policy::{PolicyAdapter, PolicyEngine};
pub use remote::RemoteBackend;
pub use shield::{FilterOutcome, Shield, ShieldAdapter, ShieldReply};

/// Which variant an adapter was constructed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterMode {
    /// Forwarding to a real backend.
    Bound,
    /// Built-in fallback behavior.
    Simulator,
}

impl AdapterMode {
    /// Lowercase name used in status output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bound => "bound",
            Self::Simulator => "simulator",
        }
    }
}
