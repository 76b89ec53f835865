//! Adapter for the edge agent (runtime enforcement).

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use llmsec_model::{PolicyAction, PolicyDecision, SecurityRequest};
use serde::{Deserialize, Serialize};

use crate::error::{AdapterError, BackendError, Result};
use crate::AdapterMode;

/// Raw reply from an edge agent backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnforcementReply {
    /// Whether the decision was enforced. Missing means enforced.
    #[serde(default)]
    pub enforced: Option<bool>,
    /// Replacement content produced by enforcement.
    #[serde(default)]
    pub modifications: Option<String>,
}

/// Normalized enforcement outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enforcement {
    /// False when the agent rejected the request.
    pub enforced: bool,
    /// Replacement content, if any.
    pub modifications: Option<String>,
}

/// An edge agent backend.
#[async_trait]
pub trait EdgeAgent: Send + Sync {
    /// Apply runtime controls for `decision` to `request`.
    async fn enforce(
        &self,
        request: &SecurityRequest,
        decision: &PolicyDecision,
    ) -> std::result::Result<EnforcementReply, BackendError>;
}

/// Runtime enforcement, bound to a backend or simulated.
#[derive(Clone, Default)]
pub enum EdgeAgentAdapter {
    /// Forward to a real edge agent.
    Bound(Arc<dyn EdgeAgent>),
    /// Honor the decision without enforcing anything.
    #[default]
    Simulator,
}

impl EdgeAgentAdapter {
    /// Bind to `agent` if given, otherwise simulate.
    pub fn new(agent: Option<Arc<dyn EdgeAgent>>) -> Self {
        agent.map_or(Self::Simulator, Self::Bound)
    }

    /// Which variant this adapter is.
    pub fn mode(&self) -> AdapterMode {
        match self {
            Self::Bound(_) => AdapterMode::Bound,
            Self::Simulator => AdapterMode::Simulator,
        }
    }

    /// Enforce `decision` on `request`.
    pub async fn enforce(
        &self,
        request: &SecurityRequest,
        decision: &PolicyDecision,
    ) -> Result<Enforcement> {
        match self {
            Self::Bound(agent) => {
                let reply = agent
                    .enforce(request, decision)
                    .await
                    .map_err(AdapterError::EdgeAgent)?;
                Ok(Enforcement {
                    enforced: reply.enforced.unwrap_or(true),
                    modifications: reply.modifications,
                })
            }
            Self::Simulator => Ok(Enforcement {
                enforced: decision.action != PolicyAction::Deny,
                modifications: None,
            }),
        }
    }
}

impl fmt::Debug for EdgeAgentAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EdgeAgentAdapter").field(&self.mode()).finish()
    }
}
