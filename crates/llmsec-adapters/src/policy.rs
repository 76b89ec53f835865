//! Adapter for the policy engine.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use llmsec_model::{PolicyDecision, SecurityRequest};
use tracing::debug;

use crate::error::{AdapterError, BackendError, Result};
use crate::AdapterMode;

/// A policy engine backend.
///
/// Implementations return decisions in their declared precedence order; the
/// orchestrator relies on that order.
#[async_trait]
pub trait PolicyEngine: Send + Sync {
    /// Evaluate every applicable rule against `request`.
    async fn evaluate(
        &self,
        request: &SecurityRequest,
    ) -> std::result::Result<Vec<PolicyDecision>, BackendError>;
}

/// Policy evaluation, bound to a backend or simulated.
#[derive(Clone, Default)]
pub enum PolicyAdapter {
    /// Forward to a real policy engine.
    Bound(Arc<dyn PolicyEngine>),
    /// Always allow under the `default` policy.
    #[default]
    Simulator,
}

impl PolicyAdapter {
    /// Bind to `engine` if given, otherwise simulate.
    pub fn new(engine: Option<Arc<dyn PolicyEngine>>) -> Self {
        engine.map_or(Self::Simulator, Self::Bound)
    }

    /// Which variant this adapter is.
    pub fn mode(&self) -> AdapterMode {
        match self {
            Self::Bound(_) => AdapterMode::Bound,
            Self::Simulator => AdapterMode::Simulator,
        }
    }

    /// Evaluate `request`, preserving the backend's decision order.
    pub async fn evaluate(&self, request: &SecurityRequest) -> Result<Vec<PolicyDecision>> {
        match self {
            Self::Bound(engine) => {
                let decisions = engine
                    .evaluate(request)
                    .await
                    .map_err(AdapterError::Policy)?;
                debug!(
                    request_id = %request.id,
                    count = decisions.len(),
                    "policy engine returned decisions"
                );
                Ok(decisions)
            }
            Self::Simulator => Ok(vec![PolicyDecision::default_allow()]),
        }
    }
}

impl fmt::Debug for PolicyAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PolicyAdapter").field(&self.mode()).finish()
    }
}
