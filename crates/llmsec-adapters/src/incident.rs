//! Adapter for the incident manager (alerting and escalation).

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use llmsec_model::IncidentSignal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{AdapterError, BackendError, Result};
use crate::AdapterMode;

/// Prefix of every incident id the simulator hands out.
pub const SIMULATED_INCIDENT_PREFIX: &str = "sim-incident-";

/// Acknowledgement from the incident manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentReceipt {
    /// Id assigned to the incident.
    pub incident_id: String,
}

/// An incident manager backend.
#[async_trait]
pub trait IncidentManager: Send + Sync {
    /// Record `signal` and return the assigned incident id.
    async fn emit(
        &self,
        signal: &IncidentSignal,
    ) -> std::result::Result<IncidentReceipt, BackendError>;
}

/// Incident signaling, bound to a backend or simulated.
#[derive(Clone, Default)]
pub enum IncidentAdapter {
    /// Forward to a real incident manager.
    Bound(Arc<dyn IncidentManager>),
    /// Mint a mock id per call.
    #[default]
    Simulator,
}

impl IncidentAdapter {
    /// Bind to `manager` if given, otherwise simulate.
    pub fn new(manager: Option<Arc<dyn IncidentManager>>) -> Self {
        manager.map_or(Self::Simulator, Self::Bound)
    }

    /// Which variant this adapter is.
    pub fn mode(&self) -> AdapterMode {
        match self {
            Self::Bound(_) => AdapterMode::Bound,
            Self::Simulator => AdapterMode::Simulator,
        }
    }

    /// Emit `signal`.
    pub async fn emit(&self, signal: &IncidentSignal) -> Result<IncidentReceipt> {
        let receipt = match self {
            Self::Bound(manager) => manager.emit(signal).await.map_err(AdapterError::Incident)?,
            // v7 ids are time-ordered and unique per call.
            Self::Simulator => IncidentReceipt {
                incident_id: format!("{}{}", SIMULATED_INCIDENT_PREFIX, Uuid::now_v7()),
            },
        };

        info!(
            incident_id = %receipt.incident_id,
            severity = %signal.severity,
            source = %signal.source,
            "incident emitted"
        );
        Ok(receipt)
    }
}

impl fmt::Debug for IncidentAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IncidentAdapter").field(&self.mode()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llmsec_model::{IncidentKind, Severity};
    use serde_json::Map;

    fn signal() -> IncidentSignal {
        IncidentSignal {
            kind: IncidentKind::Violation,
            severity: Severity::Low,
            source: "test".to_string(),
            details: Map::new(),
        }
    }

    struct Unreachable;

    #[async_trait]
    impl IncidentManager for Unreachable {
        async fn emit(
            &self,
            _signal: &IncidentSignal,
        ) -> std::result::Result<IncidentReceipt, BackendError> {
            Err("pager gateway timed out".into())
        }
    }

    #[tokio::test]
    async fn test_simulator_generates_ids() {
        let adapter = IncidentAdapter::default();
        let first = adapter.emit(&signal()).await.unwrap();
        let second = adapter.emit(&signal()).await.unwrap();

        assert!(first.incident_id.starts_with("sim-incident-"));
        assert_ne!(first.incident_id, second.incident_id);
    }

    #[tokio::test]
    async fn test_bound_failure_propagates() {
        let adapter = IncidentAdapter::new(Some(Arc::new(Unreachable)));
        let err = adapter.emit(&signal()).await.unwrap_err();
        assert!(matches!(err, AdapterError::Incident(_)));
    }

    #[test]
    fn test_receipt_wire_shape() {
        let receipt: IncidentReceipt =
            serde_json::from_str(r#"{"incidentId":"INC-42"}"#).unwrap();
        assert_eq!(receipt.incident_id, "INC-42");
    }
}
