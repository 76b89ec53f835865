//! Incident signals raised by the orchestrator.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::request::SecurityRequest;

/// Source tag stamped on every incident this service raises.
pub const INCIDENT_SOURCE: &str = "llm-security-core";

/// Incident category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentKind {
    /// A policy or enforcement violation.
    Violation,
    /// A threshold was crossed.
    Threshold,
    /// Anomalous behavior.
    Anomaly,
}

/// Severity of a violation or incident.
///
/// Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Residual non-allow decision
    Low,
    /// Enforcement rejected by the edge agent
    Medium,
    /// Policy denial
    High,
    /// Reserved for collaborators
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        };
        f.write_str(name)
    }
}

/// A signal handed to the incident manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentSignal {
    /// Incident category.
    #[serde(rename = "type")]
    pub kind: IncidentKind,
    /// Severity.
    pub severity: Severity,
    /// Emitting service.
    pub source: String,
    /// Free-form details.
    #[serde(default)]
    pub details: Map<String, Value>,
}

impl IncidentSignal {
    /// Build a violation signal for `request` attributed to `policy`.
    ///
    /// Details always carry `requestId`, `policy` and `requestType`.
    pub fn violation(request: &SecurityRequest, policy: &str, severity: Severity) -> Self {
        let mut details = Map::new();
        details.insert("requestId".to_string(), Value::String(request.id.clone()));
        details.insert("policy".to_string(), Value::String(policy.to_string()));
        details.insert(
            "requestType".to_string(),
            Value::String(request.kind.as_str().to_string()),
        );

        Self {
            kind: IncidentKind::Violation,
            severity,
            source: INCIDENT_SOURCE.to_string(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RequestKind;

    #[test]
    fn test_violation_details() {
        let request = SecurityRequest::new("req-9", RequestKind::Runtime, "payload");
        let signal = IncidentSignal::violation(&request, "p1", Severity::High);

        assert_eq!(signal.kind, IncidentKind::Violation);
        assert_eq!(signal.source, "llm-security-core");
        assert_eq!(signal.details["requestId"], "req-9");
        assert_eq!(signal.details["policy"], "p1");
        assert_eq!(signal.details["requestType"], "runtime");
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::High < Severity::Critical);
        assert_eq!(Severity::Medium.to_string(), "medium");
    }
}
