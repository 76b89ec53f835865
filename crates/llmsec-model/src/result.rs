//! The aggregate verdict returned for each request.

use serde::{Deserialize, Serialize};

use crate::incident::Severity;

/// A redacted span in the filtered content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redaction {
    /// Start offset.
    pub start: usize,
    /// End offset.
    pub end: usize,
    /// Why the span was redacted.
    pub reason: String,
}

/// A policy violation recorded against a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Id of the offending policy.
    pub policy: String,
    /// Severity assigned by the orchestrator.
    pub severity: Severity,
}

impl Violation {
    /// Create a violation.
    pub fn new(policy: impl Into<String>, severity: Severity) -> Self {
        Self {
            policy: policy.into(),
            severity,
        }
    }
}

/// The single result produced per processed request.
///
/// A blocked result always carries at least one violation. `redactions` is
/// only set when the content filter actually ran, and `incident_id` only when
/// an incident id was captured during this call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityResult {
    /// Echo of the request id.
    pub request_id: String,
    /// Terminal verdict.
    pub allowed: bool,
    /// Content after filtering and enforcement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtered: Option<String>,
    /// Spans redacted by the content filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redactions: Option<Vec<Redaction>>,
    /// Violations recorded against the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<Violation>>,
    /// Incident raised for this request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_id: Option<String>,
}

impl SecurityResult {
    /// A blocked result carrying exactly one violation.
    pub fn blocked(request_id: impl Into<String>, violation: Violation) -> Self {
        Self {
            request_id: request_id.into(),
            allowed: false,
            filtered: None,
            redactions: None,
            violations: Some(vec![violation]),
            incident_id: None,
        }
    }

    /// An allowed result with the given final content.
    pub fn allowed(request_id: impl Into<String>, filtered: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            allowed: true,
            filtered: Some(filtered.into()),
            redactions: None,
            violations: None,
            incident_id: None,
        }
    }

    /// Returns true if the request was blocked.
    pub fn is_blocked(&self) -> bool {
        !self.allowed
    }

    /// Policy ids of all recorded violations, in order.
    pub fn violated_policies(&self) -> Vec<&str> {
        self.violations
            .iter()
            .flatten()
            .map(|v| v.policy.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blocked_carries_violation() {
        let result = SecurityResult::blocked("r1", Violation::new("p1", Severity::High));
        assert!(result.is_blocked());
        assert_eq!(result.violated_policies(), vec!["p1"]);
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let result = SecurityResult::blocked("r1", Violation::new("p1", Severity::High));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            json!({
                "requestId": "r1",
                "allowed": false,
                "violations": [{ "policy": "p1", "severity": "high" }]
            })
        );
    }

    #[test]
    fn test_empty_redactions_are_kept() {
        let mut result = SecurityResult::allowed("r1", "hi");
        result.redactions = Some(Vec::new());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["redactions"], json!([]));
        assert!(json.get("incidentId").is_none());
    }
}
