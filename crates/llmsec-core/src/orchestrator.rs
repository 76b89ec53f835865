//! The security orchestration pipeline.
//!
//! [`Orchestrator`] is the only place where collaborator outputs are combined
//! into a verdict. Everything else in the workspace either feeds it a request
//! or forwards its result.

use llmsec_adapters::FilterOutcome;
use llmsec_model::{
    IncidentSignal, PolicyDecision, SecurityRequest, SecurityResult, Severity, Violation,
};
use tracing::{debug, info, warn};

use crate::{adapters::Adapters, Result};

/// Combines policy, shield, edge agent and incident manager into one
/// security decision per request.
///
/// # Pipeline
///
/// Executed strictly in order, with short-circuit returns:
///
/// 1. Policy evaluation
/// 2. Deny short-circuit: the first `deny` anywhere in the decision list
///    blocks with severity `high`
/// 3. Filtering, when a decision asks for it or the request is a prompt or
///    output
/// 4. Primary decision selection: position 0, or `default`/allow when empty
/// 5. Enforcement of the primary decision on the filtered content
/// 6. Enforcement short-circuit: a rejection blocks with severity `medium`
/// 7. Residual violations: every non-allow decision at severity `low`
/// 8. Allowed result
///
/// Most restrictive wins, and at most one incident is raised per request.
///
/// # Errors
///
/// Any adapter failure aborts the request and is returned as is. There is no
/// retry, no partial result and no default verdict; callers wanting
/// fail-open behavior apply it outside.
///
/// The orchestrator holds no mutable state, so one instance can serve any
/// number of concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    adapters: Adapters,
}

impl Orchestrator {
    /// Create an orchestrator over the given adapters.
    pub fn new(adapters: Adapters) -> Self {
        Self { adapters }
    }

    /// Create an orchestrator with every adapter simulated.
    pub fn simulator() -> Self {
        Self::new(Adapters::simulator())
    }

    /// The adapter set in use.
    pub fn adapters(&self) -> &Adapters {
        &self.adapters
    }

    /// Run `request` through the pipeline.
    pub async fn process(&self, request: &SecurityRequest) -> Result<SecurityResult> {
        debug!(request_id = %request.id, kind = %request.kind, "Processing security request");

        // Phase 1: Policy evaluation
        let decisions = self.adapters.policy.evaluate(request).await?;

        // Phase 2: Deny short-circuit
        if let Some(deny) = first_deny(&decisions) {
            warn!(
                request_id = %request.id,
                policy = %deny.policy_id,
                "Request denied by policy"
            );
            return self.reject(request, &deny.policy_id, Severity::High).await;
        }

        // Phase 3: Filtering
        let filtering = if needs_filtering(request, &decisions) {
            let mode = request.kind.filter_mode();
            debug!(request_id = %request.id, ?mode, "Filtering content");
            Some(self.adapters.shield.filter(&request.content, mode).await?)
        } else {
            None
        };
        let (filtered, redactions) = match filtering {
            Some(FilterOutcome { filtered, redactions }) => (filtered, Some(redactions)),
            None => (request.content.clone(), None),
        };

        // Phase 4: Primary decision
        let primary = primary_decision(&decisions);

        // Phase 5: Enforcement
        let enforcement = self
            .adapters
            .edge_agent
            .enforce(&request.with_content(filtered.as_str()), &primary)
            .await?;

        // Phase 6: Enforcement short-circuit
        if !enforcement.enforced {
            warn!(
                request_id = %request.id,
                policy = %primary.policy_id,
                "Enforcement rejected request"
            );
            return self.reject(request, &primary.policy_id, Severity::Medium).await;
        }

        // Phase 7: Residual violations
        let violations = residual_violations(&decisions);
        let incident_id = match violations.first() {
            Some(first) => {
                let signal = IncidentSignal::violation(request, &first.policy, Severity::Low);
                Some(self.adapters.incident.emit(&signal).await?.incident_id)
            }
            None => None,
        };

        // Phase 8: Allowed
        info!(
            request_id = %request.id,
            violations = violations.len(),
            "Request approved"
        );
        Ok(SecurityResult {
            request_id: request.id.clone(),
            allowed: true,
            filtered: Some(enforcement.modifications.unwrap_or(filtered)),
            redactions,
            violations: (!violations.is_empty()).then_some(violations),
            incident_id,
        })
    }

    /// Emit a violation incident and build the blocked result.
    ///
    /// The incident id is not carried on blocked results.
    async fn reject(
        &self,
        request: &SecurityRequest,
        policy: &str,
        severity: Severity,
    ) -> Result<SecurityResult> {
        let signal = IncidentSignal::violation(request, policy, severity);
        self.adapters.incident.emit(&signal).await?;
        Ok(SecurityResult::blocked(
            request.id.as_str(),
            Violation::new(policy, severity),
        ))
    }
}

/// First `deny` in evaluation order, wherever it sits.
pub(crate) fn first_deny(decisions: &[PolicyDecision]) -> Option<&PolicyDecision> {
    decisions.iter().find(|d| d.is_deny())
}

/// Whether the shield runs for this request.
///
/// Prompts and outputs are always filtered; runtime events only when a
/// decision asks for `filter` or `redact`.
pub(crate) fn needs_filtering(request: &SecurityRequest, decisions: &[PolicyDecision]) -> bool {
    request.kind.filtered_by_default() || decisions.iter().any(|d| d.action.requires_filtering())
}

/// Decision handed to the edge agent.
///
/// Strictly positional: the policy engine declares precedence through the
/// order of its decisions, so element 0 wins regardless of action. Unlike
/// [`first_deny`], nothing past position 0 is consulted.
pub(crate) fn primary_decision(decisions: &[PolicyDecision]) -> PolicyDecision {
    decisions
        .first()
        .cloned()
        .unwrap_or_else(PolicyDecision::default_allow)
}

/// Every non-allow decision, at the fixed `low` floor.
pub(crate) fn residual_violations(decisions: &[PolicyDecision]) -> Vec<Violation> {
    decisions
        .iter()
        .filter(|d| d.is_restrictive())
        .map(|d| Violation::new(d.policy_id.as_str(), Severity::Low))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use llmsec_model::{PolicyAction, RequestKind};

    fn request(kind: RequestKind) -> SecurityRequest {
        SecurityRequest::new("r1", kind, "hi")
    }

    #[test]
    fn test_first_deny_scans_whole_list() {
        let decisions = vec![
            PolicyDecision::allow("a"),
            PolicyDecision::filter("b"),
            PolicyDecision::deny("c"),
            PolicyDecision::deny("d"),
        ];
        assert_eq!(first_deny(&decisions).map(|d| d.policy_id.as_str()), Some("c"));
        assert!(first_deny(&[PolicyDecision::redact("x")]).is_none());
    }

    #[test]
    fn test_filtering_condition() {
        let none: Vec<PolicyDecision> = Vec::new();
        assert!(needs_filtering(&request(RequestKind::Prompt), &none));
        assert!(needs_filtering(&request(RequestKind::Output), &none));
        assert!(!needs_filtering(&request(RequestKind::Runtime), &none));
        assert!(!needs_filtering(
            &request(RequestKind::Runtime),
            &[PolicyDecision::allow("a")]
        ));
        assert!(needs_filtering(
            &request(RequestKind::Runtime),
            &[PolicyDecision::allow("a"), PolicyDecision::redact("b")]
        ));
    }

    #[test]
    fn test_primary_is_positional() {
        let decisions = vec![PolicyDecision::filter("first"), PolicyDecision::allow("second")];
        assert_eq!(primary_decision(&decisions).policy_id, "first");

        let fallback = primary_decision(&[]);
        assert_eq!(fallback.policy_id, "default");
        assert_eq!(fallback.action, PolicyAction::Allow);
    }

    #[test]
    fn test_residual_violations_are_low() {
        let decisions = vec![
            PolicyDecision::allow("a"),
            PolicyDecision::filter("b"),
            PolicyDecision::redact("c"),
        ];
        let violations = residual_violations(&decisions);
        assert_eq!(
            violations,
            vec![
                Violation::new("b", Severity::Low),
                Violation::new("c", Severity::Low)
            ]
        );
        assert!(residual_violations(&[PolicyDecision::allow("a")]).is_empty());
    }

    #[tokio::test]
    async fn test_simulator_prompt() {
        let result = Orchestrator::simulator()
            .process(&request(RequestKind::Prompt))
            .await
            .unwrap();

        assert_eq!(result.request_id, "r1");
        assert!(result.allowed);
        assert_eq!(result.filtered.as_deref(), Some("hi"));
        assert_eq!(result.redactions, Some(Vec::new()));
        assert!(result.violations.is_none());
        assert!(result.incident_id.is_none());
    }

    #[tokio::test]
    async fn test_simulator_runtime_skips_shield() {
        let result = Orchestrator::simulator()
            .process(&request(RequestKind::Runtime))
            .await
            .unwrap();

        assert!(result.allowed);
        assert_eq!(result.filtered.as_deref(), Some("hi"));
        assert!(result.redactions.is_none());
    }
}
