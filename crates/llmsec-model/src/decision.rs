//! Policy decisions returned by the policy engine.

use serde::{Deserialize, Serialize};

/// Action a policy rule asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyAction {
    /// Let the request through untouched.
    Allow,
    /// Block the request.
    Deny,
    /// Run the content filter.
    Filter,
    /// Run the content filter to redact spans.
    Redact,
}

impl PolicyAction {
    /// True for actions that require the content filter.
    pub fn requires_filtering(self) -> bool {
        matches!(self, Self::Filter | Self::Redact)
    }
}

/// One rule's verdict on a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDecision {
    /// Identifier of the rule that produced this decision.
    pub policy_id: String,
    /// Requested action.
    pub action: PolicyAction,
    /// Human-readable explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl PolicyDecision {
    /// Policy id of the synthetic fallback decision.
    pub const DEFAULT_POLICY_ID: &'static str = "default";

    /// Create a decision without a reason.
    pub fn new(policy_id: impl Into<String>, action: PolicyAction) -> Self {
        Self {
            policy_id: policy_id.into(),
            action,
            reason: None,
        }
    }

    /// The synthetic `{policyId: "default", action: allow}` decision.
    pub fn default_allow() -> Self {
        Self::new(Self::DEFAULT_POLICY_ID, PolicyAction::Allow)
    }

    /// Attach a reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Shorthand for an allow decision.
    pub fn allow(policy_id: impl Into<String>) -> Self {
        Self::new(policy_id, PolicyAction::Allow)
    }

    /// Shorthand for a deny decision.
    pub fn deny(policy_id: impl Into<String>) -> Self {
        Self::new(policy_id, PolicyAction::Deny)
    }

    /// Shorthand for a filter decision.
    pub fn filter(policy_id: impl Into<String>) -> Self {
        Self::new(policy_id, PolicyAction::Filter)
    }

    /// Shorthand for a redact decision.
    pub fn redact(policy_id: impl Into<String>) -> Self {
        Self::new(policy_id, PolicyAction::Redact)
    }

    /// True if this decision blocks the request outright.
    pub fn is_deny(&self) -> bool {
        self.action == PolicyAction::Deny
    }

    /// True if this decision is anything other than allow.
    pub fn is_restrictive(&self) -> bool {
        self.action != PolicyAction::Allow
    }
}
