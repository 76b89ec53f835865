//! Error types for adapter calls.

use thiserror::Error;

/// Failure reported by a backend implementation.
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

/// A failed call into one of the external collaborators.
///
/// The orchestrator treats every variant as fatal for the request in flight.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The policy engine failed to evaluate a request.
    #[error("policy engine failed: {0}")]
    Policy(#[source] BackendError),

    /// The shield failed to filter content.
    #[error("shield failed: {0}")]
    Shield(#[source] BackendError),

    /// The edge agent failed to enforce a decision.
    #[error("edge agent failed: {0}")]
    EdgeAgent(#[source] BackendError),

    /// The incident manager failed to accept a signal.
    #[error("incident manager failed: {0}")]
    Incident(#[source] BackendError),

    /// The config manager failed to answer a lookup.
    #[error("config manager failed: {0}")]
    Config(#[source] BackendError),

    /// A config value exists but does not have the requested shape.
    #[error("config value '{key}' has unexpected shape: {source}")]
    ConfigValue {
        /// Key that was looked up.
        key: String,
        /// Deserialization failure.
        #[source]
        source: serde_json::Error,
    },
}

impl AdapterError {
    /// Name of the collaborator that failed.
    pub fn collaborator(&self) -> &'static str {
        match self {
            Self::Policy(_) => "policy",
            Self::Shield(_) => "shield",
            Self::EdgeAgent(_) => "edge-agent",
            Self::Incident(_) => "incident",
            Self::Config(_) | Self::ConfigValue { .. } => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_error_display() {
        let err = AdapterError::Policy("connection refused".into());
        assert_eq!(err.to_string(), "policy engine failed: connection refused");
        assert_eq!(err.collaborator(), "policy");
    }

    #[test]
    fn test_source_is_preserved() {
        use std::error::Error as _;

        let err = AdapterError::Incident("queue full".into());
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("queue full"));
    }

    #[test]
    fn test_config_value_display() {
        let source = serde_json::from_str::<u16>("\"eighty\"").unwrap_err();
        let err = AdapterError::ConfigValue {
            key: "server.port".to_string(),
            source,
        };
        assert!(err.to_string().contains("server.port"));
        assert_eq!(err.collaborator(), "config");
    }
}
