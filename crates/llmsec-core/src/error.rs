//! Error types for the security core.

use llmsec_adapters::AdapterError;
use thiserror::Error;

/// Core error type for orchestrator operations.
#[derive(Debug, Error)]
pub enum SecurityError {
    /// A collaborator call failed. Fatal for the request in flight.
    #[error("Adapter error: {0}")]
    Adapter(#[from] AdapterError),

    /// The handler was used before an orchestrator was installed.
    #[error("Security orchestrator not initialized; call initialize first")]
    Uninitialized,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An event payload did not have the expected shape.
    #[error("Invalid payload for event '{event}': {source}")]
    InvalidPayload {
        /// Event type.
        event: String,
        /// Decode failure.
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_error_passthrough() {
        let err: SecurityError = AdapterError::Shield("timeout".into()).into();
        assert_eq!(err.to_string(), "Adapter error: shield failed: timeout");
    }

    #[test]
    fn test_uninitialized_display() {
        assert!(SecurityError::Uninitialized
            .to_string()
            .contains("not initialized"));
    }
}
