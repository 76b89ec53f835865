//! Stateful request and event handling.
//!
//! [`SecurityHandler`] is an owned wrapper around an [`Orchestrator`] for
//! hosts that install adapters after construction. It is passed by reference
//! to whatever serves requests; there is no process-wide instance.

use std::sync::Arc;

use llmsec_model::{SecurityRequest, SecurityResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{adapters::Adapters, error::SecurityError, orchestrator::Orchestrator, Result};

/// Event type that runs its payload through the pipeline.
pub const EVENT_SECURITY_REQUEST: &str = "security.request";

/// Event type announcing a configuration reload.
pub const EVENT_CONFIG_RELOAD: &str = "security.config.reload";

/// An event delivered to the handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityEvent {
    /// Event type, e.g. `security.request`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Event payload.
    #[serde(default)]
    pub payload: Value,
}

impl SecurityEvent {
    /// Create an event.
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }
}

/// What the handler did with an event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// The payload was processed.
    Processed(SecurityResult),
    /// Config reload acknowledged. The config manager owns the reload itself.
    ConfigReloadAcknowledged,
    /// Unknown event type, logged and dropped.
    Ignored {
        /// The unrecognized type.
        kind: String,
    },
}

/// Owned handler that may be initialized after construction.
#[derive(Debug, Clone, Default)]
pub struct SecurityHandler {
    orchestrator: Option<Arc<Orchestrator>>,
}

impl SecurityHandler {
    /// Create an uninitialized handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handler around an existing orchestrator.
    pub fn with_orchestrator(orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            orchestrator: Some(orchestrator),
        }
    }

    /// Install an orchestrator built from `adapters`, replacing any previous one.
    pub fn initialize(&mut self, adapters: Adapters) {
        info!(mode = adapters.mode().as_str(), "Security handler initialized");
        self.orchestrator = Some(Arc::new(Orchestrator::new(adapters)));
    }

    /// True once an orchestrator is installed.
    pub fn is_initialized(&self) -> bool {
        self.orchestrator.is_some()
    }

    /// The installed orchestrator.
    pub fn orchestrator(&self) -> Result<&Arc<Orchestrator>> {
        self.orchestrator.as_ref().ok_or(SecurityError::Uninitialized)
    }

    /// Process one request.
    pub async fn handle_request(&self, request: &SecurityRequest) -> Result<SecurityResult> {
        self.orchestrator()?.process(request).await
    }

    /// Route an event.
    pub async fn handle_event(&self, event: SecurityEvent) -> Result<EventOutcome> {
        let orchestrator = self.orchestrator()?;

        match event.kind.as_str() {
            EVENT_SECURITY_REQUEST => {
                let request: SecurityRequest =
                    serde_json::from_value(event.payload).map_err(|source| {
                        SecurityError::InvalidPayload {
                            event: event.kind.clone(),
                            source,
                        }
                    })?;
                let result = orchestrator.process(&request).await?;
                Ok(EventOutcome::Processed(result))
            }
            EVENT_CONFIG_RELOAD => {
                debug!("Config reload event acknowledged");
                Ok(EventOutcome::ConfigReloadAcknowledged)
            }
            _ => {
                warn!(kind = %event.kind, "Ignoring unknown security event");
                Ok(EventOutcome::Ignored {
                    kind: event.kind.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_uninitialized_request() {
        let handler = SecurityHandler::new();
        assert!(!handler.is_initialized());

        let request = SecurityRequest::new("r1", llmsec_model::RequestKind::Prompt, "hi");
        let err = handler.handle_request(&request).await.unwrap_err();
        assert!(matches!(err, SecurityError::Uninitialized));
    }

    #[tokio::test]
    async fn test_uninitialized_event() {
        let handler = SecurityHandler::new();
        let event = SecurityEvent::new(EVENT_CONFIG_RELOAD, Value::Null);
        assert!(matches!(
            handler.handle_event(event).await,
            Err(SecurityError::Uninitialized)
        ));
    }

    #[tokio::test]
    async fn test_request_event() {
        let mut handler = SecurityHandler::new();
        handler.initialize(Adapters::simulator());

        let event: SecurityEvent = serde_json::from_value(json!({
            "type": "security.request",
            "payload": { "id": "evt-1", "type": "output", "content": "done" }
        }))
        .unwrap();

        match handler.handle_event(event).await.unwrap() {
            EventOutcome::Processed(result) => {
                assert_eq!(result.request_id, "evt-1");
                assert!(result.allowed);
            }
            other => panic!("Expected Processed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_request_event() {
        let mut handler = SecurityHandler::new();
        handler.initialize(Adapters::simulator());

        let event = SecurityEvent::new(EVENT_SECURITY_REQUEST, json!({ "id": "evt-2" }));
        let err = handler.handle_event(event).await.unwrap_err();
        assert!(matches!(err, SecurityError::InvalidPayload { ref event, .. } if event == "security.request"));
    }

    #[tokio::test]
    async fn test_reload_and_unknown_events() {
        let mut handler = SecurityHandler::new();
        handler.initialize(Adapters::simulator());

        let reload = handler
            .handle_event(SecurityEvent::new(EVENT_CONFIG_RELOAD, Value::Null))
            .await
            .unwrap();
        assert_eq!(reload, EventOutcome::ConfigReloadAcknowledged);

        let unknown = handler
            .handle_event(SecurityEvent::new("metrics.flush", json!({})))
            .await
            .unwrap();
        assert_eq!(
            unknown,
            EventOutcome::Ignored {
                kind: "metrics.flush".to_string()
            }
        );
    }
}
