//! The adapter set an orchestrator is built from.

use std::sync::Arc;
use std::time::Duration;

use llmsec_adapters::{
    AdapterMode, ConfigAdapter, ConfigManager, EdgeAgent, EdgeAgentAdapter, IncidentAdapter,
    IncidentManager, PolicyAdapter, PolicyEngine, RemoteBackend, Shield, ShieldAdapter,
    StaticConfig,
};
use tracing::info;

use crate::config::SecurityCoreConfig;
use crate::{error::SecurityError, Result};

/// One adapter per collaborator.
///
/// The default set is all simulators.
#[derive(Debug, Clone, Default)]
pub struct Adapters {
    /// Policy evaluation.
    pub policy: PolicyAdapter,
    /// Content filtering.
    pub shield: ShieldAdapter,
    /// Runtime enforcement.
    pub edge_agent: EdgeAgentAdapter,
    /// Incident signaling.
    pub incident: IncidentAdapter,
    /// Configuration and secrets. Not consulted by the pipeline.
    pub config: ConfigAdapter,
}

impl Adapters {
    /// All five adapters in simulator mode.
    pub fn simulator() -> Self {
        Self::default()
    }

    /// Build adapters from configuration.
    ///
    /// Each collaborator with a URL gets a remote backend; the rest are
    /// simulated. The config adapter is bound when any settings or secrets
    /// are present.
    pub fn from_config(config: &SecurityCoreConfig) -> Result<Self> {
        let timeout = Duration::from_millis(config.backends.timeout_ms);
        let remote = |url: &Option<String>| -> Result<Option<Arc<RemoteBackend>>> {
            url.as_deref()
                .map(|url| {
                    RemoteBackend::new(url, timeout)
                        .map(Arc::new)
                        .map_err(|e| SecurityError::Config(format!("{}: {}", url, e)))
                })
                .transpose()
        };

        let policy = remote(&config.backends.policy_url)?;
        let shield = remote(&config.backends.shield_url)?;
        let edge_agent = remote(&config.backends.edge_agent_url)?;
        let incident = remote(&config.backends.incident_url)?;

        let config_manager: Option<Arc<dyn ConfigManager>> =
            if config.settings.is_empty() && config.secrets.is_empty() {
                None
            } else {
                Some(Arc::new(StaticConfig::new(
                    config.settings.clone(),
                    config.secrets.clone(),
                )))
            };

        let adapters = Self {
            policy: PolicyAdapter::new(policy.map(|b| b as Arc<dyn PolicyEngine>)),
            shield: ShieldAdapter::new(shield.map(|b| b as Arc<dyn Shield>)),
            edge_agent: EdgeAgentAdapter::new(edge_agent.map(|b| b as Arc<dyn EdgeAgent>)),
            incident: IncidentAdapter::new(incident.map(|b| b as Arc<dyn IncidentManager>)),
            config: ConfigAdapter::new(config_manager),
        };

        info!(
            policy = adapters.policy.mode().as_str(),
            shield = adapters.shield.mode().as_str(),
            edge_agent = adapters.edge_agent.mode().as_str(),
            incident = adapters.incident.mode().as_str(),
            config = adapters.config.mode().as_str(),
            "Adapters configured"
        );
        Ok(adapters)
    }

    /// `Bound` if any behavioral adapter forwards to a backend.
    pub fn mode(&self) -> AdapterMode {
        let modes = [
            self.policy.mode(),
            self.shield.mode(),
            self.edge_agent.mode(),
            self.incident.mode(),
        ];
        if modes.contains(&AdapterMode::Bound) {
            AdapterMode::Bound
        } else {
            AdapterMode::Simulator
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_simulator() {
        assert_eq!(Adapters::simulator().mode(), AdapterMode::Simulator);
        let adapters = Adapters::from_config(&SecurityCoreConfig::default()).unwrap();
        assert_eq!(adapters.mode(), AdapterMode::Simulator);
        assert_eq!(adapters.config.mode(), AdapterMode::Simulator);
    }

    #[test]
    fn test_urls_bind_adapters() {
        let mut config = SecurityCoreConfig::default();
        config.backends.shield_url = Some("http://shield.internal:7000".to_string());

        let adapters = Adapters::from_config(&config).unwrap();
        assert_eq!(adapters.shield.mode(), AdapterMode::Bound);
        assert_eq!(adapters.policy.mode(), AdapterMode::Simulator);
        assert_eq!(adapters.mode(), AdapterMode::Bound);
    }

    #[tokio::test]
    async fn test_settings_bind_config_adapter() {
        let mut config = SecurityCoreConfig::default();
        config
            .settings
            .insert("shield.max_len".to_string(), json!(2048));

        let adapters = Adapters::from_config(&config).unwrap();
        assert_eq!(adapters.config.mode(), AdapterMode::Bound);
        assert_eq!(adapters.mode(), AdapterMode::Simulator);
        assert_eq!(
            adapters.config.get::<u32>("shield.max_len").await.unwrap(),
            Some(2048)
        );
    }
}
