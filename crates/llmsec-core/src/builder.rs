//! Programmatic construction of a security core.

use std::sync::Arc;

use llmsec_adapters::{
    ConfigAdapter, ConfigManager, EdgeAgent, EdgeAgentAdapter, IncidentAdapter, IncidentManager,
    PolicyAdapter, PolicyEngine, Shield, ShieldAdapter,
};

use crate::{adapters::Adapters, handler::SecurityHandler, orchestrator::Orchestrator};

/// Entry point for embedding the security core.
///
/// ```rust
/// use llmsec_core::SecurityCore;
///
/// // Nothing supplied: every collaborator is simulated.
/// let orchestrator = SecurityCore::builder().build();
/// ```
pub struct SecurityCore;

impl SecurityCore {
    /// Start building a security core.
    pub fn builder() -> SecurityCoreBuilder {
        SecurityCoreBuilder::default()
    }
}

/// Collects optional backends; anything left unset is simulated.
#[derive(Default)]
pub struct SecurityCoreBuilder {
    policy_engine: Option<Arc<dyn PolicyEngine>>,
    shield: Option<Arc<dyn Shield>>,
    edge_agent: Option<Arc<dyn EdgeAgent>>,
    incident_manager: Option<Arc<dyn IncidentManager>>,
    config_manager: Option<Arc<dyn ConfigManager>>,
}

impl SecurityCoreBuilder {
    /// Bind the policy engine.
    pub fn policy_engine(mut self, engine: Arc<dyn PolicyEngine>) -> Self {
        self.policy_engine = Some(engine);
        self
    }

    /// Bind the shield.
    pub fn shield(mut self, shield: Arc<dyn Shield>) -> Self {
        self.shield = Some(shield);
        self
    }

    /// Bind the edge agent.
    pub fn edge_agent(mut self, agent: Arc<dyn EdgeAgent>) -> Self {
        self.edge_agent = Some(agent);
        self
    }

    /// Bind the incident manager.
    pub fn incident_manager(mut self, manager: Arc<dyn IncidentManager>) -> Self {
        self.incident_manager = Some(manager);
        self
    }

    /// Bind the config manager.
    pub fn config_manager(mut self, manager: Arc<dyn ConfigManager>) -> Self {
        self.config_manager = Some(manager);
        self
    }

    /// The adapter set described so far.
    pub fn adapters(self) -> Adapters {
        Adapters {
            policy: PolicyAdapter::new(self.policy_engine),
            shield: ShieldAdapter::new(self.shield),
            edge_agent: EdgeAgentAdapter::new(self.edge_agent),
            incident: IncidentAdapter::new(self.incident_manager),
            config: ConfigAdapter::new(self.config_manager),
        }
    }

    /// Build an orchestrator.
    pub fn build(self) -> Orchestrator {
        Orchestrator::new(self.adapters())
    }

    /// Build an initialized handler.
    pub fn build_handler(self) -> SecurityHandler {
        SecurityHandler::with_orchestrator(Arc::new(self.build()))
    }
}
