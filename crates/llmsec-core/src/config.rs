//! Configuration types for the security core.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{error::SecurityError, Result};

/// Environment variable that overrides the listen port.
pub const PORT_ENV: &str = "PORT";

/// Configuration for the security core and its entry points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityCoreConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,

    /// Collaborator endpoints. An unset URL selects the simulator.
    pub backends: BackendConfig,

    /// Values served by the config adapter.
    pub settings: HashMap<String, Value>,

    /// Secrets served by the config adapter.
    pub secrets: HashMap<String, String>,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,

    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// `host:port` bind address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Collaborator endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Policy engine base URL.
    pub policy_url: Option<String>,

    /// Shield base URL.
    pub shield_url: Option<String>,

    /// Edge agent base URL.
    pub edge_agent_url: Option<String>,

    /// Incident manager base URL.
    pub incident_url: Option<String>,

    /// Per-call timeout for remote collaborators, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            policy_url: None,
            shield_url: None,
            edge_agent_url: None,
            incident_url: None,
            timeout_ms: 5_000,
        }
    }
}

impl BackendConfig {
    /// True if no collaborator URL is set.
    pub fn is_simulated(&self) -> bool {
        self.policy_url.is_none()
            && self.shield_url.is_none()
            && self.edge_agent_url.is_none()
            && self.incident_url.is_none()
    }
}

impl SecurityCoreConfig {
    /// Parse a TOML document.
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| SecurityError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| SecurityError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&source)
    }

    /// Load from an optional file.
    ///
    /// Without a file the defaults are used. The `PORT` override is left to
    /// the listening entry point, see [`Self::apply_port_env`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        Ok(config)
    }

    /// Apply `PORT` from the process environment.
    pub fn apply_port_env(&mut self) -> Result<()> {
        self.apply_port_override(std::env::var(PORT_ENV).ok().as_deref())
    }

    /// Override the listen port from a `PORT`-style value.
    pub fn apply_port_override(&mut self, value: Option<&str>) -> Result<()> {
        if let Some(raw) = value {
            self.server.port = raw.trim().parse().map_err(|_| {
                SecurityError::Config(format!("{} is not a valid port: '{}'", PORT_ENV, raw))
            })?;
        }
        Ok(())
    }
}
