//! Adapter for the config and secrets manager.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AdapterError, BackendError, Result};
use crate::AdapterMode;

/// A configuration and secrets backend.
#[async_trait]
pub trait ConfigManager: Send + Sync {
    /// Look up a configuration value.
    async fn get(&self, key: &str) -> std::result::Result<Option<Value>, BackendError>;

    /// Look up a secret.
    async fn get_secret(&self, key: &str) -> std::result::Result<Option<String>, BackendError>;
}

/// Config manager backed by fixed in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    values: HashMap<String, Value>,
    secrets: HashMap<String, String>,
}

impl StaticConfig {
    /// Create a config manager over the given tables.
    pub fn new(values: HashMap<String, Value>, secrets: HashMap<String, String>) -> Self {
        Self { values, secrets }
    }

    /// Add a value.
    pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Add a secret.
    pub fn with_secret(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.secrets.insert(key.into(), secret.into());
        self
    }
}

#[async_trait]
impl ConfigManager for StaticConfig {
    async fn get(&self, key: &str) -> std::result::Result<Option<Value>, BackendError> {
        Ok(self.values.get(key).cloned())
    }

    async fn get_secret(&self, key: &str) -> std::result::Result<Option<String>, BackendError> {
        Ok(self.secrets.get(key).cloned())
    }
}

/// Configuration lookup, bound to a backend or simulated.
///
/// The simulator reports every key as absent, telling callers to fall back
/// to their built-in defaults.
#[derive(Clone, Default)]
pub enum ConfigAdapter {
    /// Forward to a real config manager.
    Bound(Arc<dyn ConfigManager>),
    /// Every key absent.
    #[default]
    Simulator,
}

impl ConfigAdapter {
    /// Bind to `manager` if given, otherwise simulate.
    pub fn new(manager: Option<Arc<dyn ConfigManager>>) -> Self {
        manager.map_or(Self::Simulator, Self::Bound)
    }

    /// Which variant this adapter is.
    pub fn mode(&self) -> AdapterMode {
        match self {
            Self::Bound(_) => AdapterMode::Bound,
            Self::Simulator => AdapterMode::Simulator,
        }
    }

    /// Look up `key` and deserialize it as `T`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Self::Bound(manager) = self else {
            return Ok(None);
        };

        match manager.get(key).await.map_err(AdapterError::Config)? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| AdapterError::ConfigValue {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Look up a secret.
    pub async fn get_secret(&self, key: &str) -> Result<Option<String>> {
        match self {
            Self::Bound(manager) => manager.get_secret(key).await.map_err(AdapterError::Config),
            Self::Simulator => Ok(None),
        }
    }
}

impl fmt::Debug for ConfigAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConfigAdapter").field(&self.mode()).finish()
    }
}
