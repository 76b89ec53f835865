//! Adapter for the content shield (prompt and output filtering).

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use llmsec_model::{FilterMode, Redaction};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AdapterError, BackendError, Result};
use crate::AdapterMode;

/// Raw reply from a shield backend. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShieldReply {
    /// Filtered content, if the backend changed anything.
    #[serde(default)]
    pub filtered: Option<String>,
    /// Redacted spans, if any were reported.
    #[serde(default)]
    pub redactions: Option<Vec<Redaction>>,
}

/// Normalized filter outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    /// Content after filtering.
    pub filtered: String,
    /// Redacted spans.
    pub redactions: Vec<Redaction>,
}

impl FilterOutcome {
    /// Content returned unchanged with no redactions.
    pub fn passthrough(content: &str) -> Self {
        Self {
            filtered: content.to_string(),
            redactions: Vec::new(),
        }
    }
}

/// A content shield backend.
#[async_trait]
pub trait Shield: Send + Sync {
    /// Filter `content` in the given mode.
    async fn filter(
        &self,
        content: &str,
        mode: FilterMode,
    ) -> std::result::Result<ShieldReply, BackendError>;
}

/// Content filtering, bound to a backend or simulated.
#[derive(Clone, Default)]
pub enum ShieldAdapter {
    /// Forward to a real shield.
    Bound(Arc<dyn Shield>),
    /// Pass content through untouched.
    #[default]
    Simulator,
}

impl ShieldAdapter {
    /// Bind to `shield` if given, otherwise simulate.
    pub fn new(shield: Option<Arc<dyn Shield>>) -> Self {
        shield.map_or(Self::Simulator, Self::Bound)
    }

    /// Which variant this adapter is.
    pub fn mode(&self) -> AdapterMode {
        match self {
            Self::Bound(_) => AdapterMode::Bound,
            Self::Simulator => AdapterMode::Simulator,
        }
    }

    /// Filter `content`.
    ///
    /// A bound reply missing `filtered` keeps the original content; missing
    /// `redactions` becomes an empty list.
    pub async fn filter(&self, content: &str, mode: FilterMode) -> Result<FilterOutcome> {
        match self {
            Self::Bound(shield) => {
                let reply = shield
                    .filter(content, mode)
                    .await
                    .map_err(AdapterError::Shield)?;
                let outcome = FilterOutcome {
                    filtered: reply.filtered.unwrap_or_else(|| content.to_string()),
                    redactions: reply.redactions.unwrap_or_default(),
                };
                debug!(?mode, redactions = outcome.redactions.len(), "shield filtered content");
                Ok(outcome)
            }
            Self::Simulator => Ok(FilterOutcome::passthrough(content)),
        }
    }
}

impl fmt::Debug for ShieldAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ShieldAdapter").field(&self.mode()).finish()
    }
}
