//! HTTP/JSON backend for remote collaborators.
//!
//! One [`RemoteBackend`] speaks to one collaborator service. Endpoints are
//! fixed relative to the base URL:
//!
//! | Trait | Endpoint | Body | Reply |
//! |-------|----------|------|-------|
//! | [`PolicyEngine`] | `POST /evaluate` | request | decisions |
//! | [`Shield`] | `POST /filter` | `{content, mode}` | `{filtered?, redactions?}` |
//! | [`EdgeAgent`] | `POST /enforce` | `{request, decision}` | `{enforced?, modifications?}` |
//! | [`IncidentManager`] | `POST /emit` | signal | `{incidentId}` |
//!
//! Non-2xx statuses are failures.

use std::time::Duration;

use async_trait::async_trait;
use llmsec_model::{FilterMode, IncidentSignal, PolicyDecision, SecurityRequest};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::edge_agent::{EdgeAgent, EnforcementReply};
use crate::error::BackendError;
use crate::incident::{IncidentManager, IncidentReceipt};
use crate::policy::PolicyEngine;
use crate::shield::{Shield, ShieldReply};

/// Client for a collaborator reachable over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct FilterBody<'a> {
    content: &'a str,
    mode: FilterMode,
}

#[derive(Serialize)]
struct EnforceBody<'a> {
    request: &'a SecurityRequest,
    decision: &'a PolicyDecision,
}

impl RemoteBackend {
    /// Create a client for `base_url` with a per-call timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a backend over an existing client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, BackendError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "calling remote collaborator");

        let reply = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json::<R>()
            .await?;
        Ok(reply)
    }
}

#[async_trait]
impl PolicyEngine for RemoteBackend {
    async fn evaluate(
        &self,
        request: &SecurityRequest,
    ) -> Result<Vec<PolicyDecision>, BackendError> {
        self.post("/evaluate", request).await
    }
}

#[async_trait]
impl Shield for RemoteBackend {
    async fn filter(&self, content: &str, mode: FilterMode) -> Result<ShieldReply, BackendError> {
        self.post("/filter", &FilterBody { content, mode }).await
    }
}

#[async_trait]
impl EdgeAgent for RemoteBackend {
    async fn enforce(
        &self,
        request: &SecurityRequest,
        decision: &PolicyDecision,
    ) -> Result<EnforcementReply, BackendError> {
        self.post("/enforce", &EnforceBody { request, decision }).await
    }
}

#[async_trait]
impl IncidentManager for RemoteBackend {
    async fn emit(&self, signal: &IncidentSignal) -> Result<IncidentReceipt, BackendError> {
        self.post("/emit", signal).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let backend =
            RemoteBackend::with_client(reqwest::Client::new(), "http://policy.internal:9000/");
        assert_eq!(backend.base_url(), "http://policy.internal:9000");
    }
}
