//! Inbound security requests.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What kind of payload a request carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    /// User prompt headed for a model.
    Prompt,
    /// Model output headed back to a user.
    Output,
    /// Runtime event from an agent or tool.
    Runtime,
}

impl RequestKind {
    /// Mode the content filter runs in for this kind.
    ///
    /// The filter only knows prompt and output modes; runtime payloads are
    /// screened as prompts.
    pub fn filter_mode(self) -> FilterMode {
        match self {
            Self::Prompt | Self::Runtime => FilterMode::Prompt,
            Self::Output => FilterMode::Output,
        }
    }

    /// Whether this kind is filtered even when no policy asks for it.
    pub fn filtered_by_default(self) -> bool {
        matches!(self, Self::Prompt | Self::Output)
    }

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::Output => "output",
            Self::Runtime => "runtime",
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content filter mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Screen inbound prompt content.
    Prompt,
    /// Screen model output content.
    Output,
}

/// Caller-supplied request metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMetadata {
    /// Originating user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Originating session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Unix timestamp in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// A request to be mediated by the orchestrator.
///
/// The orchestrator never mutates a request it is handed. Filtered content is
/// carried forward in a derived copy built with [`SecurityRequest::with_content`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityRequest {
    /// Caller-supplied identifier, echoed in the result. Uniqueness is not enforced.
    pub id: String,
    /// Payload kind.
    #[serde(rename = "type")]
    pub kind: RequestKind,
    /// Raw text payload.
    pub content: String,
    /// Free-form context for the policy engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
    /// Optional caller metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RequestMetadata>,
}

impl SecurityRequest {
    /// Create a request without context or metadata.
    pub fn new(id: impl Into<String>, kind: RequestKind, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            content: content.into(),
            context: None,
            metadata: None,
        }
    }

    /// Attach a context map.
    pub fn with_context(mut self, context: Map<String, Value>) -> Self {
        self.context = Some(context);
        self
    }

    /// Attach caller metadata.
    pub fn with_metadata(mut self, metadata: RequestMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Derive a copy of this request carrying different content.
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self.clone()
        }
    }
}
