//! Domain entities. Pure data structures for the core business.
//!
//! All of them live for one invocation at most; nothing here is persisted.

use serde::{Deserialize, Serialize};

pub const SUCCESS_MESSAGE: &str = "Analysis complete.";

/// A validated invocation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(rename = "websiteUrl")]
    pub website_url: String,
}

impl AnalysisRequest {
    pub fn new(website_url: impl Into<String>) -> Self {
        Self {
            website_url: website_url.into(),
        }
    }
}

/// API key for the upstream service. Opaque; `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for a missing or empty secret.
    pub fn from_optional(raw: Option<String>) -> Option<Self> {
        raw.filter(|s| !s.is_empty()).map(Credential)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Fully constructed instruction text for one upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Caller-facing outcome. Serialized with a `status` tag:
/// `{"status":"success","message":..,"analysis":..}` or `{"status":"error","message":..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalysisResult {
    Success { message: String, analysis: String },
    Error { message: String },
}

impl AnalysisResult {
    /// Wrap upstream text as-is.
    pub fn success(analysis: String) -> Self {
        AnalysisResult::Success {
            message: SUCCESS_MESSAGE.to_string(),
            analysis,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisResult::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            AnalysisResult::Success { message, .. } | AnalysisResult::Error { message } => message,
        }
    }
}

impl From<&crate::domain::AnalysisError> for AnalysisResult {
    fn from(e: &crate::domain::AnalysisError) -> Self {
        AnalysisResult::Error {
            message: e.caller_message().to_string(),
        }
    }
}
