//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into `DomainError`. The use cases map those
//! into `AnalysisError`, the closed set of outcomes that crosses the invocation boundary.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Upstream request failed: {0}")]
    Upstream(String),

    /// Upstream answered, but not with anything we can turn into report text.
    #[error("Unusable upstream response: {0}")]
    UnusableResponse(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Input error: {0}")]
    Input(String),
}

/// Error class as seen by a caller. One per row of the error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Process configuration is incomplete (e.g. no API key).
    Configuration,
    /// The invocation payload is malformed.
    InvalidArgument,
    /// The upstream call failed, timed out or was cancelled.
    Upstream,
}

/// Wire-level status code of a rejected invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidArgument,
    Internal,
    DeadlineExceeded,
    Cancelled,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::Internal => "INTERNAL",
            ErrorCode::DeadlineExceeded => "DEADLINE_EXCEEDED",
            ErrorCode::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const MISSING_CREDENTIAL_MESSAGE: &str = "API key for Gemini is not configured.";
pub const INVALID_ARGUMENT_MESSAGE: &str = "Please provide a websiteUrl.";
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to generate analysis from Gemini.";
pub const TIMEOUT_MESSAGE: &str = "Analysis from Gemini timed out.";
pub const CANCELLED_MESSAGE: &str = "Analysis was cancelled.";

/// Rejection of a single invocation.
///
/// `Display` carries internal detail for logs. Callers only ever see
/// [`AnalysisError::caller_message`], which never includes upstream text.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("GEMINI_API_KEY secret not found")]
    MissingCredential,

    #[error("invalid argument `{field}`: {reason}")]
    InvalidArgument {
        field: &'static str,
        reason: &'static str,
    },

    #[error("upstream call failed: {detail}")]
    Upstream { detail: String },

    #[error("upstream call exceeded deadline of {after:?}")]
    Timeout { after: Duration },

    #[error("invocation cancelled")]
    Cancelled,
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::MissingCredential => ErrorKind::Configuration,
            AnalysisError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            AnalysisError::Upstream { .. }
            | AnalysisError::Timeout { .. }
            | AnalysisError::Cancelled => ErrorKind::Upstream,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::MissingCredential | AnalysisError::Upstream { .. } => {
                ErrorCode::Internal
            }
            AnalysisError::InvalidArgument { .. } => ErrorCode::InvalidArgument,
            AnalysisError::Timeout { .. } => ErrorCode::DeadlineExceeded,
            AnalysisError::Cancelled => ErrorCode::Cancelled,
        }
    }

    /// Fixed, human-readable message that is safe to return to the caller.
    pub fn caller_message(&self) -> &'static str {
        match self {
            AnalysisError::MissingCredential => MISSING_CREDENTIAL_MESSAGE,
            AnalysisError::InvalidArgument { .. } => INVALID_ARGUMENT_MESSAGE,
            AnalysisError::Upstream { .. } => UPSTREAM_FAILURE_MESSAGE,
            AnalysisError::Timeout { .. } => TIMEOUT_MESSAGE,
            AnalysisError::Cancelled => CANCELLED_MESSAGE,
        }
    }
}

impl From<DomainError> for AnalysisError {
    fn from(e: DomainError) -> Self {
        AnalysisError::Upstream {
            detail: e.to_string(),
        }
    }
}
