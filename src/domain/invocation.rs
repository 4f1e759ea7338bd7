//! Per-invocation context: id for logs, deadline, cancellation.

use std::fmt;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Default deadline of one invocation, matching the callable hosting default.
pub const DEFAULT_INVOCATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Execution context threaded through one invocation.
///
/// The id only appears in log fields, never in the result.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub id: Uuid,
    pub deadline: Duration,
    pub cancel: CancellationToken,
}

impl InvocationContext {
    pub fn new(deadline: Duration, cancel: CancellationToken) -> Self {
        Self {
            id: Uuid::new_v4(),
            deadline,
            cancel,
        }
    }

    /// Context with its own token, not linked to any parent.
    pub fn with_deadline(deadline: Duration) -> Self {
        Self::new(deadline, CancellationToken::new())
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::with_deadline(DEFAULT_INVOCATION_TIMEOUT)
    }
}

/// Lifecycle of one invocation. Only `Calling` suspends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationState {
    Received,
    Validating,
    Rejected,
    Authenticating,
    Calling,
    Succeeded,
    Failed,
}

impl fmt::Display for InvocationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InvocationState::Received => "received",
            InvocationState::Validating => "validating",
            InvocationState::Rejected => "rejected",
            InvocationState::Authenticating => "authenticating",
            InvocationState::Calling => "calling",
            InvocationState::Succeeded => "succeeded",
            InvocationState::Failed => "failed",
        };
        f.write_str(s)
    }
}
