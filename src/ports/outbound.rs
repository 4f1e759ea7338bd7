//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{Credential, DomainError, Prompt};
use std::sync::Arc;

/// Generative-text service. Turns one prompt into report text.
#[async_trait::async_trait]
pub trait GenerativeTextPort: Send + Sync {
    /// Model identifier this client is bound to.
    fn model(&self) -> &str;

    /// Issue exactly one request for `prompt` and return the generated text.
    /// Implementations must not retry.
    async fn generate(&self, prompt: &Prompt) -> Result<String, DomainError>;
}

/// Builds a client bound to a credential and model.
///
/// Called at most once per process by the analysis service; the returned handle is shared.
pub trait UpstreamConnector: Send + Sync {
    fn connect(
        &self,
        credential: &Credential,
        model: &str,
    ) -> Result<Arc<dyn GenerativeTextPort>, DomainError>;
}
