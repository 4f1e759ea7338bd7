//! Mock upstream for local development without an API key or network access.
//!
//! Returns a canned report that echoes the requested website.

use crate::domain::{Credential, DomainError, Prompt};
use crate::ports::{GenerativeTextPort, UpstreamConnector};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const WEBSITE_MARKER: &str = "via hun website: ";

/// Mock generative adapter.
///
/// Returns predetermined report text without making API calls.
/// Simulates network latency with configurable delay.
pub struct MockGenerativeAdapter {
    model: String,
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockGenerativeAdapter {
    /// Create a new mock adapter with default delay (100ms).
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_delay(model, 100)
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(model: impl Into<String>, delay_ms: u64) -> Self {
        Self {
            model: model.into(),
            delay_ms,
        }
    }
}

/// Pull the website back out of the prompt so the canned report mentions it.
fn website_from_prompt(prompt: &str) -> &str {
    prompt
        .split_once(WEBSITE_MARKER)
        .and_then(|(_, rest)| rest.split_once(".\n").map(|(url, _)| url))
        .unwrap_or("onbekend")
}

#[async_trait::async_trait]
impl GenerativeTextPort for MockGenerativeAdapter {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, DomainError> {
        info!(
            prompt_len = prompt.len(),
            "[MOCK] Simulating report generation"
        );

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        let website = website_from_prompt(prompt.as_str());
        Ok(format!(
            "[MOCK] Brancheanalyse voor {website}\n\n\
             Hoofdstuk 1. Inleiding\n\
             Dit is een gesimuleerd rapport. In productie bevat dit alle 10 hoofdstukken.\n\n\
             Risicomatrix\n\
             Fysieke belasting  ●●●○○\n\
             Werkdruk           ●●○○○\n"
        ))
    }
}

/// Connector that hands out `MockGenerativeAdapter`s. Accepts any credential.
pub struct MockConnector {
    delay_ms: u64,
}

impl MockConnector {
    pub fn new(delay_ms: u64) -> Self {
        Self { delay_ms }
    }
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new(100)
    }
}

impl UpstreamConnector for MockConnector {
    fn connect(
        &self,
        _credential: &Credential,
        model: &str,
    ) -> Result<Arc<dyn GenerativeTextPort>, DomainError> {
        Ok(Arc::new(MockGenerativeAdapter::with_delay(model, self.delay_ms)))
    }
}
