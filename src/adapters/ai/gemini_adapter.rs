//! Gemini adapter for report generation.
//!
//! Calls the `generateContent` REST endpoint with a single user prompt.
//! Implements `GenerativeTextPort`; `GeminiConnector` implements `UpstreamConnector`.

use crate::domain::{Credential, DomainError, Prompt};
use crate::ports::{GenerativeTextPort, UpstreamConnector};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Max chars of an upstream error body kept in logs and internal errors.
const ERROR_BODY_PREVIEW: usize = 200;

/// Gemini REST client bound to one API key and model.
///
/// The API key is sent as `x-goog-api-key` and never logged.
pub struct GeminiAdapter {
    client: reqwest::Client,
    api_base: String,
    api_key: Credential,
    model: String,
}

impl GeminiAdapter {
    /// Create a new Gemini adapter.
    ///
    /// # Arguments
    /// * `client` - Shared HTTP client
    /// * `api_base` - Base URL (e.g., "https://generativelanguage.googleapis.com")
    /// * `api_key` - Gemini API key
    /// * `model` - Model name (e.g., "gemini-1.5-pro-latest")
    pub fn new(client: reqwest::Client, api_base: String, api_key: Credential, model: String) -> Self {
        Self {
            client,
            api_base,
            api_key,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

/// generateContent request body.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// generateContent response body. Every level is optional upstream.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    prompt_feedback: Option<PromptFeedback>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Text of the first candidate: all its text parts, concatenated.
fn extract_text(response: GenerateResponse) -> Result<String, DomainError> {
    if let Some(error) = response.error {
        return Err(DomainError::Upstream(format!(
            "API error object: {}",
            preview(&error.message)
        )));
    }
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(DomainError::UnusableResponse(format!(
            "prompt blocked: {}",
            reason
        )));
    }

    let candidate = response
        .candidates
        .and_then(|c| c.into_iter().next())
        .ok_or_else(|| DomainError::UnusableResponse("no candidates returned".to_string()))?;
    let finish_reason = candidate.finish_reason;

    let text: String = candidate
        .content
        .and_then(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        return Err(DomainError::UnusableResponse(format!(
            "candidate has no text (finish reason: {})",
            finish_reason.as_deref().unwrap_or("unknown")
        )));
    }
    Ok(text)
}

fn preview(s: &str) -> String {
    s.chars().take(ERROR_BODY_PREVIEW).collect()
}

#[async_trait::async_trait]
impl GenerativeTextPort for GeminiAdapter {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, DomainError> {
        info!(
            model = %self.model,
            prompt_len = prompt.len(),
            "sending prompt to Gemini"
        );

        let request = GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart {
                    text: prompt.as_str(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::Upstream(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %preview(&text), "Gemini API returned error");
            return Err(DomainError::Upstream(format!(
                "API error {}: {}",
                status,
                preview(&text)
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| DomainError::UnusableResponse(format!("Failed to parse API response: {}", e)))?;

        let text = extract_text(body)?;
        debug!(text_len = text.len(), "received Gemini response");
        Ok(text)
    }
}

/// Builds `GeminiAdapter`s that share one HTTP client.
pub struct GeminiConnector {
    api_base: String,
}

impl GeminiConnector {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }
}

impl UpstreamConnector for GeminiConnector {
    fn connect(
        &self,
        credential: &Credential,
        model: &str,
    ) -> Result<Arc<dyn GenerativeTextPort>, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("branche-analysis/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::Upstream(format!("HTTP client init failed: {}", e)))?;
        info!(model, api_base = %self.api_base, "Gemini client initialized");
        Ok(Arc::new(GeminiAdapter::new(
            client,
            self.api_base.clone(),
            credential.clone(),
            model.to_string(),
        )))
    }
}
