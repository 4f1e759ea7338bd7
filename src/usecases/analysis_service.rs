//! Analysis service. Orchestrates the single upstream call of an invocation.
//!
//! Obtains the shared upstream client, builds the prompt, calls the generative
//! service under the invocation's deadline and cancellation token, maps the outcome.

use crate::domain::{
    AnalysisError, AnalysisRequest, AnalysisResult, Credential, InvocationContext,
    InvocationState, build_prompt,
};
use crate::ports::{GenerativeTextPort, UpstreamConnector};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

/// Service for the branche analysis.
///
/// Holds the upstream client for the lifetime of the process. The client is
/// created lazily on first use and reused afterwards.
pub struct AnalysisService {
    connector: Arc<dyn UpstreamConnector>,
    model: String,
    client: OnceCell<Arc<dyn GenerativeTextPort>>,
}

impl AnalysisService {
    /// Create a new analysis service.
    ///
    /// # Arguments
    /// * `connector` - Builds the upstream client (Gemini, Mock, etc.)
    /// * `model` - Fixed model identifier, e.g. "gemini-1.5-pro-latest"
    pub fn new(connector: Arc<dyn UpstreamConnector>, model: impl Into<String>) -> Self {
        Self {
            connector,
            model: model.into(),
            client: OnceCell::new(),
        }
    }

    /// Shared upstream client. Idempotent: later calls return the first handle.
    pub async fn client(
        &self,
        credential: &Credential,
    ) -> Result<Arc<dyn GenerativeTextPort>, AnalysisError> {
        let client = self
            .client
            .get_or_try_init(|| async {
                debug!(model = %self.model, "initializing upstream client");
                self.connector.connect(credential, &self.model)
            })
            .await?;
        Ok(Arc::clone(client))
    }

    /// Run one analysis for an already validated request.
    ///
    /// Makes at most one upstream call. The returned analysis text is passed
    /// through untouched.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
        credential: &Credential,
        ctx: &InvocationContext,
    ) -> Result<AnalysisResult, AnalysisError> {
        debug!(invocation = %ctx.id, state = %InvocationState::Authenticating);
        let client = self.client(credential).await.inspect_err(|e| {
            error!(invocation = %ctx.id, error = %e, "failed to initialize upstream client");
        })?;

        let prompt = build_prompt(request);
        info!(
            invocation = %ctx.id,
            website_url = %request.website_url,
            "Generating analysis for: {}",
            request.website_url
        );
        debug!(
            invocation = %ctx.id,
            state = %InvocationState::Calling,
            model = client.model(),
            prompt_len = prompt.len()
        );

        let outcome = tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => Err(AnalysisError::Cancelled),
            res = tokio::time::timeout(ctx.deadline, client.generate(&prompt)) => match res {
                Ok(Ok(text)) => Ok(text),
                Ok(Err(e)) => Err(AnalysisError::from(e)),
                Err(_) => Err(AnalysisError::Timeout { after: ctx.deadline }),
            },
        };

        match outcome {
            Ok(analysis) => {
                info!(
                    invocation = %ctx.id,
                    state = %InvocationState::Succeeded,
                    analysis_len = analysis.len(),
                    "Successfully generated analysis from Gemini."
                );
                Ok(AnalysisResult::success(analysis))
            }
            Err(e) => {
                error!(
                    invocation = %ctx.id,
                    state = %InvocationState::Failed,
                    kind = ?e.kind(),
                    error = %e,
                    "Error calling Gemini API"
                );
                Err(e)
            }
        }
    }
}
