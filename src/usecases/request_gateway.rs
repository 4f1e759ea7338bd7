//! Request gateway. Implements AnalysisPort: checks configuration and the raw
//! payload before anything expensive happens, then hands over to AnalysisService.

use crate::domain::{
    AnalysisError, AnalysisRequest, AnalysisResult, Credential, InvocationContext,
    InvocationState,
};
use crate::ports::AnalysisPort;
use crate::usecases::AnalysisService;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

pub const WEBSITE_URL_FIELD: &str = "websiteUrl";

/// Entry point of the `runBrancheAnalysis` callable.
///
/// The credential is resolved once at startup and injected; `None` means the
/// process is not configured and every invocation is rejected.
pub struct RequestGateway {
    credential: Option<Credential>,
    analysis: Arc<AnalysisService>,
}

impl RequestGateway {
    pub fn new(credential: Option<Credential>, analysis: Arc<AnalysisService>) -> Self {
        Self {
            credential,
            analysis,
        }
    }
}

/// Extract a request from the untyped payload.
///
/// `websiteUrl` must be a non-empty string. Any other shape (absent, null,
/// number, object, ...) is an invalid argument.
pub fn validate_payload(payload: &Value) -> Result<AnalysisRequest, AnalysisError> {
    match payload.get(WEBSITE_URL_FIELD) {
        Some(Value::String(url)) if !url.is_empty() => Ok(AnalysisRequest::new(url.as_str())),
        Some(Value::String(_)) => Err(AnalysisError::InvalidArgument {
            field: WEBSITE_URL_FIELD,
            reason: "empty",
        }),
        None | Some(Value::Null) => Err(AnalysisError::InvalidArgument {
            field: WEBSITE_URL_FIELD,
            reason: "missing",
        }),
        Some(_) => Err(AnalysisError::InvalidArgument {
            field: WEBSITE_URL_FIELD,
            reason: "not a string",
        }),
    }
}

#[async_trait::async_trait]
impl AnalysisPort for RequestGateway {
    async fn run_branche_analysis(
        &self,
        payload: &Value,
        ctx: &InvocationContext,
    ) -> Result<AnalysisResult, AnalysisError> {
        info!(invocation = %ctx.id, state = %InvocationState::Received, "Starting branche analysis");
        debug!(invocation = %ctx.id, state = %InvocationState::Validating);

        // Missing credential makes the whole call path unusable, so it is checked before input.
        let Some(credential) = self.credential.as_ref() else {
            let e = AnalysisError::MissingCredential;
            error!(invocation = %ctx.id, state = %InvocationState::Rejected, kind = ?e.kind(), "GEMINI_API_KEY secret not found.");
            return Err(e);
        };

        let request = validate_payload(payload).inspect_err(|e| {
            error!(
                invocation = %ctx.id,
                state = %InvocationState::Rejected,
                kind = ?e.kind(),
                error = %e,
                "No websiteUrl provided."
            );
        })?;

        self.analysis.analyze(&request, credential, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, ErrorKind};
    use crate::usecases::test_support::{StubConnector, StubUpstream, credential};
    use serde_json::json;

    fn gateway(upstream: &StubUpstream, credential: Option<Credential>) -> RequestGateway {
        let service = AnalysisService::new(StubConnector::new(upstream), "gemini-1.5-pro-latest");
        RequestGateway::new(credential, Arc::new(service))
    }

    async fn invoke(gw: &RequestGateway, payload: Value) -> Result<AnalysisResult, AnalysisError> {
        gw.run_branche_analysis(&payload, &InvocationContext::default())
            .await
    }

    #[tokio::test]
    async fn test_scenario_a_success() {
        let upstream = StubUpstream::returning("REPORT TEXT");
        let gw = gateway(&upstream, Some(credential()));

        let result = invoke(&gw, json!({ "websiteUrl": "www.heijmans.nl" }))
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "status": "success",
                "message": "Analysis complete.",
                "analysis": "REPORT TEXT"
            })
        );
        assert_eq!(upstream.calls(), 1);
        assert!(upstream.prompts()[0].contains("www.heijmans.nl"));
    }

    #[tokio::test]
    async fn test_scenario_b_missing_url() {
        let upstream = StubUpstream::returning("REPORT TEXT");
        let gw = gateway(&upstream, Some(credential()));

        let err = invoke(&gw, json!({})).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_scenario_c_missing_credential() {
        let upstream = StubUpstream::returning("REPORT TEXT");
        let gw = gateway(&upstream, None);

        let err = invoke(&gw, json!({ "websiteUrl": "www.heijmans.nl" }))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.code(), ErrorCode::Internal);
        assert!(!err.caller_message().contains("test-key"));
        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_scenario_d_upstream_throws() {
        let upstream = StubUpstream::failing("ECONNRESET: network socket disconnected");
        let gw = gateway(&upstream, Some(credential()));

        let err = invoke(&gw, json!({ "websiteUrl": "www.heijmans.nl" }))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert_eq!(
            err.caller_message(),
            "Failed to generate analysis from Gemini."
        );
        assert!(!err.caller_message().contains("ECONNRESET"));
        assert_eq!(upstream.calls(), 1);
    }

    #[tokio::test]
    async fn test_credential_checked_before_input() {
        let upstream = StubUpstream::returning("REPORT TEXT");
        let gw = gateway(&upstream, None);

        let err = invoke(&gw, json!({ "websiteUrl": 42 })).await.unwrap_err();

        assert!(matches!(err, AnalysisError::MissingCredential));
        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_non_string_urls_rejected_without_call() {
        let upstream = StubUpstream::returning("REPORT TEXT");
        let gw = gateway(&upstream, Some(credential()));

        for payload in [
            json!({ "websiteUrl": null }),
            json!({ "websiteUrl": 42 }),
            json!({ "websiteUrl": { "host": "heijmans.nl" } }),
            json!({ "websiteUrl": ["www.heijmans.nl"] }),
            json!({ "websiteUrl": true }),
            json!({ "websiteUrl": "" }),
            json!(null),
            json!("www.heijmans.nl"),
        ] {
            let err = invoke(&gw, payload.clone()).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "payload: {payload}");
        }
        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_same_url_gives_identical_results() {
        let upstream = StubUpstream::returning("REPORT TEXT");
        let gw = gateway(&upstream, Some(credential()));
        let payload = json!({ "websiteUrl": "www.heijmans.nl" });

        let first = invoke(&gw, payload.clone()).await.unwrap();
        let second = invoke(&gw, payload).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(upstream.calls(), 2);
        let prompts = upstream.prompts();
        assert_eq!(prompts[0], prompts[1]);
    }

    #[test]
    fn test_validate_payload_keeps_url_verbatim() {
        let request =
            validate_payload(&json!({ "websiteUrl": "  https://Heijmans.nl/over-ons?x=1 " }))
                .unwrap();
        assert_eq!(request.website_url, "  https://Heijmans.nl/over-ons?x=1 ");
    }

    #[test]
    fn test_validate_payload_ignores_extra_fields() {
        let request =
            validate_payload(&json!({ "websiteUrl": "a.nl", "company": "Heijmans" })).unwrap();
        assert_eq!(request, AnalysisRequest::new("a.nl"));
    }
}
