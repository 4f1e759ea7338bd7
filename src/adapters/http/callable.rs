//! Callable-function wire protocol.
//!
//! Request: `{"data": <payload>}`. Response: `{"result": <value>}` on success,
//! `{"error": {"status": "<CODE>", "message": "<text>"}}` otherwise.

use crate::domain::{AnalysisError, ErrorCode, InvocationContext};
use crate::adapters::http::HttpState;
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct CallableResponse<T> {
    pub result: T,
}

#[derive(Debug, Serialize)]
pub struct CallableErrorBody {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct CallableErrorEnvelope {
    error: CallableErrorBody,
}

/// Error half of the protocol. Only fixed caller messages go on the wire.
#[derive(Debug)]
pub struct CallableError {
    code: ErrorCode,
    message: String,
}

impl CallableError {
    pub fn bad_request() -> Self {
        Self {
            code: ErrorCode::InvalidArgument,
            message: "Bad Request".to_string(),
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self.code {
            ErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
            // 499 Client Closed Request
            ErrorCode::Cancelled => {
                StatusCode::from_u16(499).unwrap_or(StatusCode::SERVICE_UNAVAILABLE)
            }
        }
    }
}

impl From<AnalysisError> for CallableError {
    fn from(e: AnalysisError) -> Self {
        Self {
            code: e.code(),
            message: e.caller_message().to_string(),
        }
    }
}

impl IntoResponse for CallableError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let body = CallableErrorEnvelope {
            error: CallableErrorBody {
                status: self.code.as_str().to_string(),
                message: self.message,
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Extract `data` from a callable request body.
///
/// The body must be a JSON object; a missing `data` field yields `Null`.
pub fn parse_request(body: &[u8]) -> Result<Value, CallableError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(mut envelope)) => Ok(envelope.remove("data").unwrap_or(Value::Null)),
        Ok(other) => {
            warn!(body_len = body.len(), kind = json_kind(&other), "rejecting non-object callable request");
            Err(CallableError::bad_request())
        }
        Err(e) => {
            warn!(error = %e, body_len = body.len(), "rejecting malformed callable request");
            Err(CallableError::bad_request())
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `POST /runBrancheAnalysis`
///
/// The body is parsed by hand so that malformed JSON gets a protocol error
/// instead of axum's plain-text rejection.
pub async fn run_branche_analysis(
    State(state): State<HttpState>,
    body: Bytes,
) -> Result<Response, CallableError> {
    let data = parse_request(&body)?;

    let ctx = InvocationContext::new(state.invocation_timeout, state.shutdown.child_token());
    let result = state.analysis.run_branche_analysis(&data, &ctx).await?;

    Ok(Json(CallableResponse { result }).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_request_reads_data() {
        let data = parse_request(br#"{"data":{"websiteUrl":"a.nl"}}"#).unwrap();
        assert_eq!(data, json!({ "websiteUrl": "a.nl" }));
    }

    #[test]
    fn test_parse_request_missing_data_is_null() {
        assert_eq!(parse_request(b"{}").unwrap(), Value::Null);
    }

    #[test]
    fn test_parse_request_rejects_non_objects() {
        for body in [
            &br#"[{"websiteUrl":"a.nl"}]"#[..],
            &b"[]"[..],
            &b"null"[..],
            &b"42"[..],
            &br#""www.heijmans.nl""#[..],
        ] {
            let err = parse_request(body).unwrap_err();
            assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        }
    }
}
