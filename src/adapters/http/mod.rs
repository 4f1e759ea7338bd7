//! HTTP adapter. Serves the `runBrancheAnalysis` callable with axum.

pub mod callable;

use crate::ports::AnalysisPort;
use axum::{Router, routing::post};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// State shared across handlers.
#[derive(Clone)]
pub struct HttpState {
    pub analysis: Arc<dyn AnalysisPort>,
    pub invocation_timeout: Duration,
    /// Parent of every per-request cancellation token. Cancelled on shutdown.
    pub shutdown: CancellationToken,
}

impl HttpState {
    pub fn new(
        analysis: Arc<dyn AnalysisPort>,
        invocation_timeout: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            analysis,
            invocation_timeout,
            shutdown,
        }
    }
}

/// Create the application router.
pub fn create_router(state: HttpState) -> Router {
    // The browser front-end is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/runBrancheAnalysis", post(callable::run_branche_analysis))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the callable server until `state.shutdown` is cancelled.
///
/// In-flight invocations observe the cancellation through their child tokens.
pub async fn run_server(state: HttpState, bind_addr: &str) -> anyhow::Result<()> {
    let shutdown = state.shutdown.clone();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(addr = %listener.local_addr()?, "callable server listening on http://{}/runBrancheAnalysis", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    info!("callable server stopped");
    Ok(())
}
