//! Inbound port. HTTP and terminal adapters call into the application.

use crate::domain::{AnalysisError, AnalysisResult, InvocationContext};

/// The `runBrancheAnalysis` callable.
#[async_trait::async_trait]
pub trait AnalysisPort: Send + Sync {
    /// Validate the raw payload and run one analysis.
    ///
    /// `payload` is untyped at the boundary; it is expected to carry `websiteUrl`.
    async fn run_branche_analysis(
        &self,
        payload: &serde_json::Value,
        ctx: &InvocationContext,
    ) -> Result<AnalysisResult, AnalysisError>;
}
