//! Terminal client. Asks for a website, runs one analysis, renders the outcome.
//!
//! Talks to the application through AnalysisPort, same as the HTTP adapter.

use crate::adapters::ui::report;
use crate::domain::{AnalysisResult, DomainError, InvocationContext};
use crate::ports::AnalysisPort;
use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::Text;
use inquire::ui::{Color, RenderConfig, Styled};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_WEBSITE: &str = "www.heijmans.nl";

/// Applies the prompt theme for all subsequent inquire prompts.
pub fn apply_theme() {
    let mut cfg = RenderConfig::default_colored();
    cfg.prompt_prefix = Styled::new("›").with_fg(Color::LightBlue);
    inquire::set_global_render_config(cfg);
}

/// Terminal adapter.
pub struct TuiClient {
    analysis: Arc<dyn AnalysisPort>,
    deadline: Duration,
    reports_dir: PathBuf,
}

impl TuiClient {
    pub fn new(analysis: Arc<dyn AnalysisPort>, deadline: Duration, reports_dir: PathBuf) -> Self {
        Self {
            analysis,
            deadline,
            reports_dir,
        }
    }

    /// Run one analysis. Prompts for the website when `website_url` is `None`.
    /// Ctrl-C cancels the in-flight call.
    pub async fn run(
        &self,
        website_url: Option<String>,
        save: bool,
    ) -> Result<AnalysisResult, DomainError> {
        let website_url = match website_url {
            Some(url) => url,
            None => Text::new("Website van de organisatie:")
                .with_default(DEFAULT_WEBSITE)
                .prompt()
                .map_err(|e| DomainError::Input(e.to_string()))?,
        };

        let cancel = CancellationToken::new();
        let ctrl_c = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel.cancel();
                }
            })
        };
        let ctx = InvocationContext::new(self.deadline, cancel);

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner());
        spinner.set_message("Analyse wordt uitgevoerd...");
        spinner.enable_steady_tick(Duration::from_millis(120));

        let payload = serde_json::json!({ "websiteUrl": website_url });
        let result = self
            .analysis
            .run_branche_analysis(&payload, &ctx)
            .await
            .unwrap_or_else(|e| AnalysisResult::from(&e));

        spinner.finish_and_clear();
        ctrl_c.abort();

        match &result {
            AnalysisResult::Success { analysis, .. } => {
                println!("{}\n", "Gegenereerd Rapport:".bold());
                println!("{}", analysis);
                if save {
                    let path = report::write_report(
                        &self.reports_dir,
                        &website_url,
                        analysis,
                        chrono::Local::now(),
                    )
                    .await?;
                    println!("\n{} {}", "Rapport opgeslagen:".green(), path.display());
                }
            }
            AnalysisResult::Error { message } => {
                println!(
                    "{} {}",
                    "Er is een fout opgetreden:".red().bold(),
                    message.as_str().red()
                );
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AnalysisError;
    use serde_json::Value;

    struct FixedPort(Result<String, ()>);

    #[async_trait::async_trait]
    impl AnalysisPort for FixedPort {
        async fn run_branche_analysis(
            &self,
            payload: &Value,
            _ctx: &InvocationContext,
        ) -> Result<AnalysisResult, AnalysisError> {
            assert!(payload["websiteUrl"].is_string());
            match &self.0 {
                Ok(text) => Ok(AnalysisResult::success(text.clone())),
                Err(()) => Err(AnalysisError::Upstream {
                    detail: "boom".to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_run_success_saves_report() {
        let tmp = tempfile::tempdir().unwrap();
        let client = TuiClient::new(
            Arc::new(FixedPort(Ok("REPORT TEXT".to_string()))),
            Duration::from_secs(5),
            tmp.path().to_path_buf(),
        );

        let result = client
            .run(Some("www.heijmans.nl".to_string()), true)
            .await
            .unwrap();

        assert!(result.is_success());
        let saved: Vec<_> = std::fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(saved.len(), 1);
    }

    #[tokio::test]
    async fn test_run_error_is_rendered_not_raised() {
        let tmp = tempfile::tempdir().unwrap();
        let client = TuiClient::new(
            Arc::new(FixedPort(Err(()))),
            Duration::from_secs(5),
            tmp.path().to_path_buf(),
        );

        let result = client
            .run(Some("www.heijmans.nl".to_string()), true)
            .await
            .unwrap();

        assert_eq!(result.message(), "Failed to generate analysis from Gemini.");
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }
}
