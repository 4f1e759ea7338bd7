//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run server or terminal client.
//! No business logic here; validation and orchestration live in the use cases.

use branche_analysis::adapters::ai::{GeminiConnector, MockConnector};
use branche_analysis::adapters::http::{self, HttpState};
use branche_analysis::adapters::ui::banner::BannerInfo;
use branche_analysis::adapters::ui::tui::TuiClient;
use branche_analysis::ports::{AnalysisPort, UpstreamConnector};
use branche_analysis::shared::config::AppConfig;
use branche_analysis::shared::logging;
use branche_analysis::usecases::{AnalysisService, RequestGateway};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "branche-analysis", version, about = "Branche analysis reports via Gemini")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the runBrancheAnalysis callable over HTTP (default).
    Serve {
        /// Listen address, overrides BRANCHE_BIND_ADDR.
        #[arg(long)]
        bind: Option<String>,
    },
    /// Run one analysis from the terminal.
    Analyze {
        /// Website of the organisation; prompted for when omitted.
        #[arg(long)]
        url: Option<String>,
        /// Save the report as Markdown in the reports directory.
        #[arg(long)]
        save: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    logging::init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cli = Cli::parse();
    let cfg = AppConfig::load()?;

    // --- Credential: resolved once, injected; absence is reported per invocation ---
    let credential = cfg.credential();
    if credential.is_some() {
        info!("GEMINI_API_KEY is set");
    } else {
        warn!("GEMINI_API_KEY is not set; every invocation will be rejected");
    }

    // --- Upstream connector (Gemini or mock) ---
    let model = cfg.gemini_model_or_default();
    let connector: Arc<dyn UpstreamConnector> = if cfg.is_mock_upstream() {
        warn!("BRANCHE_MOCK_UPSTREAM set, using mock upstream");
        Arc::new(MockConnector::default())
    } else {
        info!(
            model = %model,
            api_base = %cfg.gemini_api_base_or_default(),
            "using Gemini upstream"
        );
        Arc::new(GeminiConnector::new(cfg.gemini_api_base_or_default()))
    };

    // --- Services ---
    let analysis_service = Arc::new(AnalysisService::new(connector, model));
    let gateway: Arc<dyn AnalysisPort> =
        Arc::new(RequestGateway::new(credential, analysis_service));

    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            let bind_addr = bind.unwrap_or_else(|| cfg.bind_addr_or_default());
            let shutdown = CancellationToken::new();
            {
                let shutdown = shutdown.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        info!("shutdown requested");
                        shutdown.cancel();
                    }
                });
            }
            info!(
                region = %cfg.region_or_default(),
                timeout_secs = cfg.invocation_timeout().as_secs(),
                "starting runBrancheAnalysis"
            );
            let state = HttpState::new(gateway, cfg.invocation_timeout(), shutdown);
            http::run_server(state, &bind_addr).await?;
        }
        Command::Analyze { url, save } => {
            let model = cfg.gemini_model_or_default();
            let region = cfg.region_or_default();
            branche_analysis::adapters::ui::init_ui(&BannerInfo {
                model: &model,
                region: &region,
            });
            let client = TuiClient::new(
                gateway,
                cfg.invocation_timeout(),
                cfg.reports_dir_or_default(),
            );
            let result = client
                .run(url, save)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            if !result.is_success() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
