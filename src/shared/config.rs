//! Application configuration. API credential, upstream model, server settings.

use crate::domain::Credential;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro-latest";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_REGION: &str = "europe-west4";
pub const DEFAULT_INVOCATION_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // Upstream (Gemini)
    // ─────────────────────────────────────────────────────────────────────────
    /// Gemini API key. Read from GEMINI_API_KEY (or BRANCHE_GEMINI_API_KEY).
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Model identifier. Defaults to "gemini-1.5-pro-latest". Read from BRANCHE_GEMINI_MODEL.
    #[serde(default)]
    pub gemini_model: Option<String>,

    /// API base URL, without path. Read from BRANCHE_GEMINI_API_BASE.
    #[serde(default)]
    pub gemini_api_base: Option<String>,

    /// Use the mock upstream instead of Gemini (local development). Read from BRANCHE_MOCK_UPSTREAM.
    #[serde(default)]
    pub mock_upstream: Option<bool>,

    // ─────────────────────────────────────────────────────────────────────────
    // Invocation boundary
    // ─────────────────────────────────────────────────────────────────────────
    /// Listen address of the callable endpoint. Read from BRANCHE_BIND_ADDR.
    #[serde(default)]
    pub bind_addr: Option<String>,

    /// Per-invocation deadline in seconds (default 60). Read from BRANCHE_INVOCATION_TIMEOUT_SECS.
    #[serde(default)]
    pub invocation_timeout_secs: Option<u64>,

    /// Deployment region, logged at startup. Read from BRANCHE_REGION.
    #[serde(default)]
    pub region: Option<String>,

    /// Where the terminal client saves reports. Read from BRANCHE_REPORTS_DIR.
    #[serde(default)]
    pub reports_dir: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("BRANCHE"));
        if let Ok(path) = std::env::var("BRANCHE_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // GEMINI_API_KEY is read directly (no BRANCHE_ prefix): it is the secret name the
        // hosting platform injects.
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            cfg.gemini_api_key = Some(key);
        }
        Ok(cfg)
    }

    /// Resolve the credential once. `None` if the key is unset or empty.
    pub fn credential(&self) -> Option<Credential> {
        Credential::from_optional(self.gemini_api_key.clone())
    }

    pub fn gemini_model_or_default(&self) -> String {
        self.gemini_model
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string())
    }

    pub fn gemini_api_base_or_default(&self) -> String {
        self.gemini_api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string())
    }

    pub fn is_mock_upstream(&self) -> bool {
        self.mock_upstream.unwrap_or(false)
    }

    pub fn bind_addr_or_default(&self) -> String {
        self.bind_addr
            .clone()
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
    }

    /// Returns the invocation deadline. A zero value falls back to the default.
    pub fn invocation_timeout(&self) -> Duration {
        let secs = self
            .invocation_timeout_secs
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_INVOCATION_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn region_or_default(&self) -> String {
        self.region
            .clone()
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
    }

    pub fn reports_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.reports_dir.as_deref().unwrap_or("./reports"))
    }
}
