//! Markdown report files written by the terminal client.

use crate::domain::DomainError;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// File-name friendly form of a website: scheme dropped, anything but
/// alphanumerics, '.' and '-' replaced by '_'.
fn file_stem(website_url: &str) -> String {
    let trimmed = website_url.trim();
    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    let stem: String = host
        .trim_end_matches('/')
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    if stem.is_empty() { "website".to_string() } else { stem }
}

/// Render a report as Markdown.
pub fn render_markdown(website_url: &str, analysis: &str, generated_at: DateTime<Local>) -> String {
    let mut md = String::new();
    md.push_str(&format!("# Brancheanalyse: {}\n\n", website_url));
    md.push_str(&format!(
        "**Gegenereerd:** {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M")
    ));
    md.push_str("---\n\n");
    md.push_str(analysis);
    if !analysis.ends_with('\n') {
        md.push('\n');
    }
    md.push_str("\n---\n");
    md.push_str("*Gegenereerd door branche-analysis*\n");
    md
}

/// Write the report into `dir` (created if missing). Returns the file path.
pub async fn write_report(
    dir: &Path,
    website_url: &str,
    analysis: &str,
    generated_at: DateTime<Local>,
) -> Result<PathBuf, DomainError> {
    fs::create_dir_all(dir)
        .await
        .map_err(|e| DomainError::Report(format!("Failed to create reports dir: {}", e)))?;

    let filename = format!(
        "brancheanalyse_{}_{}.md",
        file_stem(website_url),
        generated_at.format("%Y%m%d_%H%M%S")
    );
    let path = dir.join(filename);

    fs::write(&path, render_markdown(website_url, analysis, generated_at))
        .await
        .map_err(|e| DomainError::Report(format!("Failed to write report: {}", e)))?;

    info!(path = %path.display(), "report saved");
    Ok(path)
}
