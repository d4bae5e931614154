use std::path::{Path, PathBuf};

use tracing::debug;
use url::Url;

use crate::domain::LoadTestConfig;
use crate::error::{AppError, AppResult, OutputError};
use crate::metrics::TestSummary;

const UNKNOWN_HOST: &str = "unknown";

/// Pretty-printed JSON form of the summary.
///
/// # Errors
///
/// Returns an error when the summary cannot be serialized.
pub fn render_json(summary: &TestSummary) -> AppResult<String> {
    serde_json::to_string_pretty(summary)
        .map_err(|err| AppError::output(OutputError::Serialize { source: err }))
}

/// `<host>_<METHOD>_<c>concurrency_<n>requests.json`.
#[must_use]
pub fn output_file_name(config: &LoadTestConfig) -> String {
    let host = Url::parse(config.url.trim())
        .ok()
        .and_then(|url| url.host_str().map(str::to_owned))
        .unwrap_or_else(|| UNKNOWN_HOST.to_owned());
    format!(
        "{}_{}_{}concurrency_{}requests.json",
        host,
        config.method.as_str(),
        config.concurrency.get(),
        config.total_requests.get()
    )
}

/// Writes the JSON summary into `dir`, creating it if needed, and returns the
/// path written.
///
/// # Errors
///
/// Returns an error when the directory or file cannot be written.
pub fn write_summary(dir: &Path, config: &LoadTestConfig, summary: &TestSummary) -> AppResult<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|err| {
        AppError::output(OutputError::CreateDir {
            path: dir.to_path_buf(),
            source: err,
        })
    })?;

    let path = dir.join(output_file_name(config));
    let json = render_json(summary)?;
    std::fs::write(&path, json).map_err(|err| {
        AppError::output(OutputError::Write {
            path: path.clone(),
            source: err,
        })
    })?;
    debug!("Wrote summary to {}", path.display());
    Ok(path)
}
