use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("No records directory configured. Pass --records-dir or set recordsDir in the config file.")]
    MissingRecordsDir,

    #[error("No repository configured. Pass --repo or set repo in the config file.")]
    MissingRepo,

    #[error("Invalid repository '{0}': expected 'owner/name'")]
    InvalidRepo(String),
}

/// Default overdue threshold in days.
pub fn default_max_staleness_days() -> i64 {
    60
}

/// Default label that pauses notifications for an issue.
pub fn default_suppression_label() -> String {
    "skip-healthcheck".to_string()
}

/// Default pause between mutating tracker calls, in seconds.
pub fn default_rate_pause_seconds() -> u64 {
    2
}

/// On-disk configuration file (JSON, camelCase keys).
///
/// Every field is optional; CLI flags take precedence over file values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    /// Directory holding the healthcheck record store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records_dir: Option<PathBuf>,
    /// Tracker repository in "owner/name" form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    /// Days since the last record before an issue counts as overdue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_staleness_days: Option<i64>,
    /// Label that pauses notifications for an issue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suppression_label: Option<String>,
    /// Seconds to pause between mutating tracker calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_pause_seconds: Option<u64>,
}

/// Fully resolved configuration for one reconciliation pass.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub records_dir: PathBuf,
    /// Tracker repository in "owner/name" form.
    pub repo: String,
    pub max_staleness_days: i64,
    pub suppression_label: String,
    /// Compute and report intended mutations without performing them.
    pub dry_run: bool,
    pub rate_pause_seconds: u64,
}

impl RunConfig {
    /// Merge CLI-level values over an optional config file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when a required value is missing from both
    /// sources or the repository is not in "owner/name" form.
    pub fn resolve(
        file: Option<FileConfig>,
        records_dir: Option<PathBuf>,
        repo: Option<String>,
        max_staleness_days: Option<i64>,
        suppression_label: Option<String>,
        rate_pause_seconds: Option<u64>,
        dry_run: bool,
    ) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_default();

        let records_dir = records_dir
            .or(file.records_dir)
            .ok_or(ConfigError::MissingRecordsDir)?;
        let repo = repo.or(file.repo).ok_or(ConfigError::MissingRepo)?;

        if repo.split('/').filter(|part| !part.is_empty()).count() != 2 {
            return Err(ConfigError::InvalidRepo(repo));
        }

        Ok(Self {
            records_dir,
            repo,
            max_staleness_days: max_staleness_days
                .or(file.max_staleness_days)
                .unwrap_or_else(default_max_staleness_days),
            suppression_label: suppression_label
                .or(file.suppression_label)
                .unwrap_or_else(default_suppression_label),
            dry_run,
            rate_pause_seconds: rate_pause_seconds
                .or(file.rate_pause_seconds)
                .unwrap_or_else(default_rate_pause_seconds),
        })
    }
}
