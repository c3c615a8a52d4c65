use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Record store not found at {0}")]
    StoreNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A dated healthcheck entry, immutable once loaded.
///
/// Multiple records may share a key; only the most recent by `recorded_on`
/// matters when matching against issues.
#[derive(Debug, Clone)]
pub struct HealthcheckRecord {
    /// Matching key, lower-cased at load time.
    pub key: String,
    /// Enterprise name exactly as written in the record.
    pub enterprise: String,
    /// Date the healthcheck was performed.
    pub recorded_on: NaiveDate,
    /// Source file the record was loaded from.
    pub path: PathBuf,
}
