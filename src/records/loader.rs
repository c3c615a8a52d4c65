use super::types::{HealthcheckRecord, RecordError};
use chrono::NaiveDate;
use gray_matter::engine::YAML;
use gray_matter::Matter;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Raw frontmatter shape before validation. Fields are optional so a record
/// missing one of them surfaces as a parse fault instead of a deserialize
/// failure with no file context.
#[derive(Debug, Deserialize)]
struct RecordFrontmatter {
    enterprise: Option<String>,
    date: Option<String>,
}

/// Load every healthcheck record under `dir`, recursively.
///
/// A record that is missing its enterprise key or carries an unparseable date
/// is rejected and logged as bad data; it never enters the result set where a
/// failed date comparison could make it behave like the oldest record on file.
/// Rejections do not abort the scan.
///
/// # Errors
///
/// Returns `RecordError::StoreNotFound` when `dir` is not a readable
/// directory. That is a fatal configuration problem, not a data problem.
pub fn load_records(dir: &Path) -> Result<Vec<HealthcheckRecord>, RecordError> {
    if !dir.is_dir() {
        return Err(RecordError::StoreNotFound(dir.to_path_buf()));
    }

    let matter = Matter::<YAML>::new();
    let mut records = Vec::new();
    let mut faults = 0usize;

    for entry in WalkDir::new(dir)
        .into_iter()
        .filter_map(std::result::Result::ok)
    {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_record_file(path) {
            continue;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unreadable record file, rejecting");
                faults += 1;
                continue;
            }
        };

        match parse_record(&matter, &content, path) {
            Ok(record) => {
                debug!(key = %record.key, date = %record.recorded_on, "Loaded record");
                records.push(record);
            }
            Err(reason) => {
                warn!(path = %path.display(), reason, "Malformed record, rejecting");
                faults += 1;
            }
        }
    }

    if records.is_empty() && faults == 0 {
        warn!(dir = %dir.display(), "No healthcheck records found");
    } else if faults > 0 {
        warn!(faults, loaded = records.len(), "Record store contained bad data");
    }

    Ok(records)
}

fn is_record_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("md" | "markdown")
    )
}

/// Parse one record file. Returns a human-readable rejection reason on fault.
fn parse_record(
    matter: &Matter<YAML>,
    content: &str,
    path: &Path,
) -> Result<HealthcheckRecord, &'static str> {
    let parsed = matter
        .parse_with_struct::<RecordFrontmatter>(content)
        .ok_or("missing or invalid YAML frontmatter")?;

    let enterprise = parsed
        .data
        .enterprise
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or("missing 'enterprise' field")?;

    let date = parsed.data.date.ok_or("missing 'date' field")?;
    let recorded_on = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| "unparseable 'date' field, expected YYYY-MM-DD")?;

    Ok(HealthcheckRecord {
        key: enterprise.to_lowercase(),
        enterprise,
        recorded_on,
        path: path.to_path_buf(),
    })
}
