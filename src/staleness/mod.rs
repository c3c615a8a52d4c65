use crate::records::HealthcheckRecord;
use crate::tracker::CandidateIssue;
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Trailing " - <digits>" marker (and anything after it) stripped from issue
/// titles when deriving the matching key.
static TRAILING_ISSUE_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*-\s*\d+.*$").expect("valid pattern"));

/// A candidate issue joined against the record store, valid for one run only.
#[derive(Debug, Clone)]
pub struct ReconciledIssue {
    pub issue: CandidateIssue,
    /// Key the issue title was matched under, lower-cased.
    pub match_key: String,
    /// Date of the most recent matching record. `None` when nothing matched.
    pub last_record_date: Option<NaiveDate>,
    /// Whole days between `last_record_date` and the run's captured `now`.
    /// `None` iff `last_record_date` is `None`.
    pub days_since_record: Option<i64>,
    /// Whether the issue carried the suppression label when reconciled.
    /// Filled by the suppression pass, not by the matcher.
    pub suppressed: bool,
    /// When the suppression label was applied, once resolved.
    pub suppressed_since: Option<DateTime<Utc>>,
}

/// Derive the matching key from an issue title.
///
/// Strips the last " - <number>" suffix and everything after it, then
/// lower-cases the result so it lines up with record keys, which are
/// lower-cased at load time.
#[must_use]
pub fn derive_match_key(title: &str) -> String {
    TRAILING_ISSUE_REF
        .replace(title, "")
        .trim()
        .to_lowercase()
}

/// Join issues against healthcheck records and keep the overdue ones.
///
/// An issue is overdue when no record matches its key, or when its most
/// recent record is strictly older than `max_staleness_days`. Ordering of the
/// output follows the input issue ordering; ties between records with equal
/// key and date resolve to the first encountered.
///
/// `now` is captured once per run and threaded through every comparison so a
/// single pass is internally consistent.
#[must_use]
pub fn compute_overdue(
    records: &[HealthcheckRecord],
    issues: &[CandidateIssue],
    max_staleness_days: i64,
    now: DateTime<Utc>,
) -> Vec<ReconciledIssue> {
    let today = now.date_naive();

    issues
        .iter()
        .filter_map(|issue| {
            let match_key = derive_match_key(&issue.title);

            let last_record_date = records
                .iter()
                .filter(|record| record.key == match_key)
                .map(|record| record.recorded_on)
                .max();

            let days_since_record = last_record_date.map(|date| (today - date).num_days());

            let overdue = match days_since_record {
                None => true,
                Some(days) => days > max_staleness_days,
            };

            overdue.then(|| ReconciledIssue {
                issue: issue.clone(),
                match_key,
                last_record_date,
                days_since_record,
                suppressed: false,
                suppressed_since: None,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "staleness_tests.rs"]
mod tests;
