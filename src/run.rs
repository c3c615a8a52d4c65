use crate::config::RunConfig;
use crate::notifier::{lift_suppression, notify};
use crate::records::{load_records, RecordError};
use crate::staleness::compute_overdue;
use crate::suppression::{self, SuppressionState};
use crate::tracker::{IssueTracker, TrackerError};
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Record store error: {0}")]
    RecordError(#[from] RecordError),

    #[error("Tracker error: {0}")]
    TrackerError(#[from] TrackerError),
}

/// Counters for one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub issues_evaluated: usize,
    pub overdue: usize,
    /// Issues that received (or, in dry-run, would receive) a comment.
    pub notified: usize,
    /// Overdue issues skipped because suppression is active.
    pub suppressed: usize,
    /// Expired suppression labels removed this pass.
    pub suppressions_lifted: usize,
    /// Per-issue operations that failed and were skipped over.
    pub failures: usize,
}

/// One full reconciliation pass: load records, list issues, match, then walk
/// the overdue set in order, resolving suppression and notifying.
///
/// `now` is captured by the caller once and threaded through every date
/// comparison. Per-issue failures are logged and counted; only record-store
/// acquisition and issue listing abort the run.
///
/// # Errors
///
/// Returns `RunError` when the record store cannot be read or the tracker
/// cannot list issues.
pub async fn run(
    config: &RunConfig,
    tracker: &dyn IssueTracker,
    now: DateTime<Utc>,
) -> Result<RunSummary, RunError> {
    let records = load_records(&config.records_dir)?;
    info!(records = records.len(), "Loaded healthcheck records");

    let issues = tracker.list_candidate_issues().await?;
    info!(issues = issues.len(), "Listed candidate issues");

    let overdue = compute_overdue(&records, &issues, config.max_staleness_days, now);

    let mut summary = RunSummary {
        issues_evaluated: issues.len(),
        overdue: overdue.len(),
        ..RunSummary::default()
    };

    for mut reconciled in overdue {
        let number = reconciled.issue.number;

        if reconciled.issue.has_label(&config.suppression_label) {
            let applied = match tracker
                .label_applied_date(number, &config.suppression_label)
                .await
            {
                Ok(applied) => applied,
                Err(e) => {
                    warn!(issue = number, error = %e, "Could not resolve label history, skipping issue");
                    summary.failures += 1;
                    continue;
                }
            };

            match suppression::resolve(applied, now) {
                SuppressionState::Active { since } => {
                    reconciled.suppressed = true;
                    reconciled.suppressed_since = Some(since);
                    info!(issue = number, since = %since, "Suppression active, not notifying");
                    summary.suppressed += 1;
                    continue;
                }
                SuppressionState::Expired { since } => {
                    reconciled.suppressed_since = Some(since);
                    let outcome =
                        lift_suppression(tracker, &reconciled, &config.suppression_label, config.dry_run)
                            .await;
                    pace(config).await;
                    if outcome.ok {
                        info!(issue = number, "{}", outcome.message);
                        summary.suppressions_lifted += 1;
                    } else {
                        warn!(issue = number, "{}", outcome.message);
                        summary.failures += 1;
                    }
                    // Treated as not suppressed from here on; falls through
                    // to notification in the same pass.
                }
                SuppressionState::NotSuppressed => {}
            }
        }

        let outcome = notify(tracker, &reconciled, &config.suppression_label, config.dry_run).await;
        pace(config).await;
        if outcome.ok {
            info!(issue = number, "{}", outcome.message);
            summary.notified += 1;
        } else {
            warn!(issue = number, "{}", outcome.message);
            summary.failures += 1;
        }
    }

    info!(
        evaluated = summary.issues_evaluated,
        overdue = summary.overdue,
        notified = summary.notified,
        suppressed = summary.suppressed,
        lifted = summary.suppressions_lifted,
        failures = summary.failures,
        "Reconciliation pass complete"
    );

    Ok(summary)
}

/// Fixed pause between mutating tracker calls, to stay under the backend's
/// secondary rate limits. Skipped entirely in dry-run mode.
async fn pace(config: &RunConfig) {
    if config.dry_run || config.rate_pause_seconds == 0 {
        return;
    }
    tokio::time::sleep(Duration::from_secs(config.rate_pause_seconds)).await;
}
