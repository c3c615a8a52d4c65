use chrono::{DateTime, Utc};

/// Days after which an applied suppression label expires. Fixed by design,
/// independent of the overdue threshold.
pub const SUPPRESSION_EXPIRY_DAYS: i64 = 30;

/// Outcome of resolving an issue's suppression label against its event
/// history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressionState {
    /// The label was never applied (no event on record).
    NotSuppressed,
    /// The label is active; no notification this run.
    Active { since: DateTime<Utc> },
    /// The label has outlived its window; remove it and notify in the same
    /// pass.
    Expired { since: DateTime<Utc> },
}

/// Decide whether suppression is active, expired, or absent.
///
/// `applied` is the most recent "label applied" event date, as reported by the
/// tracker; `None` means the label was never applied and expiry is not
/// attempted.
#[must_use]
pub fn resolve(applied: Option<DateTime<Utc>>, now: DateTime<Utc>) -> SuppressionState {
    let Some(since) = applied else {
        return SuppressionState::NotSuppressed;
    };

    let days_suppressed = (now - since).num_days();
    if days_suppressed > SUPPRESSION_EXPIRY_DAYS {
        SuppressionState::Expired { since }
    } else {
        SuppressionState::Active { since }
    }
}
