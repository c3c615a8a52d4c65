use super::NotifyError;
use crate::staleness::ReconciledIssue;
use std::fmt::Write as _;

/// Compose the notification comment for an overdue issue.
///
/// Deterministic: the output is a pure function of the reconciled issue and
/// the configured suppression label. An empty title is a precondition
/// violation and fails fast rather than leaking a blank into the message.
pub fn compose_message(
    reconciled: &ReconciledIssue,
    skip_label: &str,
) -> Result<String, NotifyError> {
    let issue = &reconciled.issue;
    let title = issue.title.trim();
    if title.is_empty() {
        return Err(NotifyError::EmptyTitle(issue.number));
    }

    let mut message = String::new();

    if !issue.assignees.is_empty() {
        let handles = issue
            .assignees
            .iter()
            .map(|a| format!("@{a}"))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(message, "Heads-up {handles}!");
        message.push('\n');
    }

    match (reconciled.last_record_date, reconciled.days_since_record) {
        (Some(date), Some(days)) => {
            let long_date = date.format("%B %-d, %Y");
            let _ = writeln!(
                message,
                "The enterprise {title} is due for a healthcheck because its last check was {days} days ago on {long_date}."
            );
        }
        _ => {
            let _ = writeln!(
                message,
                "No healthcheck records were found for the issue titled '{title}'. This may reflect a mismatch between the issue title and the record's identifying key."
            );
        }
    }

    message.push('\n');
    let _ = write!(
        message,
        "If this check should be paused, apply the `{skip_label}` label to {url}.",
        url = issue.url
    );

    Ok(message)
}
