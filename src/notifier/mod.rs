mod message;

pub use message::compose_message;

use crate::staleness::ReconciledIssue;
use crate::tracker::IssueTracker;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Issue #{0} has an empty title")]
    EmptyTitle(u64),
}

/// Result of one side-effecting notifier operation.
///
/// Failures are contained here rather than propagated; a bad issue must not
/// abort the rest of the pass.
#[derive(Debug, Clone)]
pub struct NotifyOutcome {
    pub ok: bool,
    pub message: String,
}

impl NotifyOutcome {
    fn success(message: String) -> Self {
        Self { ok: true, message }
    }

    fn failure(message: String) -> Self {
        Self { ok: false, message }
    }
}

/// Compose and post the overdue-notification comment for `reconciled`.
///
/// Never returns an error: composition and tracker failures come back as
/// `ok=false` with the underlying error text. In dry-run mode the tracker is
/// not touched and the outcome reports what would have been posted.
pub async fn notify(
    tracker: &dyn IssueTracker,
    reconciled: &ReconciledIssue,
    skip_label: &str,
    dry_run: bool,
) -> NotifyOutcome {
    let number = reconciled.issue.number;

    let body = match compose_message(reconciled, skip_label) {
        Ok(body) => body,
        Err(e) => return NotifyOutcome::failure(format!("issue #{number}: {e}")),
    };

    if dry_run {
        debug!(issue = number, "Dry-run: skipping comment");
        return NotifyOutcome::success(format!("[DRY-RUN] would comment on issue #{number}: {body}"));
    }

    match tracker.post_comment(number, &body).await {
        Ok(()) => NotifyOutcome::success(format!("commented on issue #{number}")),
        Err(e) => NotifyOutcome::failure(format!("failed to comment on issue #{number}: {e}")),
    }
}

/// Remove an expired suppression label from the issue.
///
/// Same failure-containment contract as [`notify`].
pub async fn lift_suppression(
    tracker: &dyn IssueTracker,
    reconciled: &ReconciledIssue,
    label: &str,
    dry_run: bool,
) -> NotifyOutcome {
    let number = reconciled.issue.number;

    if dry_run {
        debug!(issue = number, label, "Dry-run: skipping label removal");
        return NotifyOutcome::success(format!(
            "[DRY-RUN] would remove label '{label}' from issue #{number}"
        ));
    }

    match tracker.remove_label(number, label).await {
        Ok(()) => NotifyOutcome::success(format!("removed label '{label}' from issue #{number}")),
        Err(e) => NotifyOutcome::failure(format!(
            "failed to remove label '{label}' from issue #{number}: {e}"
        )),
    }
}
