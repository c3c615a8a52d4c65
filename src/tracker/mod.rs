mod auth;
mod error;
mod github;
mod types;

pub use auth::resolve_token;
pub use error::TrackerError;
pub use github::GitHubTracker;
pub use types::CandidateIssue;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Narrow interface to the issue-tracking backend.
///
/// The reconciliation core only ever talks to the tracker through this trait,
/// so tests can substitute a recording fake and the backend can change without
/// touching the matching or suppression logic.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// List open issues eligible for staleness evaluation.
    ///
    /// Implementations page through the backend until it reports no more
    /// results, and normalize labels to plain strings at this boundary.
    async fn list_candidate_issues(&self) -> Result<Vec<CandidateIssue>, TrackerError>;

    /// When `label` was most recently applied to the issue, from the issue's
    /// event history. `None` if the label was never applied.
    async fn label_applied_date(
        &self,
        issue_number: u64,
        label: &str,
    ) -> Result<Option<DateTime<Utc>>, TrackerError>;

    /// Post a comment on the issue.
    async fn post_comment(&self, issue_number: u64, body: &str) -> Result<(), TrackerError>;

    /// Remove a label from the issue.
    async fn remove_label(&self, issue_number: u64, label: &str) -> Result<(), TrackerError>;
}
