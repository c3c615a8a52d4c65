/// An open issue eligible for staleness evaluation.
///
/// Labels are normalized to plain strings at the tracker boundary; the core
/// never sees backend-specific label shapes.
#[derive(Debug, Clone)]
pub struct CandidateIssue {
    /// Issue number within the repository.
    pub number: u64,
    pub title: String,
    /// Assignee handles, without the `@` prefix.
    pub assignees: Vec<String>,
    pub labels: Vec<String>,
    /// URL to the issue in the tracker.
    pub url: String,
    /// Project board column, when the backend exposes one.
    pub board_status: Option<String>,
    /// Tracker state (e.g. "open").
    pub state: Option<String>,
}

impl CandidateIssue {
    /// Whether the issue currently carries `label`.
    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}
