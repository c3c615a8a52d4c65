//! Common test utilities

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use healthwatch::tracker::{CandidateIssue, IssueTracker, TrackerError};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write one healthcheck record file with YAML frontmatter
pub fn write_record(dir: &Path, name: &str, enterprise: &str, recorded_days_ago: i64, now: DateTime<Utc>) {
    let date = (now - Duration::days(recorded_days_ago)).date_naive();
    let content = format!(
        "---\nenterprise: {enterprise}\ndate: \"{date}\"\n---\n\n# Healthcheck notes\n",
        date = date.format("%Y-%m-%d")
    );
    std::fs::write(dir.join(name), content).expect("Failed to write record");
}

/// Build a candidate issue with sensible defaults
pub fn candidate(number: u64, title: &str, labels: &[&str]) -> CandidateIssue {
    CandidateIssue {
        number,
        title: title.to_string(),
        assignees: vec![],
        labels: labels.iter().map(ToString::to_string).collect(),
        url: format!("https://example.test/issues/{number}"),
        board_status: None,
        state: Some("open".to_string()),
    }
}

/// In-memory tracker that records every mutation it is asked to perform.
#[derive(Default)]
pub struct MockTracker {
    pub issues: Vec<CandidateIssue>,
    /// Most recent "labeled" event per issue number.
    pub label_applied: HashMap<u64, DateTime<Utc>>,
    pub comments: Mutex<Vec<(u64, String)>>,
    pub removed_labels: Mutex<Vec<(u64, String)>>,
    /// Issue numbers whose comment mutation should fail.
    pub fail_comments_for: Vec<u64>,
}

impl MockTracker {
    pub fn with_issues(issues: Vec<CandidateIssue>) -> Self {
        Self {
            issues,
            ..Self::default()
        }
    }

    pub fn comments(&self) -> Vec<(u64, String)> {
        self.comments.lock().expect("comments lock").clone()
    }

    pub fn removed_labels(&self) -> Vec<(u64, String)> {
        self.removed_labels.lock().expect("removed_labels lock").clone()
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    async fn list_candidate_issues(&self) -> Result<Vec<CandidateIssue>, TrackerError> {
        Ok(self.issues.clone())
    }

    async fn label_applied_date(
        &self,
        issue_number: u64,
        _label: &str,
    ) -> Result<Option<DateTime<Utc>>, TrackerError> {
        Ok(self.label_applied.get(&issue_number).copied())
    }

    async fn post_comment(&self, issue_number: u64, body: &str) -> Result<(), TrackerError> {
        if self.fail_comments_for.contains(&issue_number) {
            return Err(TrackerError::BackendError(format!(
                "simulated comment failure for issue #{issue_number}"
            )));
        }
        self.comments
            .lock()
            .expect("comments lock")
            .push((issue_number, body.to_string()));
        Ok(())
    }

    async fn remove_label(&self, issue_number: u64, label: &str) -> Result<(), TrackerError> {
        self.removed_labels
            .lock()
            .expect("removed_labels lock")
            .push((issue_number, label.to_string()));
        Ok(())
    }
}
