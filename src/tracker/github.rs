use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::models::issues::Issue;
use octocrab::params;
use octocrab::Octocrab;
use serde::Deserialize;
use tracing::debug;

use super::error::TrackerError;
use super::types::CandidateIssue;
use super::IssueTracker;

const EVENTS_PER_PAGE: u32 = 100;

/// Issue tracker backed by the GitHub REST API.
pub struct GitHubTracker {
    client: Octocrab,
    owner: String,
    repo: String,
}

/// Issue timeline entry, reduced to the fields label history needs.
#[derive(Debug, Deserialize)]
struct IssueEvent {
    event: String,
    label: Option<EventLabel>,
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct EventLabel {
    name: String,
}

impl GitHubTracker {
    /// Build a tracker for `repo` ("owner/name"), authenticated when a token
    /// is supplied.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidConfig` for a malformed repo string and
    /// `TrackerError::AuthenticationFailed` when the client cannot be built.
    pub fn new(repo: &str, token: Option<String>) -> Result<Self, TrackerError> {
        let (owner, repo) = Self::parse_repo(repo)?;

        let mut builder = Octocrab::builder();
        if let Some(token) = token {
            builder = builder.personal_token(token);
        }
        let client = builder
            .build()
            .map_err(|e| TrackerError::AuthenticationFailed(e.to_string()))?;

        Ok(Self {
            client,
            owner,
            repo,
        })
    }

    /// Parse "owner/repo" format
    fn parse_repo(repo: &str) -> Result<(String, String), TrackerError> {
        let parts: Vec<&str> = repo.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            return Err(TrackerError::InvalidConfig(format!(
                "Invalid repository: expected 'owner/name', got '{repo}'"
            )));
        }
        Ok((parts[0].to_string(), parts[1].to_string()))
    }

    fn to_candidate(issue: Issue) -> CandidateIssue {
        let state = match issue.state {
            octocrab::models::IssueState::Open => "open",
            octocrab::models::IssueState::Closed => "closed",
            _ => "open", // fallback
        }
        .to_string();

        CandidateIssue {
            number: issue.number,
            title: issue.title,
            assignees: issue.assignees.iter().map(|a| a.login.clone()).collect(),
            labels: issue.labels.iter().map(|l| l.name.clone()).collect(),
            url: issue.html_url.to_string(),
            // Board placement is filtered upstream by the issue list query.
            board_status: None,
            state: Some(state),
        }
    }

    fn backend_error(e: &octocrab::Error) -> TrackerError {
        TrackerError::BackendError(e.to_string())
    }
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    async fn list_candidate_issues(&self) -> Result<Vec<CandidateIssue>, TrackerError> {
        let mut page = self
            .client
            .issues(&self.owner, &self.repo)
            .list()
            .state(params::State::Open)
            .per_page(100)
            .send()
            .await
            .map_err(|e| Self::backend_error(&e))?;

        let mut issues = Vec::new();
        loop {
            for issue in page.take_items() {
                // The issues endpoint also returns pull requests.
                if issue.pull_request.is_some() {
                    continue;
                }
                issues.push(Self::to_candidate(issue));
            }

            match self
                .client
                .get_page::<Issue>(&page.next)
                .await
                .map_err(|e| Self::backend_error(&e))?
            {
                Some(next) => page = next,
                None => break,
            }
        }

        debug!(count = issues.len(), "Listed candidate issues");
        Ok(issues)
    }

    async fn label_applied_date(
        &self,
        issue_number: u64,
        label: &str,
    ) -> Result<Option<DateTime<Utc>>, TrackerError> {
        let mut latest: Option<DateTime<Utc>> = None;
        let mut page_number = 1u32;

        loop {
            let route = format!(
                "/repos/{}/{}/issues/{}/events?per_page={}&page={}",
                self.owner, self.repo, issue_number, EVENTS_PER_PAGE, page_number
            );
            let events: Vec<IssueEvent> = self
                .client
                .get(route, None::<&()>)
                .await
                .map_err(|e| Self::backend_error(&e))?;

            let exhausted = events.len() < EVENTS_PER_PAGE as usize;

            for event in events {
                if event.event != "labeled" {
                    continue;
                }
                let matches = event.label.as_ref().is_some_and(|l| l.name == label);
                if let (true, Some(applied)) = (matches, event.created_at) {
                    if latest.is_none_or(|current| applied > current) {
                        latest = Some(applied);
                    }
                }
            }

            if exhausted {
                break;
            }
            page_number += 1;
        }

        Ok(latest)
    }

    async fn post_comment(&self, issue_number: u64, body: &str) -> Result<(), TrackerError> {
        self.client
            .issues(&self.owner, &self.repo)
            .create_comment(issue_number, body)
            .await
            .map_err(|e| Self::backend_error(&e))?;
        Ok(())
    }

    async fn remove_label(&self, issue_number: u64, label: &str) -> Result<(), TrackerError> {
        self.client
            .issues(&self.owner, &self.repo)
            .remove_label(issue_number, label)
            .await
            .map_err(|e| Self::backend_error(&e))?;
        Ok(())
    }
}
