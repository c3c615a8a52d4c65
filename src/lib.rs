pub mod config;
pub mod logging;
pub mod notifier;
pub mod records;
pub mod run;
pub mod staleness;
pub mod suppression;
pub mod tracker;

// Re-export commonly used types
pub use config::{ConfigError, FileConfig, RunConfig};
pub use notifier::{compose_message, lift_suppression, notify, NotifyError, NotifyOutcome};
pub use records::{load_records, HealthcheckRecord, RecordError};
pub use run::{run, RunError, RunSummary};
pub use staleness::{compute_overdue, derive_match_key, ReconciledIssue};
pub use suppression::{SuppressionState, SUPPRESSION_EXPIRY_DAYS};
pub use tracker::{CandidateIssue, GitHubTracker, IssueTracker, TrackerError};
