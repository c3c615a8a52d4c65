#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use chrono::{Duration, TimeZone, Utc};
use common::{candidate, create_test_dir, write_record, MockTracker};
use healthwatch::config::RunConfig;
use healthwatch::run;
use std::path::Path;

const SKIP_LABEL: &str = "skip-healthcheck";

fn test_config(records_dir: &Path, dry_run: bool) -> RunConfig {
    RunConfig {
        records_dir: records_dir.to_path_buf(),
        repo: "acme/healthchecks".to_string(),
        max_staleness_days: 30,
        suppression_label: SKIP_LABEL.to_string(),
        dry_run,
        rate_pause_seconds: 0,
    }
}

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).single().expect("valid timestamp")
}

#[tokio::test]
async fn test_stale_issue_gets_notified() {
    let now = fixed_now();
    let dir = create_test_dir();
    write_record(dir.path(), "beta.md", "Beta", 40, now);

    let tracker = MockTracker::with_issues(vec![candidate(456, "Beta - 456", &[])]);
    let summary = run(&test_config(dir.path(), false), &tracker, now)
        .await
        .expect("run should succeed");

    assert_eq!(summary.overdue, 1);
    assert_eq!(summary.notified, 1);
    assert_eq!(summary.failures, 0);

    let comments = tracker.comments();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].0, 456);
    assert!(comments[0].1.contains("due for a healthcheck"));
    assert!(comments[0].1.contains("40 days ago"));
    assert!(comments[0].1.contains(SKIP_LABEL));
}

#[tokio::test]
async fn test_fresh_issue_is_left_alone() {
    let now = fixed_now();
    let dir = create_test_dir();
    write_record(dir.path(), "gamma.md", "Gamma", 10, now);

    let tracker = MockTracker::with_issues(vec![candidate(789, "Gamma - 789", &[])]);
    let summary = run(&test_config(dir.path(), false), &tracker, now)
        .await
        .expect("run should succeed");

    assert_eq!(summary.overdue, 0);
    assert_eq!(summary.notified, 0);
    assert!(tracker.comments().is_empty());
}

#[tokio::test]
async fn test_unmatched_issue_gets_mismatch_notice() {
    let now = fixed_now();
    let dir = create_test_dir();
    write_record(dir.path(), "other.md", "Other", 5, now);

    let tracker = MockTracker::with_issues(vec![candidate(1, "Orphan - 1", &[])]);
    let summary = run(&test_config(dir.path(), false), &tracker, now)
        .await
        .expect("run should succeed");

    assert_eq!(summary.overdue, 1);
    assert_eq!(summary.notified, 1);

    let comments = tracker.comments();
    assert!(comments[0].1.contains("No healthcheck records were found"));
    assert!(comments[0].1.contains("Orphan - 1"));
}

#[tokio::test]
async fn test_title_case_does_not_break_matching() {
    let now = fixed_now();
    let dir = create_test_dir();
    write_record(dir.path(), "acme.md", "ACME Holdings", 5, now);

    let tracker = MockTracker::with_issues(vec![candidate(2, "Acme Holdings - 12", &[])]);
    let summary = run(&test_config(dir.path(), false), &tracker, now)
        .await
        .expect("run should succeed");

    assert_eq!(summary.overdue, 0, "keys are compared lower-cased on both sides");
}

#[tokio::test]
async fn test_dry_run_never_mutates() {
    let now = fixed_now();
    let dir = create_test_dir();

    let mut tracker = MockTracker::with_issues(vec![candidate(3, "Orphan - 3", &[SKIP_LABEL])]);
    tracker
        .label_applied
        .insert(3, now - Duration::days(45));

    let summary = run(&test_config(dir.path(), true), &tracker, now)
        .await
        .expect("run should succeed");

    // Expired suppression plus a notification, both simulated.
    assert_eq!(summary.suppressions_lifted, 1);
    assert_eq!(summary.notified, 1);
    assert!(tracker.comments().is_empty());
    assert!(tracker.removed_labels().is_empty());
}

#[tokio::test]
async fn test_dry_run_notify_reports_without_posting() {
    let now = fixed_now();
    let tracker = MockTracker::with_issues(vec![]);
    let overdue = healthwatch::compute_overdue(&[], &[candidate(12, "Acme - 12", &[])], 30, now);

    let outcome = healthwatch::notify(&tracker, &overdue[0], SKIP_LABEL, true).await;

    assert!(outcome.ok);
    assert!(outcome.message.starts_with("[DRY-RUN]"));
    assert!(tracker.comments().is_empty());
}

#[tokio::test]
async fn test_active_suppression_skips_notification() {
    let now = fixed_now();
    let dir = create_test_dir();

    let mut tracker = MockTracker::with_issues(vec![candidate(4, "Orphan - 4", &[SKIP_LABEL])]);
    tracker.label_applied.insert(4, now - Duration::days(10));

    let summary = run(&test_config(dir.path(), false), &tracker, now)
        .await
        .expect("run should succeed");

    assert_eq!(summary.overdue, 1);
    assert_eq!(summary.suppressed, 1);
    assert_eq!(summary.notified, 0);
    assert!(tracker.comments().is_empty());
    assert!(tracker.removed_labels().is_empty());
}

#[tokio::test]
async fn test_expired_suppression_is_lifted_and_notified_same_pass() {
    let now = fixed_now();
    let dir = create_test_dir();

    let mut tracker = MockTracker::with_issues(vec![candidate(5, "Orphan - 5", &[SKIP_LABEL])]);
    tracker.label_applied.insert(5, now - Duration::days(31));

    let summary = run(&test_config(dir.path(), false), &tracker, now)
        .await
        .expect("run should succeed");

    assert_eq!(summary.suppressions_lifted, 1);
    assert_eq!(summary.notified, 1);
    assert_eq!(tracker.removed_labels(), vec![(5, SKIP_LABEL.to_string())]);
    assert_eq!(tracker.comments().len(), 1);
}

#[tokio::test]
async fn test_label_without_applied_event_is_not_suppressed() {
    let now = fixed_now();
    let dir = create_test_dir();

    // Carries the label but the tracker has no "labeled" event on record.
    let tracker = MockTracker::with_issues(vec![candidate(6, "Orphan - 6", &[SKIP_LABEL])]);

    let summary = run(&test_config(dir.path(), false), &tracker, now)
        .await
        .expect("run should succeed");

    assert_eq!(summary.suppressed, 0);
    assert_eq!(summary.suppressions_lifted, 0);
    assert_eq!(summary.notified, 1);
    assert!(tracker.removed_labels().is_empty());
}

#[tokio::test]
async fn test_per_issue_failure_does_not_abort_the_pass() {
    let now = fixed_now();
    let dir = create_test_dir();

    let mut tracker = MockTracker::with_issues(vec![
        candidate(7, "Orphan - 7", &[]),
        candidate(8, "Orphan - 8", &[]),
        candidate(9, "Orphan - 9", &[]),
    ]);
    tracker.fail_comments_for = vec![8];

    let summary = run(&test_config(dir.path(), false), &tracker, now)
        .await
        .expect("run should succeed");

    assert_eq!(summary.overdue, 3);
    assert_eq!(summary.notified, 2);
    assert_eq!(summary.failures, 1);

    let commented: Vec<u64> = tracker.comments().iter().map(|(n, _)| *n).collect();
    assert_eq!(commented, vec![7, 9]);
}

#[tokio::test]
async fn test_missing_record_store_is_fatal() {
    let now = fixed_now();
    let dir = create_test_dir();
    let config = test_config(&dir.path().join("does-not-exist"), false);

    let tracker = MockTracker::with_issues(vec![candidate(10, "Orphan - 10", &[])]);
    let result = run(&config, &tracker, now).await;

    assert!(result.is_err());
    assert!(tracker.comments().is_empty());
}

#[tokio::test]
async fn test_malformed_record_is_rejected_not_fatal() {
    let now = fixed_now();
    let dir = create_test_dir();
    write_record(dir.path(), "good.md", "Beta", 40, now);
    std::fs::write(
        dir.path().join("bad.md"),
        "---\nenterprise: Beta\ndate: \"soonish\"\n---\n",
    )
    .expect("write");

    let tracker = MockTracker::with_issues(vec![candidate(11, "Beta - 11", &[])]);
    let summary = run(&test_config(dir.path(), false), &tracker, now)
        .await
        .expect("bad record must not abort the run");

    // Only the good 40-day-old record counts, so the issue is overdue.
    assert_eq!(summary.overdue, 1);
    assert_eq!(summary.notified, 1);
}
