//! Inactive user sweep
//!
//! One run fetches the user directory, selects inactive users, reports them,
//! and (unless in dry-run) disables them in batches.

pub mod batch;
pub mod classifier;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::UserApi;
use crate::config::SweepConfig;
use crate::error::Result;

pub use batch::{BatchDispatcher, BatchSize, DispatchSummary};
pub use classifier::{InactivityPolicy, InactivityRecord};

/// Number of inactive users listed in the preview
pub const PREVIEW_LIMIT: usize = 5;

/// Progress sink for a sweep run
pub trait SweepReporter {
    /// Inactive users were selected
    fn preview(&self, preview: &SweepPreview<'_>);
    /// Dry-run mode: nothing will be disabled
    fn dry_run(&self);
    /// A bulk request of `size` users is about to be sent
    fn batch_started(&self, size: usize);
    /// Every batch was accepted
    fn completed(&self, summary: &DispatchSummary);
}

/// Summary shown before any user is disabled
#[derive(Debug, Clone, Copy)]
pub struct SweepPreview<'a> {
    pub total_users: usize,
    pub threshold_days: u32,
    pub records: &'a [InactivityRecord],
}

impl<'a> SweepPreview<'a> {
    /// The first few inactive users
    pub fn sample(&self) -> &'a [InactivityRecord] {
        &self.records[..self.records.len().min(PREVIEW_LIMIT)]
    }

    /// Inactive users not shown in the sample
    pub fn remaining(&self) -> usize {
        self.records.len().saturating_sub(PREVIEW_LIMIT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Fetching,
    Classifying,
    Reporting,
    Dispatching,
    DryRunDone,
    Completed,
}

/// Result of a sweep run
#[derive(Debug, Clone, Serialize)]
pub struct SweepOutcome {
    pub total_users: usize,
    pub threshold_days: u32,
    pub cutoff: DateTime<Utc>,
    pub dry_run: bool,
    pub inactive: Vec<InactivityRecord>,
    /// `None` in dry-run
    pub dispatch: Option<DispatchSummary>,
}

/// Run one sweep against `client`.
///
/// The client must already hold an access token. Errors from fetching or
/// from any non-partial batch failure end the run.
pub async fn run<C, R>(
    client: &C,
    config: &SweepConfig,
    now: DateTime<Utc>,
    reporter: &R,
) -> Result<SweepOutcome>
where
    C: UserApi + ?Sized,
    R: SweepReporter + ?Sized,
{
    let mut state = RunState::Fetching;
    log::debug!("Sweep state: {:?}", state);
    let users = client.list_users().await?;

    state = RunState::Classifying;
    log::debug!("Sweep state: {:?} ({} users)", state, users.len());
    let policy = InactivityPolicy::new(
        now,
        config.days_inactive.value,
        config.org_filter().map(str::to_string),
    );
    let inactive = policy.inactive_records(&users);

    state = RunState::Reporting;
    log::debug!("Sweep state: {:?} ({} inactive)", state, inactive.len());
    reporter.preview(&SweepPreview {
        total_users: users.len(),
        threshold_days: policy.threshold_days(),
        records: &inactive,
    });

    let dispatch = if config.dry_run {
        reporter.dry_run();
        state = RunState::DryRunDone;
        None
    } else {
        state = RunState::Dispatching;
        log::debug!("Sweep state: {:?}", state);
        let summary = BatchDispatcher::new(client)
            .dispatch_all(&inactive, config.batch_size.value, reporter)
            .await?;
        reporter.completed(&summary);
        state = RunState::Completed;
        Some(summary)
    };
    log::debug!("Sweep state: {:?}", state);

    Ok(SweepOutcome {
        total_users: users.len(),
        threshold_days: policy.threshold_days(),
        cutoff: policy.cutoff(),
        dry_run: config.dry_run,
        inactive,
        dispatch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockPortClient;
    use crate::client::mock::MockBulkResponse;
    use crate::client::models::{OrgMembership, User};
    use crate::config::{Resolved, Source};
    use chrono::TimeZone;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Events(Mutex<Vec<String>>);

    impl Events {
        fn push(&self, event: String) {
            self.0.lock().unwrap().push(event);
        }

        fn take(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    impl SweepReporter for Events {
        fn preview(&self, preview: &SweepPreview<'_>) {
            self.push(format!(
                "preview {} {} {}",
                preview.total_users,
                preview.records.len(),
                preview.remaining()
            ));
        }
        fn dry_run(&self) {
            self.push("dry-run".to_string());
        }
        fn batch_started(&self, size: usize) {
            self.push(format!("batch {}", size));
        }
        fn completed(&self, summary: &DispatchSummary) {
            self.push(format!("completed {}", summary.disabled));
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn config(dry_run: bool) -> SweepConfig {
        SweepConfig {
            days_inactive: Resolved::new(45, Source::Default),
            org_id: None,
            batch_size: Resolved::new(BatchSize::default(), Source::Default),
            dry_run,
        }
    }

    fn user(id: &str, status: &str, login: Option<&str>) -> User {
        User {
            id: Some(id.to_string()),
            email: Some(format!("{}@example.com", id)),
            status: Some(status.to_string()),
            org_members: login
                .map(|l| {
                    vec![OrgMembership {
                        org_id: Some("org-1".to_string()),
                        last_login_at: Some(l.to_string()),
                    }]
                })
                .unwrap_or_default(),
        }
    }

    fn scenario_users() -> Vec<User> {
        vec![
            user("A", "Active", Some("2024-03-01T00:00:00Z")),
            user("B", "Active", Some("2024-05-20T00:00:00Z")),
            user("C", "Active", None),
            user("D", "Disabled", Some("2024-03-01T00:00:00Z")),
        ]
    }

    #[test]
    fn test_preview_sample_and_remaining() {
        let recs: Vec<InactivityRecord> = (0..8)
            .map(|i| InactivityRecord {
                id: i.to_string(),
                email: None,
                last_login: None,
            })
            .collect();
        let preview = SweepPreview {
            total_users: 10,
            threshold_days: 45,
            records: &recs,
        };
        assert_eq!(preview.sample().len(), PREVIEW_LIMIT);
        assert_eq!(preview.remaining(), 3);

        let few = SweepPreview {
            records: &recs[..2],
            ..preview
        };
        assert_eq!(few.sample().len(), 2);
        assert_eq!(few.remaining(), 0);
    }

    #[tokio::test]
    async fn test_run_disables_inactive_users() {
        let mock = MockPortClient::new().with_users(scenario_users()).await;
        let events = Events::default();

        let outcome = run(&mock, &config(false), now(), &events).await.unwrap();

        let ids: Vec<&str> = outcome.inactive.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C"]);
        assert_eq!(outcome.total_users, 4);
        assert_eq!(outcome.dispatch.as_ref().unwrap().disabled, 2);

        let sent = mock.bulk_requests().await;
        assert_eq!(sent.len(), 1);
        let sent_ids: Vec<&str> = sent[0].iter().map(|e| e.identifier.as_str()).collect();
        assert_eq!(sent_ids, vec!["A", "C"]);

        assert_eq!(
            events.take(),
            vec!["preview 4 2 0", "batch 2", "completed 2"]
        );
    }

    #[tokio::test]
    async fn test_run_dry_run_sends_nothing() {
        let mock = MockPortClient::new().with_users(scenario_users()).await;
        let events = Events::default();

        let outcome = run(&mock, &config(true), now(), &events).await.unwrap();

        assert!(outcome.dry_run);
        assert!(outcome.dispatch.is_none());
        assert_eq!(outcome.inactive.len(), 2);
        assert_eq!(mock.call_counts().await.bulk_upsert, 0);
        assert_eq!(events.take(), vec!["preview 4 2 0", "dry-run"]);
    }

    #[tokio::test]
    async fn test_run_with_no_inactive_users_still_completes() {
        let mock = MockPortClient::new()
            .with_users(vec![user("B", "Active", Some("2024-05-20T00:00:00Z"))])
            .await;
        let events = Events::default();

        let outcome = run(&mock, &config(false), now(), &events).await.unwrap();

        assert!(outcome.inactive.is_empty());
        assert_eq!(mock.call_counts().await.bulk_upsert, 0);
        assert_eq!(events.take(), vec!["preview 1 0 0", "completed 0"]);
    }

    #[tokio::test]
    async fn test_run_aborts_on_failed_batch() {
        let users: Vec<User> = (0..25).map(|i| user(&format!("u{}", i), "Active", None)).collect();
        let mock = MockPortClient::new()
            .with_users(users)
            .await
            .with_bulk_responses(vec![MockBulkResponse::Status(500)])
            .await;
        let events = Events::default();

        let result = run(&mock, &config(false), now(), &events).await;

        assert!(result.is_err());
        assert_eq!(mock.call_counts().await.bulk_upsert, 1);
        assert_eq!(events.take(), vec!["preview 25 25 20", "batch 20"]);
    }

    #[tokio::test]
    async fn test_run_fetch_failure_reports_nothing() {
        let mock = MockPortClient::new()
            .with_error(crate::error::ApiError::FetchFailed {
                status: 500,
                body: "boom".to_string(),
            })
            .await;
        let events = Events::default();

        let err = run(&mock, &config(false), now(), &events).await.unwrap_err();

        assert!(err.to_string().contains("Failed to fetch users (500)"));
        assert!(events.take().is_empty());
    }

    #[tokio::test]
    async fn test_run_respects_org_filter() {
        let mock = MockPortClient::new().with_users(scenario_users()).await;
        let events = Events::default();
        let mut cfg = config(true);
        cfg.org_id = Some(Resolved::new("org-2".to_string(), Source::Flag));

        let outcome = run(&mock, &cfg, now(), &events).await.unwrap();

        // No membership matches org-2, so every non-disabled user is inactive
        let ids: Vec<&str> = outcome.inactive.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }
}
