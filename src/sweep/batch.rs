//! Batched deactivation
//!
//! Inactive users are sent to the bulk entity endpoint in consecutive chunks.
//! A partial success (207) is logged and the run continues; any other
//! failure aborts before the next batch is sent.

use std::num::NonZeroUsize;

use serde::Serialize;

use super::classifier::InactivityRecord;
use super::SweepReporter;
use crate::client::UserApi;
use crate::client::models::{BulkOutcome, EntityUpsert, USER_BLUEPRINT};
use crate::error::{ConfigError, Result};

/// Largest batch the bulk endpoint accepts
pub const MAX_BATCH_SIZE: usize = 20;

/// Number of users per bulk request, always within `1..=MAX_BATCH_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSize(NonZeroUsize);

impl BatchSize {
    pub fn new(size: usize) -> std::result::Result<Self, ConfigError> {
        NonZeroUsize::new(size)
            .filter(|n| n.get() <= MAX_BATCH_SIZE)
            .map(BatchSize)
            .ok_or_else(|| ConfigError::Invalid {
                name: "batch size",
                reason: format!("must be between 1 and {}, got {}", MAX_BATCH_SIZE, size),
            })
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self(NonZeroUsize::MIN.saturating_add(MAX_BATCH_SIZE - 1))
    }
}

impl std::fmt::Display for BatchSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Split records into consecutive batches, preserving order.
///
/// Every batch is full except possibly the last.
pub fn chunk(records: &[InactivityRecord], size: BatchSize) -> std::slice::Chunks<'_, InactivityRecord> {
    records.chunks(size.get())
}

/// Totals of one dispatch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    /// Bulk requests accepted (200 or 207)
    pub batches: usize,
    /// Users sent in accepted requests
    pub disabled: usize,
    /// Requests answered with 207
    pub partial_batches: usize,
}

/// Sends disable requests for inactive users
pub struct BatchDispatcher<'a, C: UserApi + ?Sized> {
    client: &'a C,
}

impl<'a, C: UserApi + ?Sized> BatchDispatcher<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Disable one batch of users.
    pub async fn dispatch(&self, batch: &[InactivityRecord]) -> Result<BulkOutcome> {
        let entities: Vec<EntityUpsert> = batch
            .iter()
            .map(|r| EntityUpsert::disable_user(&r.id, r.email.as_deref()))
            .collect();

        let outcome = self.client.bulk_upsert(USER_BLUEPRINT, &entities).await?;
        if let BulkOutcome::Partial { detail } = &outcome {
            log::warn!("Partial success (207): {}", detail);
        }
        Ok(outcome)
    }

    /// Disable every record, one batch at a time, in order.
    ///
    /// Stops at the first batch that is neither 200 nor 207.
    pub async fn dispatch_all<R: SweepReporter + ?Sized>(
        &self,
        records: &[InactivityRecord],
        size: BatchSize,
        reporter: &R,
    ) -> Result<DispatchSummary> {
        let mut summary = DispatchSummary::default();

        for (index, batch) in chunk(records, size).enumerate() {
            reporter.batch_started(batch.len());
            log::debug!("Dispatching batch {} ({} users)", index + 1, batch.len());

            match self.dispatch(batch).await {
                Ok(outcome) => {
                    summary.batches += 1;
                    summary.disabled += batch.len();
                    if matches!(outcome, BulkOutcome::Partial { .. }) {
                        summary.partial_batches += 1;
                    }
                }
                Err(e) => {
                    log::debug!(
                        "Batch {} failed after {} accepted batches",
                        index + 1,
                        summary.batches
                    );
                    return Err(e);
                }
            }
        }

        Ok(summary)
    }
}
