//! Deleting one batch with a bounded number of attempts.
//!
//! The whole batch is retried as a single request. Attempts run back to
//! back without a delay, each with the client's own request timeout.

use std::num::NonZeroU32;

use webling_debtors_api::{StatusCode, WeblingApi};
use webling_debtors_api_models::DebtorId;

/// Result of processing one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Dry run, nothing was sent.
    DryRun,
    /// The service answered 204 No Content.
    Deleted,
    /// Every attempt timed out, failed, or returned another status.
    Failed,
}

impl BatchOutcome {
    /// Returns `true` unless the batch failed.
    #[must_use]
    pub const fn is_success(self) -> bool {
        !matches!(self, Self::Failed)
    }
}

/// Deletes `ids` with up to `attempts` requests.
///
/// Only a `204 No Content` response counts as success. Failures never
/// propagate; they are logged and folded into [`BatchOutcome::Failed`].
pub async fn delete_batch(
    api: &dyn WeblingApi,
    ids: &[DebtorId],
    dry_run: bool,
    attempts: NonZeroU32,
) -> BatchOutcome {
    if dry_run {
        return BatchOutcome::DryRun;
    }

    let attempts = attempts.get();
    for attempt in 1..=attempts {
        match api.delete_debtors(ids).await {
            Ok(StatusCode::NO_CONTENT) => return BatchOutcome::Deleted,
            Ok(status) => {
                log::warn!("Delete attempt {attempt}/{attempts} returned HTTP {status}");
            }
            Err(e) => {
                log::warn!("Delete attempt {attempt}/{attempts} failed: {e}");
            }
        }
    }

    BatchOutcome::Failed
}
