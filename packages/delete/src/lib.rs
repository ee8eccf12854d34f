#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Batch deletion of open debtors for a single accounting period.
//!
//! The run is a straight line: resolve the period and accounting titles
//! for the confirmation banner, wait out the abort window, fetch the ids
//! of matching open debtors, split them into batches, and delete batch by
//! batch. A failed batch is retried a bounded number of times and then
//! recorded, never escalated. See [`run::run`].

pub mod batch;
pub mod context;
pub mod eta;
pub mod report;
pub mod retry;
pub mod run;

#[cfg(test)]
pub(crate) mod test_support;

use std::num::{NonZeroU32, NonZeroUsize};
use std::time::Duration;

use webling_debtors_api::ApiError;
use webling_debtors_api_models::PeriodId;

/// Default number of ids per delete request.
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(100).unwrap();

/// Default number of delete attempts per batch (one retry).
pub const DEFAULT_RETRY_ATTEMPTS: NonZeroU32 = NonZeroU32::new(2).unwrap();

/// How long the operator has to abort after the banner is printed.
pub const DEFAULT_CONFIRM_DELAY: Duration = Duration::from_secs(10);

/// Errors that end a run.
#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    /// A read request against the remote API failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Writing operator output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeleteError {
    /// Returns `true` if the service reported 503 while reading.
    #[must_use]
    pub const fn is_service_unavailable(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_service_unavailable())
    }
}

/// Which open debtors of the period to delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleSelection {
    /// Every open debtor, no title filter.
    All,
    /// Only debtors whose title is one of these. Never empty.
    Titles(Vec<String>),
}

impl TitleSelection {
    /// Builds a title selection, dropping duplicates while keeping the
    /// first-seen order. Returns `None` for an empty list.
    #[must_use]
    pub fn titles<I, S>(titles: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for title in titles {
            let title = title.into();
            if !unique.contains(&title) {
                unique.push(title);
            }
        }

        if unique.is_empty() {
            None
        } else {
            Some(Self::Titles(unique))
        }
    }

    /// Titles for the filter; empty in `All` mode.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::All => &[],
            Self::Titles(titles) => titles,
        }
    }
}

/// Parameters for one deletion run.
#[derive(Debug, Clone)]
pub struct DeleteOptions {
    /// Period whose open debtors are deleted.
    pub period_id: PeriodId,
    /// Which debtors of the period to select.
    pub selection: TitleSelection,
    /// Maximum number of ids per delete request.
    pub batch_size: NonZeroUsize,
    /// Total delete attempts per batch.
    pub retry_attempts: NonZeroU32,
    /// Simulate without sending delete requests.
    pub dry_run: bool,
    /// Abort window between the banner and the first destructive call.
    pub confirm_delay: Duration,
}

impl DeleteOptions {
    /// Options with the default batch size, retry budget and confirmation
    /// delay.
    #[must_use]
    pub const fn new(period_id: PeriodId, selection: TitleSelection) -> Self {
        Self {
            period_id,
            selection,
            batch_size: DEFAULT_BATCH_SIZE,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            dry_run: false,
            confirm_delay: DEFAULT_CONFIRM_DELAY,
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of matching open debtors.
    pub debtor_count: usize,
    /// Number of batches processed.
    pub batch_count: usize,
    /// Number of batches that failed after all attempts.
    pub failed_batches: usize,
}

impl RunSummary {
    /// Returns `true` if no batch failed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed_batches == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_deduplicate_in_order() {
        let selection = TitleSelection::titles(["Donation", "Membership", "Donation"]).unwrap();
        assert_eq!(
            selection,
            TitleSelection::Titles(vec!["Donation".to_string(), "Membership".to_string()])
        );
    }

    #[test]
    fn no_titles_is_no_selection() {
        assert!(TitleSelection::titles(Vec::<String>::new()).is_none());
    }

    #[test]
    fn all_mode_has_no_titles() {
        assert!(TitleSelection::All.as_slice().is_empty());
    }
}
