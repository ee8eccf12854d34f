//! Command line arguments and their validation.

use std::num::{NonZeroU32, NonZeroU64, NonZeroUsize};
use std::time::Duration;

use clap::Parser;
use webling_debtors_api_models::PeriodId;
use webling_debtors_delete::{DEFAULT_CONFIRM_DELAY, DeleteOptions, TitleSelection};

/// Flag combinations that parse but make no sense together.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UsageError {
    /// `--all` and `--title` were both given.
    #[error("Options --all and --title are mutually exclusive.")]
    AllWithTitles,

    /// Neither `--all` nor `--title` was given.
    #[error("Either --all or --title is required.")]
    NoSelection,
}

#[derive(Debug, Parser)]
#[command(
    name = "webling-debtors-delete",
    about = "Delete open debtors of a given period in Webling",
    after_help = "See https://github.com/grueneschweiz/webling-debtors-delete"
)]
pub struct Cli {
    /// Id of the accounting period to delete debtors from.
    pub period_id: u64,

    /// Batch size for deletion.
    #[arg(long, default_value = "100")]
    pub batch_size: NonZeroUsize,

    /// Title text of the debtors to delete. Required unless --all is set.
    /// Repeat for multiple titles.
    #[arg(long = "title", value_name = "TITLE")]
    pub titles: Vec<String>,

    /// Delete all open debtors. Mutually exclusive with --title.
    #[arg(long)]
    pub all: bool,

    /// Don't apply changes to Webling.
    #[arg(long)]
    pub dry_run: bool,

    /// Delete requests per batch before the batch counts as failed.
    #[arg(long, default_value = "2")]
    pub retry_attempts: NonZeroU32,

    /// Timeout for every single request, in seconds.
    #[arg(long, default_value = "120", value_name = "SECS")]
    pub request_timeout: NonZeroU64,
}

impl Cli {
    /// Resolves `--all` / `--title` into a selection.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError`] unless exactly one of the two was given.
    pub fn title_selection(&self) -> Result<TitleSelection, UsageError> {
        match (self.all, TitleSelection::titles(self.titles.iter().cloned())) {
            (true, Some(_)) => Err(UsageError::AllWithTitles),
            (true, None) => Ok(TitleSelection::All),
            (false, Some(selection)) => Ok(selection),
            (false, None) => Err(UsageError::NoSelection),
        }
    }

    /// Builds the run options.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError`] if the title selection is invalid.
    pub fn delete_options(&self) -> Result<DeleteOptions, UsageError> {
        Ok(DeleteOptions {
            period_id: PeriodId::from(self.period_id),
            selection: self.title_selection()?,
            batch_size: self.batch_size,
            retry_attempts: self.retry_attempts,
            dry_run: self.dry_run,
            confirm_delay: DEFAULT_CONFIRM_DELAY,
        })
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout.get())
    }
}
