//! Operator-facing output.
//!
//! Everything the operator reads (banner, progress lines, summary) goes
//! through [`Reporter`], one flushed line at a time, so it shows up in real
//! time even when the stream is piped. Diagnostics go through `log`
//! instead.

use std::io::{self, Write};

use webling_debtors_api::url::join_ids;
use webling_debtors_api_models::DebtorId;

use crate::batch::digit_width;
use crate::context::PeriodContext;
use crate::eta::Eta;
use crate::retry::BatchOutcome;
use crate::{RunSummary, TitleSelection};

/// Position and size of a batch within the run.
#[derive(Debug, Clone, Copy)]
pub struct BatchProgress<'a> {
    /// Remaining time before this batch started.
    pub eta: Eta,
    /// 1-based batch number.
    pub current: usize,
    /// Number of batches in the run.
    pub total: usize,
    /// Ids in this batch.
    pub ids: &'a [DebtorId],
}

/// Line-oriented writer for operator output.
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    /// Wraps `out`, typically `std::io::stderr()`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    /// Prints the confirmation banner and the abort hint.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn banner(&mut self, context: &PeriodContext, selection: &TitleSelection) -> io::Result<()> {
        let all = match selection {
            TitleSelection::All => "all ",
            TitleSelection::Titles(_) => "",
        };
        self.line(&format!(
            "Deleting {all}open debtors for period \"{}\" in \"{}\"{}",
            context.period_title,
            context.accounting_title,
            title_info(selection),
        ))?;
        self.line("Press Ctrl+C to abort")
    }

    /// Announces the id lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn fetching(&mut self) -> io::Result<()> {
        self.line("Fetching ids of relevant debtors. This will take a while.")
    }

    /// Reports how many debtors matched.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn found(&mut self, count: usize, selection: &TitleSelection) -> io::Result<()> {
        self.line(&format!("Found {count} open debtors{}", title_info(selection)))
    }

    /// Reports that there is nothing to delete.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn nothing_to_do(&mut self) -> io::Result<()> {
        self.line("No debtor blocks to process.")
    }

    /// Prints the progress line of a finished batch.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn batch(&mut self, progress: &BatchProgress<'_>, outcome: BatchOutcome) -> io::Result<()> {
        self.line(&progress_line(progress, outcome))
    }

    /// Prints the final summary.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        if summary.is_success() {
            self.line("All done.")
        } else {
            self.line(&format!(
                "All done, but with {} batches failed to delete.",
                summary.failed_batches
            ))?;
            self.line("Rerun program.")
        }
    }
}

/// ` with title "a" or "b"`, or nothing in `All` mode.
fn title_info(selection: &TitleSelection) -> String {
    match selection {
        TitleSelection::All => String::new(),
        TitleSelection::Titles(titles) => {
            format!(" with title \"{}\"", titles.join("\" or \""))
        }
    }
}

/// Formats `[ETA 0:01:20  02/10 Blocks à 100 debtors]` followed by the
/// outcome annotation.
#[must_use]
pub fn progress_line(progress: &BatchProgress<'_>, outcome: BatchOutcome) -> String {
    let width = digit_width(progress.total);
    let ids = join_ids(progress.ids);

    let mut line = format!(
        "[ETA {}  {:0width$}/{:0width$} Blocks à {} debtors]",
        progress.eta,
        progress.current,
        progress.total,
        progress.ids.len(),
    );

    match outcome {
        BatchOutcome::DryRun => line.push_str(&format!("  DRY RUN  SUCCESS  ids: {ids}")),
        BatchOutcome::Deleted => line.push_str(&format!("  SUCCESS  ids: {ids}")),
        BatchOutcome::Failed => line.push_str(&format!("  ERROR  ids: {ids}")),
    }

    line
}
