//! The deletion run from banner to summary.

use std::io::Write;
use std::time::Instant;

use webling_debtors_api::{Filter, WeblingApi};

use crate::batch::partition;
use crate::eta::Eta;
use crate::report::{BatchProgress, Reporter};
use crate::retry::delete_batch;
use crate::{DeleteError, DeleteOptions, RunSummary, context};

/// Deletes the open debtors selected by `options`.
///
/// Phases, in order: resolve the period context and print the banner,
/// wait `confirm_delay` so the operator can abort, fetch the matching ids,
/// partition them, then delete and report batch by batch. Read failures
/// end the run; batch failures are counted in the returned summary.
///
/// # Errors
///
/// Returns [`DeleteError::Api`] if the period context or the id lookup
/// fails, and [`DeleteError::Io`] if operator output cannot be written.
pub async fn run<W: Write + Send>(
    api: &dyn WeblingApi,
    options: &DeleteOptions,
    reporter: &mut Reporter<W>,
) -> Result<RunSummary, DeleteError> {
    let context = context::resolve(api, options.period_id).await?;
    reporter.banner(&context, &options.selection)?;

    if !options.confirm_delay.is_zero() {
        tokio::time::sleep(options.confirm_delay).await;
    }

    reporter.fetching()?;
    let filter = Filter::open_debtors(options.period_id, options.selection.as_slice());
    let ids = api.fetch_debtor_ids(&filter).await?;
    reporter.found(ids.len(), &options.selection)?;

    let batches = partition(&ids, options.batch_size);
    let mut summary = RunSummary {
        debtor_count: ids.len(),
        batch_count: batches.len(),
        failed_batches: 0,
    };

    if batches.is_empty() {
        reporter.nothing_to_do()?;
        return Ok(summary);
    }

    log::info!(
        "Processing {} debtors in {} batches (dry run: {})",
        summary.debtor_count,
        summary.batch_count,
        options.dry_run
    );

    let started = Instant::now();
    for (index, batch) in batches.iter().enumerate() {
        let eta = Eta::since(started, index, batches.len());
        let outcome = delete_batch(api, batch, options.dry_run, options.retry_attempts).await;

        if !outcome.is_success() {
            summary.failed_batches += 1;
        }

        let progress = BatchProgress {
            eta,
            current: index + 1,
            total: batches.len(),
            ids: batch,
        };
        reporter.batch(&progress, outcome)?;
    }

    reporter.summary(&summary)?;
    Ok(summary)
}
