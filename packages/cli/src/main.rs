#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Deletes the open debtors of a Webling accounting period in batches.
//!
//! Operator output (banner, progress, summary) is written to stderr line by
//! line. Diagnostics go through `log`; set `RUST_LOG=debug` to see every
//! request URL.
//!
//! # Environment Variables
//!
//! | Variable | Required | Description |
//! |---|---|---|
//! | `API_URL` | Yes | Base URL of the Webling API |
//! | `API_KEY` | Yes | Webling API key |
//! | `RUST_LOG` | No | Log filter, defaults to `warn` |

mod args;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use webling_debtors_api::WeblingApi;
use webling_debtors_api::client::HttpWeblingApi;
use webling_debtors_api::config::ApiConfig;
use webling_debtors_delete::DeleteError;
use webling_debtors_delete::report::Reporter;

use crate::args::{Cli, UsageError};

/// Errors that end the process with a failure exit code.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Delete(#[from] DeleteError),
}

/// Initializes `pretty_env_logger`, honoring `RUST_LOG` and falling back to
/// warnings only.
fn init_logger() {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_env("RUST_LOG")
        .try_init()
        .ok(); // Ignore error if logger was already set
}

/// Validates the flags, then runs the deletion against `api`.
///
/// Flag validation happens before the first request so an invalid
/// combination never reaches the API.
async fn execute<W: Write + Send>(
    cli: &Cli,
    api: &dyn WeblingApi,
    reporter: &mut Reporter<W>,
) -> Result<(), CliError> {
    let options = cli.delete_options()?;
    let summary = webling_debtors_delete::run::run(api, &options, reporter).await?;

    if !summary.is_success() {
        log::warn!(
            "{} of {} batches failed",
            summary.failed_batches,
            summary.batch_count
        );
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logger();
    let cli = Cli::parse();

    let config = match ApiConfig::from_env() {
        Ok(config) => config.with_request_timeout(cli.request_timeout()),
        Err(e) => {
            log::debug!("{e}");
            eprintln!("API_URL and API_KEY environment variables are required");
            return ExitCode::FAILURE;
        }
    };

    let api = match HttpWeblingApi::new(&config) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut reporter = Reporter::new(std::io::stderr());
    match execute(&cli, &api, &mut reporter).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Delete(e)) if e.is_service_unavailable() => {
            log::debug!("{e:?}");
            eprintln!("{e}");
            eprintln!("The service is unavailable. Try again later.");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::debug!("{e:?}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
