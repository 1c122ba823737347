//! `hpsync sync` – fetch every listed homepage and write the changed ones.

use anyhow::Result;
use hpsync_core::config::SyncSettings;
use hpsync_core::fetch::CurlFetcher;
use hpsync_core::run::{self, RunError};
use std::process::ExitCode;

/// Exit status is 1 only for an empty list; per-homepage failures are reported in the log.
pub fn run_sync(settings: &SyncSettings) -> Result<ExitCode> {
    let fetcher = CurlFetcher::from_settings(settings);
    match run::run(settings, &fetcher) {
        Ok(summary) => {
            println!(
                "{} homepage(s): {} updated, {} unchanged, {} skipped, {} failed",
                summary.total, summary.updated, summary.unchanged, summary.skipped, summary.failed
            );
            Ok(ExitCode::SUCCESS)
        }
        // Already logged as a warning by the driver.
        Err(RunError::EmptyBatch { .. }) => Ok(ExitCode::FAILURE),
        Err(e) => Err(e.into()),
    }
}
