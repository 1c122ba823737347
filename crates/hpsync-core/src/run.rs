//! Batch driver: load the homepage list and sync every entry in order.

use crate::config::SyncSettings;
use crate::fetch::Fetch;
use crate::homepage_list::{self, ConfigError, Descriptor};
use crate::sync::{self, SyncOutcome};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Batch-fatal conditions. Per-homepage problems never surface here.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("homepage list {} is empty, nothing to sync", path.display())]
    EmptyBatch { path: PathBuf },
    #[error("failed to create public directory {}", path.display())]
    PublicDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Per-outcome counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &SyncOutcome) {
        match outcome {
            SyncOutcome::SkippedEmpty => self.skipped += 1,
            SyncOutcome::Unchanged { .. } => self.unchanged += 1,
            SyncOutcome::Updated { .. } => self.updated += 1,
            SyncOutcome::FetchFailed(_) => self.failed += 1,
        }
    }
}

/// Run one full sync pass.
///
/// An empty list is [`RunError::EmptyBatch`] and leaves `public_dir` alone. Otherwise every
/// descriptor is processed, in list order, even if earlier ones fail.
pub fn run<F: Fetch + ?Sized>(
    settings: &SyncSettings,
    fetcher: &F,
) -> Result<RunSummary, RunError> {
    let descriptors = homepage_list::load(&settings.list_path)?;
    if descriptors.is_empty() {
        tracing::warn!(
            "homepage list {} is empty, aborting sync",
            settings.list_path.display()
        );
        return Err(RunError::EmptyBatch {
            path: settings.list_path.clone(),
        });
    }

    let public_dir = &settings.public_dir;
    fs::create_dir_all(public_dir).map_err(|source| RunError::PublicDir {
        path: public_dir.clone(),
        source,
    })?;

    tracing::info!(
        "starting sync of {} homepage(s) into {}",
        descriptors.len(),
        public_dir.display()
    );

    let mut summary = RunSummary {
        total: descriptors.len(),
        ..Default::default()
    };
    for descriptor in &descriptors {
        match sync::sync_homepage(public_dir, descriptor, fetcher) {
            Ok(outcome) => summary.record(&outcome),
            Err(err) => {
                tracing::error!("{} sync failed: {:#}", display_name(descriptor), err);
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        "sync complete: {} updated, {} unchanged, {} skipped, {} failed",
        summary.updated,
        summary.unchanged,
        summary.skipped,
        summary.failed
    );
    Ok(summary)
}

fn display_name(descriptor: &Descriptor) -> &str {
    match descriptor {
        Descriptor::Empty => "<empty>",
        Descriptor::Populated(info) if info.homepage_name.is_empty() => {
            info.source_url.as_str()
        }
        Descriptor::Populated(info) => info.homepage_name.as_str(),
    }
}
