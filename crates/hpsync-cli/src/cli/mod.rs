//! CLI for hpsync.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hpsync_core::config::{self, SyncSettings};
use std::path::PathBuf;
use std::process::ExitCode;

use commands::{run_fingerprint, run_status, run_sync};

/// Top-level CLI for hpsync.
#[derive(Debug, Parser)]
#[command(name = "hpsync")]
#[command(about = "Mirror homepage files into public/ when their content changes", long_about = None)]
pub struct Cli {
    /// Settings file (TOML). Defaults to ~/.config/hpsync/config.toml if it exists.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Homepage list to read (default: homepage_list.yaml).
    #[arg(long, global = true, value_name = "FILE")]
    pub list: Option<PathBuf>,

    /// Public output root (default: public).
    #[arg(long, global = true, value_name = "DIR")]
    pub public_dir: Option<PathBuf>,

    /// Total timeout per fetch, in seconds (default: 30).
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Debug-level logging (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Fetch every homepage in the list and update changed ones (default).
    Sync,

    /// Show the locally synced version of each homepage.
    Status,

    /// Print the MD5 fingerprint of a local file.
    Fingerprint {
        /// Path to the file.
        path: PathBuf,
    },
}

impl Cli {
    /// Settings from the config file with command-line overrides applied.
    pub fn settings(&self) -> Result<SyncSettings> {
        let mut settings = config::load(self.config.as_deref())?;
        if let Some(list) = &self.list {
            settings.list_path = list.clone();
        }
        if let Some(public_dir) = &self.public_dir {
            settings.public_dir = public_dir.clone();
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_secs = timeout;
        }
        tracing::debug!("effective settings: {:?}", settings);
        Ok(settings)
    }

    pub fn run(self) -> Result<ExitCode> {
        match self.command.clone().unwrap_or(CliCommand::Sync) {
            CliCommand::Sync => run_sync(&self.settings()?),
            CliCommand::Status => run_status(&self.settings()?),
            CliCommand::Fingerprint { path } => run_fingerprint(&path),
        }
    }
}

#[cfg(test)]
mod tests;
