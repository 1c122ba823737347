//! `hpsync status` – show what is synced locally, without touching the network.

use anyhow::Result;
use hpsync_core::config::SyncSettings;
use hpsync_core::status;
use std::process::ExitCode;

pub fn run_status(settings: &SyncSettings) -> Result<ExitCode> {
    let report = status::status(settings)?;
    if report.is_empty() {
        println!("No homepages in {}.", settings.list_path.display());
        return Ok(ExitCode::SUCCESS);
    }
    println!("{:<24} {:<34} {:<16} SOURCE", "NAME", "VERSION", "STATE");
    for entry in &report {
        println!(
            "{:<24} {:<34} {:<16} {}",
            entry.homepage_name,
            entry.version.as_deref().unwrap_or("-"),
            entry.state().as_str(),
            entry.source_url
        );
    }
    Ok(ExitCode::SUCCESS)
}
