//! Per-homepage sync: fetch, compare fingerprints, write only on change.
//!
//! Layout under the public root:
//! `<homepage_name>/homepage.xaml` holds the content and
//! `<homepage_name>/homepage.xaml.ini` holds its MD5 (the version marker).

use crate::fetch::{Fetch, FetchFailure};
use crate::fingerprint;
use crate::homepage_list::{Descriptor, HomepageInfo};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const CONTENT_FILE: &str = "homepage.xaml";
pub const VERSION_FILE: &str = "homepage.xaml.ini";
const PARTIAL_SUFFIX: &str = ".part";

/// What happened to one descriptor.
#[derive(Debug)]
pub enum SyncOutcome {
    /// Placeholder entry; nothing fetched or written.
    SkippedEmpty,
    /// Remote content matches the local file; content not rewritten. A missing or
    /// stale version marker is corrected.
    Unchanged { version: String },
    /// Local content and version marker replaced.
    Updated {
        previous: Option<String>,
        current: String,
    },
    /// Fetch failed or returned an empty body; local files untouched.
    FetchFailed(FetchFailure),
}

/// Directory for a homepage under `public_dir`.
///
/// `homepage_name` must be a relative path made only of normal components so a
/// list entry can never write outside the public root.
pub fn homepage_dir(public_dir: &Path, info: &HomepageInfo) -> Result<PathBuf> {
    let name = Path::new(&info.homepage_name);
    let mut components = name.components().peekable();
    if components.peek().is_none() {
        anyhow::bail!("homepage_name is empty for {}", info.source_url);
    }
    if !components.all(|c| matches!(c, Component::Normal(_))) {
        anyhow::bail!(
            "homepage_name {:?} must be a relative path inside the public directory",
            info.homepage_name
        );
    }
    Ok(public_dir.join(name))
}

/// Sync one descriptor into `public_dir`.
///
/// Fetch failures are an outcome, not an error: they are logged and reported as
/// [`SyncOutcome::FetchFailed`]. `Err` means a local filesystem problem.
pub fn sync_homepage<F: Fetch + ?Sized>(
    public_dir: &Path,
    descriptor: &Descriptor,
    fetcher: &F,
) -> Result<SyncOutcome> {
    let info = match descriptor {
        Descriptor::Empty => {
            tracing::info!("skipping empty homepage entry");
            return Ok(SyncOutcome::SkippedEmpty);
        }
        Descriptor::Populated(info) => info,
    };
    let name = info.homepage_name.as_str();
    tracing::info!("syncing {} from {}", name, info.source_url);

    let dir = homepage_dir(public_dir, info)?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;

    let content_path = dir.join(CONTENT_FILE);
    let local_hash = fingerprint::md5_file(&content_path)?;

    let content = match fetcher.fetch(&info.source_url) {
        Ok(content) => content,
        Err(failure) => {
            tracing::error!("{} sync failed: {}", name, failure);
            return Ok(SyncOutcome::FetchFailed(failure));
        }
    };
    if content.is_empty() {
        let failure = FetchFailure::EmptyBody {
            url: info.source_url.clone(),
        };
        tracing::error!("{} sync failed: {}", name, failure);
        return Ok(SyncOutcome::FetchFailed(failure));
    }
    let remote_hash = fingerprint::md5_hex(&content);

    if local_hash.as_deref() == Some(remote_hash.as_str()) {
        tracing::info!("{} has no update", name);
        if read_version(&dir)?.as_deref() != Some(remote_hash.as_str()) {
            write_version(&dir, &remote_hash)?;
            tracing::warn!("{} version marker repaired to {}", name, remote_hash);
        }
        return Ok(SyncOutcome::Unchanged {
            version: remote_hash,
        });
    }

    tracing::info!(
        "{} has an update: {} -> {}",
        name,
        local_hash.as_deref().unwrap_or("none"),
        remote_hash
    );
    // Marker first: if the content rename fails, content != remote and the next run redoes both.
    write_version(&dir, &remote_hash)?;
    replace_file(&content_path, &content)?;
    tracing::info!("{} version updated to {}", name, remote_hash);

    Ok(SyncOutcome::Updated {
        previous: local_hash,
        current: remote_hash,
    })
}

/// Write to a sibling temp file, then rename over `path`.
fn replace_file(path: &Path, data: &[u8]) -> Result<()> {
    let mut temp = path.as_os_str().to_owned();
    temp.push(PARTIAL_SUFFIX);
    let temp = PathBuf::from(temp);
    fs::write(&temp, data).with_context(|| format!("write {}", temp.display()))?;
    if let Err(e) = fs::rename(&temp, path) {
        let _ = fs::remove_file(&temp);
        return Err(e).with_context(|| {
            format!("failed to rename {} to {}", temp.display(), path.display())
        });
    }
    Ok(())
}

fn write_version(dir: &Path, version: &str) -> Result<()> {
    let path = dir.join(VERSION_FILE);
    fs::write(&path, version).with_context(|| format!("write {}", path.display()))
}

/// Stored version marker for a homepage directory, if any.
pub fn read_version(dir: &Path) -> Result<Option<String>> {
    let path = dir.join(VERSION_FILE);
    match fs::read_to_string(&path) {
        Ok(s) => Ok(Some(s.trim().to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
    }
}
