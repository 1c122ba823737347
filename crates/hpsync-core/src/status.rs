//! Offline report of what is currently synced under the public root.

use crate::config::SyncSettings;
use crate::fingerprint;
use crate::homepage_list;
use crate::sync::{self, CONTENT_FILE};
use anyhow::Result;

/// Local state of one homepage, derived from the content file and its version marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalState {
    /// No content file yet.
    NeverSynced,
    /// Marker matches the content fingerprint.
    Synced,
    /// Content exists but the marker is missing or disagrees with it.
    MarkerMismatch,
}

impl LocalState {
    pub fn as_str(self) -> &'static str {
        match self {
            LocalState::NeverSynced => "never synced",
            LocalState::Synced => "synced",
            LocalState::MarkerMismatch => "marker mismatch",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomepageStatus {
    pub homepage_name: String,
    pub source_url: String,
    /// Contents of the version marker, if present.
    pub version: Option<String>,
    /// Fingerprint of the content file, if present.
    pub content_hash: Option<String>,
}

impl HomepageStatus {
    pub fn state(&self) -> LocalState {
        match (&self.content_hash, &self.version) {
            (None, _) => LocalState::NeverSynced,
            (Some(hash), Some(version)) if hash == version => LocalState::Synced,
            (Some(_), _) => LocalState::MarkerMismatch,
        }
    }
}

/// Inspect every populated list entry. No network access, nothing written under
/// the public root.
pub fn status(settings: &SyncSettings) -> Result<Vec<HomepageStatus>> {
    let descriptors = homepage_list::load(&settings.list_path)?;
    let mut report = Vec::new();
    for info in descriptors.iter().filter_map(|d| d.as_populated()) {
        let dir = match sync::homepage_dir(&settings.public_dir, info) {
            Ok(dir) => dir,
            Err(e) => {
                tracing::warn!("skipping entry for {}: {:#}", info.source_url, e);
                continue;
            }
        };
        report.push(HomepageStatus {
            homepage_name: info.homepage_name.clone(),
            source_url: info.source_url.clone(),
            version: sync::read_version(&dir)?,
            content_hash: fingerprint::md5_file(&dir.join(CONTENT_FILE))?,
        });
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::VERSION_FILE;
    use std::fs;

    #[test]
    fn reports_each_populated_entry_state() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SyncSettings {
            list_path: dir.path().join("homepage_list.yaml"),
            public_dir: dir.path().join("public"),
            ..Default::default()
        };
        fs::write(
            &settings.list_path,
            r#"
- {}
- source_url: http://example.com/a
  homepage_name: a
- source_url: http://example.com/b
  homepage_name: b
- source_url: http://example.com/c
  homepage_name: c
"#,
        )
        .unwrap();
        let a = settings.public_dir.join("a");
        fs::create_dir_all(&a).unwrap();
        fs::write(a.join(CONTENT_FILE), b"hello").unwrap();
        fs::write(a.join(VERSION_FILE), "5d41402abc4b2a76b9719d911017c592").unwrap();
        let b = settings.public_dir.join("b");
        fs::create_dir_all(&b).unwrap();
        fs::write(b.join(CONTENT_FILE), b"edited by hand").unwrap();
        fs::write(b.join(VERSION_FILE), "5d41402abc4b2a76b9719d911017c592").unwrap();

        let report = status(&settings).unwrap();
        let states: Vec<_> = report
            .iter()
            .map(|s| (s.homepage_name.as_str(), s.state()))
            .collect();
        assert_eq!(
            states,
            vec![
                ("a", LocalState::Synced),
                ("b", LocalState::MarkerMismatch),
                ("c", LocalState::NeverSynced),
            ]
        );
        assert_eq!(
            report[0].version.as_deref(),
            Some("5d41402abc4b2a76b9719d911017c592")
        );
        assert!(!settings.public_dir.join("c").exists());
    }

    #[test]
    fn missing_list_reports_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SyncSettings {
            list_path: dir.path().join("homepage_list.yaml"),
            public_dir: dir.path().join("public"),
            ..Default::default()
        };
        assert!(status(&settings).unwrap().is_empty());
        assert!(settings.list_path.exists());
    }
}
