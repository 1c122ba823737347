use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tool settings, optionally loaded from `~/.config/hpsync/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Descriptor list (created with a placeholder entry if missing).
    pub list_path: PathBuf,
    /// Public output root; each homepage gets its own subdirectory.
    pub public_dir: PathBuf,
    /// Connect timeout in seconds for each fetch.
    pub connect_timeout_secs: u64,
    /// Total timeout in seconds for each fetch.
    pub timeout_secs: u64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            list_path: PathBuf::from("homepage_list.yaml"),
            public_dir: PathBuf::from("public"),
            connect_timeout_secs: 15,
            timeout_secs: 30,
        }
    }
}

impl SyncSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Location of the per-user settings file. Not created here.
pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hpsync")?;
    Ok(xdg_dirs.get_config_home().join("hpsync").join("config.toml"))
}

/// Load settings.
///
/// An explicit path must exist. Without one, the XDG config file is read if present;
/// otherwise built-in defaults apply.
pub fn load(explicit: Option<&Path>) -> Result<SyncSettings> {
    if let Some(path) = explicit {
        return load_from_path(path);
    }
    match config_path() {
        Ok(path) if path.exists() => load_from_path(&path),
        Ok(_) => Ok(SyncSettings::default()),
        Err(e) => {
            tracing::debug!("no XDG config directory ({e}); using defaults");
            Ok(SyncSettings::default())
        }
    }
}

pub fn load_from_path(path: &Path) -> Result<SyncSettings> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let settings: SyncSettings =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    tracing::debug!("loaded settings from {}", path.display());
    Ok(settings)
}
