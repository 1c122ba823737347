//! The homepage list (`homepage_list.yaml`): an ordered sequence of homepage entries.
//!
//! A missing list is created with a single all-empty placeholder entry so operators
//! have a template to fill in. Placeholder entries are kept in the loaded sequence
//! as [`Descriptor::Empty`] and skipped by the sync.

use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One entry of the homepage list, as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomepageInfo {
    /// Remote location of the homepage content.
    #[serde(deserialize_with = "null_as_empty")]
    pub source_url: String,
    /// Directory name under the public root.
    #[serde(deserialize_with = "null_as_empty")]
    pub homepage_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub homepage_link: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub owner: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub owner_link: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl HomepageInfo {
    /// True if every field is empty (the placeholder written into a fresh list).
    pub fn is_placeholder(&self) -> bool {
        *self == HomepageInfo::default()
    }
}

/// A loaded list entry: either the empty placeholder or a homepage to sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    Empty,
    Populated(HomepageInfo),
}

impl From<HomepageInfo> for Descriptor {
    fn from(info: HomepageInfo) -> Self {
        if info.is_placeholder() {
            Descriptor::Empty
        } else {
            Descriptor::Populated(info)
        }
    }
}

impl Descriptor {
    pub fn as_populated(&self) -> Option<&HomepageInfo> {
        match self {
            Descriptor::Empty => None,
            Descriptor::Populated(info) => Some(info),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read homepage list {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create homepage list {}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed homepage list {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Load the homepage list at `path`.
///
/// If the file does not exist it is created with one placeholder entry and an empty
/// sequence is returned. Malformed content is an error; nothing is silently dropped.
pub fn load(path: &Path) -> Result<Vec<Descriptor>, ConfigError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            write_template(path)?;
            tracing::info!("created homepage list template at {}", path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    parse(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse list content. An empty document is an empty list.
pub fn parse(data: &str) -> Result<Vec<Descriptor>, serde_yaml::Error> {
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    let entries: Option<Vec<HomepageInfo>> = serde_yaml::from_str(data)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(Descriptor::from)
        .collect())
}

fn write_template(path: &Path) -> Result<(), ConfigError> {
    let create_err = |source: io::Error| ConfigError::Create {
        path: path.to_path_buf(),
        source,
    };
    let template = serde_yaml::to_string(&vec![HomepageInfo::default()]).map_err(|e| {
        create_err(io::Error::new(io::ErrorKind::InvalidData, e))
    })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(create_err)?;
    }
    fs::write(path, template).map_err(create_err)
}
