//! Single-shot HTTP GET of homepage content.
//!
//! Uses the curl crate (libcurl). One handle per call, no retries, no redirects:
//! only `200 OK` counts as success.

use crate::config::SyncSettings;
use std::time::Duration;
use thiserror::Error;

pub const USER_AGENT: &str = "PCL2/homepage_collection";
pub const REFERER: &str = "homepage_collection.pcl2.server";

/// Why a fetch produced no content.
#[derive(Debug, Error)]
pub enum FetchFailure {
    /// Server answered with anything other than 200.
    #[error("GET {url} returned HTTP {code}")]
    Status { url: String, code: u32 },
    /// 200 with nothing in it; treated like any other failed download.
    #[error("GET {url} returned an empty body")]
    EmptyBody { url: String },
    /// No usable response (DNS, connect, TLS, timeout, malformed URL, ...).
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },
}

impl FetchFailure {
    pub fn url(&self) -> &str {
        match self {
            FetchFailure::Status { url, .. }
            | FetchFailure::EmptyBody { url }
            | FetchFailure::Transport { url, .. } => url,
        }
    }
}

/// Source of homepage content. The sync only depends on this seam.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchFailure>;
}

/// Blocking libcurl fetcher sending the fixed client headers.
#[derive(Debug, Clone, Copy)]
pub struct CurlFetcher {
    connect_timeout: Duration,
    timeout: Duration,
}

impl CurlFetcher {
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Self {
        Self {
            connect_timeout,
            timeout,
        }
    }

    pub fn from_settings(settings: &SyncSettings) -> Self {
        Self::new(settings.connect_timeout(), settings.timeout())
    }

    /// Perform the GET and return (status, body) without judging the status.
    fn get(&self, url: &str) -> Result<(u32, Vec<u8>), curl::Error> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(false)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        let mut list = curl::easy::List::new();
        list.append(&format!("User-Agent: {}", USER_AGENT))?;
        list.append(&format!("Referer: {}", REFERER))?;
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        Ok((code, body))
    }
}

impl Fetch for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchFailure> {
        match self.get(url) {
            Ok((200, body)) => {
                tracing::debug!("GET {} -> 200 ({} bytes)", url, body.len());
                Ok(body)
            }
            Ok((code, _)) => {
                tracing::error!("download of {} failed with status {}", url, code);
                Err(FetchFailure::Status {
                    url: url.to_string(),
                    code,
                })
            }
            Err(source) => {
                tracing::error!("download of {} failed: {}", url, source);
                Err(FetchFailure::Transport {
                    url: url.to_string(),
                    source,
                })
            }
        }
    }
}
