//! Fingerprint command: MD5 of a local file, in `md5sum` format.

use anyhow::Result;
use hpsync_core::fingerprint;
use std::path::Path;
use std::process::ExitCode;

pub fn run_fingerprint(path: &Path) -> Result<ExitCode> {
    match fingerprint::md5_file(path)? {
        Some(digest) => {
            println!("{}  {}", digest, path.display());
            Ok(ExitCode::SUCCESS)
        }
        None => anyhow::bail!("no such file: {}", path.display()),
    }
}
