//! CLI command handlers, one file per command.

mod fingerprint;
mod status;
mod sync;

pub use fingerprint::run_fingerprint;
pub use status::run_status;
pub use sync::run_sync;
