pub mod config;
pub mod logging;

pub mod fetch;
pub mod fingerprint;
pub mod homepage_list;
pub mod run;
pub mod status;
pub mod sync;
