use clap::Parser;
use hpsync_core::logging;
use std::process::ExitCode;

mod cli;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    // Initialize logging as early as possible.
    logging::init_logging(cli.verbose);

    match cli.run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("hpsync error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
