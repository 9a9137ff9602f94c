use ccdl_core::logging;
use clap::Parser;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // File logging when the state dir is usable, stderr otherwise.
    if let Err(err) = logging::init_logging(cli.verbose) {
        logging::init_logging_stderr(cli.verbose);
        tracing::warn!("file logging unavailable: {:#}", err);
    }

    if let Err(err) = cli.run().await {
        eprintln!("ccdl error: {:#}", err);
        std::process::exit(1);
    }
}
