//! The `opsnotes` binary: structured extraction of ops notes from the command line.

use clap::Parser;
use opsnotes_cli::cli::Cli;
use opsnotes_cli::errors::CliError;
use opsnotes_cli::{commands, logging};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    logging::init(cli.log_format)?;

    commands::run(cli).await
}
