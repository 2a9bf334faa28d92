//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use rambler_cli::CliError;

fn main() -> eyre::Result<()> {
    rambler_cli::init_logging()?;
    match rambler_cli::run() {
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        outcome => Ok(outcome?),
    }
}
