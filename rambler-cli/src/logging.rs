//! Subscriber set-up for the CLI.
//!
//! Library crates log through `log`; the subscriber installed here bridges
//! those records and writes them to stderr so stdout stays machine readable.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::CliError;

/// Environment variable holding the log filter, e.g. `rambler_data=info`.
pub const LOG_ENV: &str = "RAMBLER_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber.
///
/// An unset or unparsable [`LOG_ENV`] falls back to warnings only.
///
/// # Errors
/// Returns [`CliError::InitLogging`] when a global subscriber is already set.
pub fn init_logging() -> Result<(), CliError> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init()
        .map_err(CliError::InitLogging)
}
