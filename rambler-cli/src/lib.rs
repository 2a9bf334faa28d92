//! Command-line interface for the Rambler recommendation engine.
//!
//! Every subcommand reads a CSV dataset, does its work in-process and writes
//! a single JSON document to stdout. Logs go to stderr.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod locations;
mod logging;
mod output;
mod recommend;
mod sources;
mod train;

pub use error::CliError;
pub use logging::{LOG_ENV, init_logging};

use crate::locations::{LocationsArgs, run_locations};
use crate::recommend::{RecommendArgs, run_recommend};
use crate::train::{TrainArgs, run_train};

pub(crate) const ARG_DATASET: &str = "dataset";
pub(crate) const ARG_MODEL: &str = "model";
pub(crate) const ARG_REQUEST: &str = "request";
pub(crate) const ARG_TOP_K: &str = "top-k";
pub(crate) const ARG_MISSING_POSITION_PENALTY_KM: &str = "missing-position-penalty-km";
pub(crate) const ARG_MAX_DEPTH: &str = "max-depth";
pub(crate) const ENV_RECOMMEND_DATASET: &str = "RAMBLER_CMDS_RECOMMEND_DATASET";
pub(crate) const ENV_TRAIN_DATASET: &str = "RAMBLER_CMDS_TRAIN_DATASET";
pub(crate) const ENV_TRAIN_MODEL: &str = "RAMBLER_CMDS_TRAIN_MODEL";
pub(crate) const ENV_LOCATIONS_DATASET: &str = "RAMBLER_CMDS_LOCATIONS_DATASET";

/// Run the Rambler CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration, inputs or output fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => run_recommend(args),
        Command::Train(args) => run_train(args),
        Command::Locations(args) => run_locations(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "rambler",
    about = "Recommend tourist attractions from a CSV dataset",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Rank places in a dataset for a JSON request.
    Recommend(RecommendArgs),
    /// Train and persist the best-match classifier.
    Train(TrainArgs),
    /// List the countries, states and cities in a dataset.
    Locations(LocationsArgs),
}

#[cfg(test)]
mod tests;
