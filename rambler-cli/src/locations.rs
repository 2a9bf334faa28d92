//! Locations command implementation for the Rambler CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rambler_data::load_dataset;
use serde::{Deserialize, Serialize};

use crate::output::write_json;
use crate::sources::require_existing;
use crate::{ARG_DATASET, CliError, ENV_LOCATIONS_DATASET};

/// CLI arguments for the `locations` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "List the location hierarchy of a dataset")]
#[ortho_config(prefix = "RAMBLER")]
pub(crate) struct LocationsArgs {
    /// Path to the CSV dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
}

impl LocationsArgs {
    pub(crate) fn into_dataset(self) -> Result<Utf8PathBuf, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        merged.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_LOCATIONS_DATASET,
        })
    }
}

pub(crate) fn run_locations(args: LocationsArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_locations_with(args, &mut stdout)
}

pub(crate) fn run_locations_with(
    args: LocationsArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let dataset = args.into_dataset()?;
    require_existing(&dataset, ARG_DATASET)?;
    let loaded = load_dataset(&dataset)?;
    write_json(writer, &loaded.dataset.locations())
}
