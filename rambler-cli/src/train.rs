//! Train command implementation for the Rambler CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rambler_data::load_dataset;
use rambler_scorer::{Classifier, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};

use crate::output::write_json;
use crate::sources::require_existing;
use crate::{ARG_DATASET, ARG_MAX_DEPTH, ARG_MODEL, CliError, ENV_TRAIN_DATASET, ENV_TRAIN_MODEL};

/// CLI arguments for the `train` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Fit the best-match decision tree to a CSV dataset and \
                 write it to the model path, replacing any existing model.",
    about = "Train the best-match classifier"
)]
#[ortho_config(prefix = "RAMBLER")]
pub(crate) struct TrainArgs {
    /// Path to the CSV dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Where to write the model artefact.
    #[arg(long = ARG_MODEL, value_name = "path")]
    #[serde(default)]
    pub(crate) model: Option<Utf8PathBuf>,
    /// Maximum tree depth.
    #[arg(long = ARG_MAX_DEPTH, value_name = "splits")]
    #[serde(default)]
    pub(crate) max_depth: Option<usize>,
}

impl TrainArgs {
    pub(crate) fn into_config(self) -> Result<TrainConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        TrainConfig::try_from(merged)
    }
}

/// Resolved `train` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TrainConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) model: Utf8PathBuf,
    pub(crate) max_depth: usize,
}

impl TryFrom<TrainArgs> for TrainConfig {
    type Error = CliError;

    fn try_from(args: TrainArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_TRAIN_DATASET,
        })?;
        let model = args.model.ok_or(CliError::MissingArgument {
            field: ARG_MODEL,
            env: ENV_TRAIN_MODEL,
        })?;
        Ok(Self {
            dataset,
            model,
            max_depth: args.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
        })
    }
}

/// What `train` prints once the model is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct TrainSummary {
    pub(crate) model: Utf8PathBuf,
    pub(crate) rows: usize,
    pub(crate) labels: usize,
    pub(crate) depth: usize,
}

pub(crate) fn run_train(args: TrainArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_train_with(args, &mut stdout)
}

pub(crate) fn run_train_with(args: TrainArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.dataset, ARG_DATASET)?;
    let loaded = load_dataset(&config.dataset)?;
    let pois = loaded.dataset.pois();
    let classifier = Classifier::train_with_depth(pois, config.max_depth)?;
    classifier.save(&config.model)?;
    let summary = TrainSummary {
        model: config.model,
        rows: pois.len(),
        labels: classifier.labels().len(),
        depth: classifier.depth(),
    };
    write_json(writer, &summary)
}
