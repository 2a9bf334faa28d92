//! Recommend command implementation for the Rambler CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rambler_core::RecommendationRequest;
use rambler_scorer::{
    Classifier, ClassifierError, RecommendResponse, Recommender, ScoreWeights,
};
use serde::{Deserialize, Serialize};

use crate::output::write_json;
use crate::sources::require_existing;
use crate::{
    ARG_DATASET, ARG_MISSING_POSITION_PENALTY_KM, ARG_MODEL, ARG_REQUEST, ARG_TOP_K, CliError,
    ENV_RECOMMEND_DATASET,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank the places in a CSV dataset for a JSON-encoded \
                 recommendation request. Without a request file every \
                 place is a candidate. With a model path the best-match \
                 classifier is loaded, or trained and saved when the file \
                 does not exist yet.",
    about = "Recommend places for a request"
)]
#[ortho_config(prefix = "RAMBLER")]
pub(crate) struct RecommendArgs {
    /// Path to a JSON file containing a recommendation request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to the CSV dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Path to the best-match model artefact.
    #[arg(long = ARG_MODEL, value_name = "path")]
    #[serde(default)]
    pub(crate) model: Option<Utf8PathBuf>,
    /// Override the number of results requested.
    #[arg(long = ARG_TOP_K, value_name = "count")]
    #[serde(default)]
    pub(crate) top_k: Option<usize>,
    /// Charge every place this many kilometres when the request carries no
    /// position.
    #[arg(long = ARG_MISSING_POSITION_PENALTY_KM, value_name = "km")]
    #[serde(default)]
    pub(crate) missing_position_penalty_km: Option<f64>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecommendConfig {
    /// Optional request file; absent means an empty request.
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Dataset to serve from.
    pub(crate) dataset: Utf8PathBuf,
    /// Model artefact for the best match.
    pub(crate) model: Option<Utf8PathBuf>,
    /// Result count overriding the request's `top_k`.
    pub(crate) top_k: Option<usize>,
    /// Scoring weights.
    pub(crate) weights: ScoreWeights,
}

impl RecommendConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.dataset, ARG_DATASET)?;
        if let Some(path) = self.request_path.as_deref() {
            require_existing(path, ARG_REQUEST)?;
        }
        Ok(())
    }
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_RECOMMEND_DATASET,
        })?;
        let weights = args
            .missing_position_penalty_km
            .map_or_else(ScoreWeights::default, |distance_km| {
                ScoreWeights::default().with_missing_position_penalty(distance_km)
            });
        Ok(Self {
            request_path: args.request_path,
            dataset,
            model: args.model,
            top_k: args.top_k,
            weights,
        })
    }
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recommend_with(args, &mut stdout)
}

pub(crate) fn run_recommend_with(
    args: RecommendArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let response = execute_recommend(args)?;
    write_json(writer, &response)
}

fn execute_recommend(args: RecommendArgs) -> Result<RecommendResponse, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let mut request = config
        .request_path
        .as_deref()
        .map(load_request)
        .transpose()?
        .unwrap_or_default();
    if let Some(top_k) = config.top_k {
        request.top_k = Some(top_k);
    }

    let mut recommender = Recommender::from_path(&config.dataset)?.with_weights(config.weights)?;
    if let Some(model) = config.model.as_deref() {
        match Classifier::load_or_train(model, recommender.dataset().pois()) {
            Ok(classifier) => recommender = recommender.with_classifier(classifier),
            Err(ClassifierError::NoTrainingRows) => warn!(
                "{} has no rows with a distance to train on; best match disabled",
                config.dataset
            ),
            Err(err) => return Err(err.into()),
        }
    }
    let response = recommender.recommend(&request)?;
    info!(
        "recommended {} place(s) from {}",
        response.results.len(),
        config.dataset
    );
    Ok(response)
}

/// Loads a JSON-encoded [`RecommendationRequest`] from disk.
pub(crate) fn load_request(path: &Utf8Path) -> Result<RecommendationRequest, CliError> {
    let file = rambler_fs::open_file(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}
