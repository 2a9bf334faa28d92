//! Error types raised by the recommender and the classifier.

use camino::Utf8PathBuf;
use rambler_core::ContextError;
use rambler_data::DatasetError;
use thiserror::Error;

/// Errors raised while serving recommendations.
///
/// An empty result is not an error: it means nothing matched the filter.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// The dataset could not be loaded.
    #[error("dataset is unavailable")]
    DatasetUnavailable(#[from] DatasetError),
    /// A request value could not be coerced.
    #[error("invalid request")]
    InvalidContext(#[from] ContextError),
    /// Scoring weights were unusable.
    #[error("weights must be finite, bonuses non-negative and divisors positive")]
    InvalidWeights,
    /// A reload was requested for a recommender built from memory.
    #[error("recommender was not loaded from a file and cannot reload")]
    NoDatasetSource,
}

/// Errors raised while training, persisting or loading the classifier.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// No row had every numeric feature the tree needs.
    #[error("no rows carry avg_cost, distance_km and open_hour")]
    NoTrainingRows,
    /// Reading the model artefact failed.
    #[error("failed to read model file at {path}")]
    ReadModel {
        /// Artefact path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Decoding the model artefact failed.
    #[error("failed to decode model file at {path}")]
    DecodeModel {
        /// Artefact path.
        path: Utf8PathBuf,
        /// Source error from `bincode`.
        #[source]
        source: bincode::Error,
    },
    /// The file does not start with the model magic bytes.
    #[error("{path} is not a Rambler model file")]
    InvalidModelMagic {
        /// Artefact path.
        path: Utf8PathBuf,
    },
    /// The artefact was written by an incompatible format version.
    #[error("model file {path} has version {found}, expected {expected}")]
    UnsupportedModelVersion {
        /// Artefact path.
        path: Utf8PathBuf,
        /// Version stored in the file.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },
    /// Creating the parent directory for the artefact failed.
    #[error("failed to create parent directory {path}")]
    CreateParent {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Writing the artefact failed.
    #[error("failed to write model file at {path}")]
    WriteModel {
        /// Artefact path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Encoding the model with `bincode` failed.
    #[error("failed to encode model into {path}")]
    EncodeModel {
        /// Artefact path.
        path: Utf8PathBuf,
        /// Source error from `bincode`.
        #[source]
        source: bincode::Error,
    },
}
