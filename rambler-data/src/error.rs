//! Errors raised while loading a dataset.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that make a dataset unavailable.
///
/// Row-level problems never surface here; they are counted in the
/// [`LoadReport`](crate::LoadReport) instead.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be opened.
    #[error("failed to open dataset at {path}")]
    Open {
        /// Requested dataset path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The header row could not be read.
    #[error("failed to read the header row of {path}")]
    ReadHeader {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Source error from `csv`.
        #[source]
        source: csv::Error,
    },
    /// A mandatory column is absent from the header.
    #[error("dataset {path} has no `{column}` column")]
    MissingColumn {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Canonical column name.
        column: &'static str,
    },
    /// The header carries neither coordinates nor precomputed distances.
    #[error("dataset {path} needs `lat` and `lng` columns or a `distance_km` column")]
    MissingGeoColumns {
        /// Dataset path.
        path: Utf8PathBuf,
    },
}
