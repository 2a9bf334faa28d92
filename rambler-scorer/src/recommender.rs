//! The recommendation service.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use rambler_core::{
    Context, Dataset, LocationFilter, Recommendation, RecommendationRequest, recommend,
};
use rambler_data::{LoadReport, SharedDataset, load_dataset};
use serde::Serialize;

use crate::classifier::Classifier;
use crate::policy::Policy;
use crate::weights::ScoreWeights;
use crate::RecommendError;

/// Ranked results plus the classifier's best match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendResponse {
    /// Places in descending score order; empty when nothing matched.
    pub results: Vec<Recommendation>,
    /// Name predicted by the classifier, when one is attached.
    pub best_match: Option<String>,
}

/// Serves recommendations from a shared dataset snapshot.
///
/// Calls are synchronous and may run concurrently from many threads. Each
/// call works on the snapshot current when it started; [`Recommender::reload`]
/// publishes a new snapshot without disturbing calls in flight.
///
/// # Examples
/// ```
/// use rambler_core::{Dataset, DatasetShape, PointOfInterest, RecommendationRequest};
/// use rambler_scorer::Recommender;
///
/// let dataset = Dataset::new(
///     vec![
///         PointOfInterest::new("Cubbon Park", "park").with_distance_km(2.0),
///         PointOfInterest::new("Fort", "fort").with_distance_km(4.0),
///     ],
///     DatasetShape {
///         has_coordinates: false,
///         has_distance_km: true,
///     },
/// );
/// let recommender = Recommender::from_dataset(dataset);
/// let request = RecommendationRequest {
///     kind: Some("park".into()),
///     ..RecommendationRequest::default()
/// };
/// let response = recommender.recommend(&request).expect("valid request");
/// assert_eq!(response.results.len(), 1);
/// ```
#[derive(Debug)]
pub struct Recommender {
    dataset: SharedDataset,
    source: Option<Utf8PathBuf>,
    weights: ScoreWeights,
    classifier: Option<Classifier>,
}

impl Recommender {
    /// Load the dataset at `path` and serve from it.
    ///
    /// # Errors
    /// Returns [`RecommendError::DatasetUnavailable`] when the file cannot be
    /// loaded.
    pub fn from_path(path: &Utf8Path) -> Result<Self, RecommendError> {
        let loaded = load_dataset(path)?;
        let mut recommender = Self::from_dataset(loaded.dataset);
        recommender.source = Some(path.to_path_buf());
        Ok(recommender)
    }

    /// Serve from an in-memory dataset.
    #[must_use]
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self {
            dataset: SharedDataset::new(dataset),
            source: None,
            weights: ScoreWeights::default(),
            classifier: None,
        }
    }

    /// Replace the scoring weights.
    ///
    /// # Errors
    /// Returns [`RecommendError::InvalidWeights`] when the weights fail
    /// validation.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Result<Self, RecommendError> {
        self.weights = weights.validate()?;
        Ok(self)
    }

    /// Attach a classifier whose prediction fills `best_match`.
    #[must_use]
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// The dataset snapshot currently served.
    #[must_use]
    pub fn dataset(&self) -> Arc<Dataset> {
        self.dataset.snapshot()
    }

    /// Normalise `request` and recommend places for it.
    ///
    /// # Errors
    /// Returns [`RecommendError::InvalidContext`] when a request value cannot
    /// be coerced.
    pub fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendResponse, RecommendError> {
        if request.user_lat.is_some() != request.user_lng.is_some() {
            debug!("ignoring caller position with only one coordinate");
        }
        let context = Context::from_request(request)?;
        Ok(self.recommend_context(&context))
    }

    /// Recommend places for an already normalised context.
    #[must_use]
    pub fn recommend_context(&self, context: &Context) -> RecommendResponse {
        let dataset = self.dataset.snapshot();
        let policy = Policy::select(dataset.shape(), context, self.weights);
        let results = recommend(dataset.pois(), context, &policy);
        let best_match = self
            .classifier
            .as_ref()
            .and_then(|classifier| classifier.predict(context))
            .filter(|name| dataset.pois().iter().any(|poi| poi.name == *name))
            .map(str::to_owned);
        debug!(
            "{} of {} row(s) recommended under {} filter constraint(s), best match {best_match:?}",
            results.len(),
            dataset.len(),
            LocationFilter::from_context(context).constraint_count()
        );
        RecommendResponse {
            results,
            best_match,
        }
    }

    /// Re-read the dataset file and publish it.
    ///
    /// The previous snapshot keeps serving when the reload fails. An attached
    /// classifier is not retrained; a predicted name that the new snapshot
    /// no longer contains is reported as no best match.
    ///
    /// # Errors
    /// Returns [`RecommendError::NoDatasetSource`] for recommenders built
    /// from memory and [`RecommendError::DatasetUnavailable`] when loading
    /// fails.
    pub fn reload(&self) -> Result<LoadReport, RecommendError> {
        let path = self
            .source
            .as_deref()
            .ok_or(RecommendError::NoDatasetSource)?;
        let report = self.dataset.reload_from(path)?;
        info!("reloaded {} row(s) from {path}", report.rows_loaded);
        Ok(report)
    }
}
