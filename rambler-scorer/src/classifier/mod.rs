//! Best-match prediction with a categorical decision tree.
//!
//! The classifier learns to map a place's attributes to its name. At request
//! time the caller's context is encoded the same way and the tree names the
//! single place that best fits it. The prediction is a secondary signal shown
//! alongside the ranked results; it never changes the ranking.
//!
//! Features, in order: `type`, `avg_cost`, `distance_km`, `open_hour`,
//! `weather`, `travel_type`, `budget_level`. Categorical features are label
//! encoded against the whole dataset; a value unseen during training encodes
//! to index `0`, an approximation that can steer predictions towards the
//! alphabetically first category.

mod encoder;
mod persist;
mod tree;

use log::info;
use rambler_core::{Context, PointOfInterest};
use serde::{Deserialize, Serialize};

use crate::ClassifierError;
pub use encoder::LabelEncoder;
pub use persist::{MODEL_MAGIC, MODEL_VERSION};
use tree::{Features, Node, Sample};

/// Depth limit used by [`Classifier::train`].
pub const DEFAULT_MAX_DEPTH: usize = 6;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
struct FeatureEncoders {
    kind: LabelEncoder,
    weather: LabelEncoder,
    travel_type: LabelEncoder,
    budget_level: LabelEncoder,
}

impl FeatureEncoders {
    fn fit(pois: &[PointOfInterest]) -> Self {
        Self {
            kind: LabelEncoder::fit(pois.iter().map(|poi| poi.kind.as_str())),
            weather: LabelEncoder::fit(pois.iter().map(|poi| text(poi.weather.as_deref()))),
            travel_type: LabelEncoder::fit(
                pois.iter().map(|poi| text(poi.travel_type.as_deref())),
            ),
            budget_level: LabelEncoder::fit(
                pois.iter().map(|poi| text(poi.budget_level.as_deref())),
            ),
        }
    }

    fn encode(&self, raw: &RawFeatures<'_>) -> Features {
        [
            index_as_f64(self.kind.encode(raw.kind)),
            raw.avg_cost,
            raw.distance_km,
            f64::from(raw.open_hour),
            index_as_f64(self.weather.encode(text(raw.weather))),
            index_as_f64(self.travel_type.encode(text(raw.travel_type))),
            index_as_f64(self.budget_level.encode(text(raw.budget_level))),
        ]
    }
}

/// Feature values before categorical encoding.
struct RawFeatures<'a> {
    kind: &'a str,
    avg_cost: f64,
    distance_km: f64,
    open_hour: u8,
    weather: Option<&'a str>,
    travel_type: Option<&'a str>,
    budget_level: Option<&'a str>,
}

impl<'a> RawFeatures<'a> {
    fn from_poi(poi: &'a PointOfInterest) -> Option<Self> {
        Some(Self {
            kind: &poi.kind,
            avg_cost: poi.avg_cost?,
            distance_km: poi.distance_km?,
            open_hour: poi.open_hour?,
            weather: poi.weather.as_deref(),
            travel_type: poi.travel_type.as_deref(),
            budget_level: poi.budget_level.as_deref(),
        })
    }

    fn from_context(context: &'a Context) -> Self {
        Self {
            kind: context.kind.as_deref().unwrap_or_default(),
            avg_cost: context.avg_cost,
            distance_km: context.distance_km,
            open_hour: context.open_hour,
            weather: context.weather.as_deref(),
            travel_type: context.travel_type.as_deref(),
            budget_level: context.budget_level.as_deref(),
        }
    }
}

/// A trained best-match classifier.
///
/// # Examples
/// ```
/// use rambler_core::{Context, PointOfInterest};
/// use rambler_scorer::Classifier;
///
/// let pois = vec![
///     PointOfInterest::new("Cubbon Park", "park")
///         .with_avg_cost(0.0)
///         .with_distance_km(2.0)
///         .with_open_hour(6),
///     PointOfInterest::new("Science Museum", "museum")
///         .with_avg_cost(80.0)
///         .with_distance_km(4.0)
///         .with_open_hour(10),
/// ];
/// let classifier = Classifier::train(&pois).expect("trainable rows");
/// let context = Context::default().with_kind("museum").with_avg_cost(90.0);
/// assert_eq!(classifier.predict(&context), Some("Science Museum"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classifier {
    encoders: FeatureEncoders,
    names: LabelEncoder,
    root: Node,
}

impl Classifier {
    /// Train with [`DEFAULT_MAX_DEPTH`].
    ///
    /// # Errors
    /// Returns [`ClassifierError::NoTrainingRows`] when no row carries
    /// `avg_cost`, `distance_km` and `open_hour`.
    pub fn train(pois: &[PointOfInterest]) -> Result<Self, ClassifierError> {
        Self::train_with_depth(pois, DEFAULT_MAX_DEPTH)
    }

    /// Train a tree no deeper than `max_depth` splits.
    ///
    /// Rows missing a numeric feature are skipped; missing categorical values
    /// are encoded as the empty category.
    ///
    /// # Errors
    /// Returns [`ClassifierError::NoTrainingRows`] when no row carries
    /// `avg_cost`, `distance_km` and `open_hour`.
    pub fn train_with_depth(
        pois: &[PointOfInterest],
        max_depth: usize,
    ) -> Result<Self, ClassifierError> {
        let encoders = FeatureEncoders::fit(pois);
        let trainable: Vec<(&PointOfInterest, Features)> = pois
            .iter()
            .filter_map(|poi| {
                let raw = RawFeatures::from_poi(poi)?;
                Some((poi, encoders.encode(&raw)))
            })
            .collect();
        if trainable.is_empty() {
            return Err(ClassifierError::NoTrainingRows);
        }

        let names = LabelEncoder::fit(trainable.iter().map(|(poi, _)| poi.name.as_str()));
        let samples: Vec<Sample> = trainable
            .iter()
            .map(|(poi, features)| Sample {
                features: *features,
                label: names.encode(&poi.name),
            })
            .collect();
        let root = Node::grow(&samples, names.len(), max_depth);
        info!(
            "trained best-match tree on {} of {} row(s): depth {}, {} leaves",
            samples.len(),
            pois.len(),
            root.depth(),
            root.leaf_count()
        );
        Ok(Self {
            encoders,
            names,
            root,
        })
    }

    /// Name of the place that best fits `context`.
    #[must_use]
    pub fn predict(&self, context: &Context) -> Option<&str> {
        let features = self.encoders.encode(&RawFeatures::from_context(context));
        self.names.decode(self.root.predict(&features))
    }

    /// Names the classifier can predict.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        self.names.classes()
    }

    /// Depth of the trained tree.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

fn text(value: Option<&str>) -> &str {
    value.unwrap_or_default()
}

fn index_as_f64(index: usize) -> f64 {
    f64::from(u32::try_from(index).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rambler_core::test_support::city_guide;
    use rstest::{fixture, rstest};

    #[fixture]
    fn classifier() -> Classifier {
        Classifier::train(&city_guide()).expect("city guide is trainable")
    }

    #[rstest]
    fn learns_every_complete_row(classifier: Classifier) {
        assert_eq!(
            classifier.labels(),
            ["Cubbon Park", "Lalbagh", "Nandi Hills", "Visvesvaraya Museum"]
        );
        assert!(classifier.depth() <= DEFAULT_MAX_DEPTH);
    }

    fn context_for(poi: &PointOfInterest) -> Context {
        let mut context = Context::default()
            .with_kind(poi.kind.clone())
            .with_avg_cost(poi.avg_cost.unwrap_or_default());
        context.distance_km = poi.distance_km.unwrap_or_default();
        context.open_hour = poi.open_hour.unwrap_or_default();
        context.weather = poi.weather.clone();
        context.travel_type = poi.travel_type.clone();
        context.budget_level = poi.budget_level.clone();
        context
    }

    #[rstest]
    fn recalls_training_rows(classifier: Classifier) {
        for poi in city_guide() {
            assert_eq!(
                classifier.predict(&context_for(&poi)),
                Some(poi.name.as_str())
            );
        }
    }

    #[rstest]
    fn unseen_categories_still_predict(classifier: Classifier) {
        let context = Context::default().with_kind("aquarium").with_weather("snow");
        assert!(classifier.predict(&context).is_some());
    }

    #[rstest]
    fn rows_without_numeric_features_are_rejected() {
        let pois = vec![PointOfInterest::new("Bare", "park").with_avg_cost(1.0)];
        assert!(matches!(
            Classifier::train(&pois),
            Err(ClassifierError::NoTrainingRows)
        ));
    }
}
