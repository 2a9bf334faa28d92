//! The immutable table of places a recommender serves from.

use std::collections::{BTreeMap, BTreeSet};

use crate::PointOfInterest;

/// Which geographic columns a dataset carries.
///
/// A dataset may carry both. Scoring policies pick the distance signal the
/// dataset can actually provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DatasetShape {
    /// Every row has a latitude/longitude position.
    pub has_coordinates: bool,
    /// Rows carry a precomputed `distance_km` column.
    pub has_distance_km: bool,
}

/// Country → state → city hierarchy found in a dataset.
pub type LocationIndex = BTreeMap<String, BTreeMap<String, BTreeSet<String>>>;

/// An immutable, loaded table of points of interest.
///
/// Row order is the order of the source file and is used to break score ties.
///
/// # Examples
/// ```
/// use rambler_core::{Dataset, DatasetShape, PointOfInterest};
///
/// let dataset = Dataset::new(
///     vec![PointOfInterest::new("Cubbon Park", "park").with_distance_km(2.0)],
///     DatasetShape {
///         has_coordinates: false,
///         has_distance_km: true,
///     },
/// );
/// assert_eq!(dataset.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pois: Vec<PointOfInterest>,
    shape: DatasetShape,
}

impl Dataset {
    /// Wrap loaded rows.
    #[must_use]
    pub const fn new(pois: Vec<PointOfInterest>, shape: DatasetShape) -> Self {
        Self { pois, shape }
    }

    /// Rows in source order.
    #[must_use]
    pub fn pois(&self) -> &[PointOfInterest] {
        &self.pois
    }

    /// Geographic columns present in the source.
    #[must_use]
    pub const fn shape(&self) -> DatasetShape {
        self.shape
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pois.len()
    }

    /// Report whether the dataset has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }

    /// Collect the location hierarchy present in the dataset.
    ///
    /// Rows without a country are ignored. A row without a state contributes
    /// only its country, and a row without a city contributes only its
    /// country and state.
    #[must_use]
    pub fn locations(&self) -> LocationIndex {
        let mut index = LocationIndex::new();
        for poi in &self.pois {
            let Some(country) = poi.region.country.as_ref() else {
                continue;
            };
            let states = index.entry(country.clone()).or_default();
            let Some(state) = poi.region.state.as_ref() else {
                continue;
            };
            let cities = states.entry(state.clone()).or_default();
            if let Some(city) = poi.region.city.as_ref() {
                cities.insert(city.clone());
            }
        }
        index
    }
}
