//! Test-only helpers shared by unit, behaviour and benchmark code.

use std::collections::HashMap;

use crate::{Context, PointOfInterest, Region, ScoringPolicy};

/// `ScoringPolicy` returning a fixed score per place name.
///
/// Places without an entry score `0.0`.
#[derive(Debug, Clone, Default)]
pub struct FixedScorer {
    scores: HashMap<String, f64>,
}

impl FixedScorer {
    /// Build a scorer from `(name, score)` pairs.
    pub fn new<I, K>(scores: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            scores: scores
                .into_iter()
                .map(|(name, score)| (name.into(), score))
                .collect(),
        }
    }
}

impl ScoringPolicy for FixedScorer {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn score(&self, poi: &PointOfInterest, _context: &Context) -> f64 {
        self.scores.get(&poi.name).copied().unwrap_or(0.0)
    }
}

/// Build a region from its three levels.
#[must_use]
pub fn region(country: &str, state: &str, city: &str) -> Region {
    Region {
        country: Some(country.to_owned()),
        state: Some(state.to_owned()),
        city: Some(city.to_owned()),
    }
}

/// A small precomputed-distance dataset resembling a city guide.
#[must_use]
pub fn city_guide() -> Vec<PointOfInterest> {
    vec![
        PointOfInterest::new("Cubbon Park", "park")
            .with_avg_cost(0.0)
            .with_distance_km(2.0)
            .with_open_hour(6)
            .with_weather("sunny")
            .with_travel_type("family")
            .with_budget_level("low")
            .with_description("Shaded lawns in the city centre"),
        PointOfInterest::new("Lalbagh", "park")
            .with_avg_cost(30.0)
            .with_distance_km(5.0)
            .with_open_hour(6)
            .with_weather("sunny")
            .with_travel_type("solo")
            .with_budget_level("low")
            .with_description("Botanical garden with a glasshouse"),
        PointOfInterest::new("Visvesvaraya Museum", "museum")
            .with_avg_cost(75.0)
            .with_distance_km(3.0)
            .with_open_hour(10)
            .with_weather("rainy")
            .with_travel_type("family")
            .with_budget_level("medium")
            .with_description("Hands-on science exhibits"),
        PointOfInterest::new("Nandi Hills", "viewpoint")
            .with_avg_cost(150.0)
            .with_distance_km(60.0)
            .with_open_hour(5)
            .with_weather("sunny")
            .with_travel_type("adventure")
            .with_budget_level("high")
            .with_description("Sunrise above the clouds"),
    ]
}
