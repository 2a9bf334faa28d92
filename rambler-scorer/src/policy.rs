//! Concrete scoring policies and the rule that picks one per request.
//!
//! Both policies add categorical bonuses and subtract numeric penalties. They
//! differ in the distance signal they use and in how strictly they compare
//! categories:
//!
//! | Policy | Categories | Distance | Opening hour |
//! | --- | --- | --- | --- |
//! | [`FeatureScorer`] | exact | `distance_km` column | yes |
//! | [`GeoScorer`] | case-insensitive | great-circle from caller | no |
//!
//! A numeric term is left out when the place lacks the value; missing caller
//! numbers were already defaulted by [`Context`].

use log::debug;
use rambler_core::filter::eq_ignore_case;
use rambler_core::{Context, DatasetShape, PointOfInterest, ScoringPolicy, haversine_km};

use crate::weights::{MissingPosition, ScoreWeights};

/// Scores places from their precomputed attributes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeatureScorer {
    weights: ScoreWeights,
}

impl FeatureScorer {
    /// Create a scorer with the given weights.
    #[must_use]
    pub const fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }
}

impl ScoringPolicy for FeatureScorer {
    fn name(&self) -> &'static str {
        "feature"
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "the score is a sum of bonuses and scaled differences"
    )]
    fn score(&self, poi: &PointOfInterest, context: &Context) -> f64 {
        let weights = self.weights;
        let exact = |wanted: Option<&str>, actual: Option<&str>| {
            wanted.is_some_and(|value| Some(value) == actual)
        };

        let mut score = 0.0;
        if exact(context.kind.as_deref(), Some(poi.kind.as_str())) {
            score += weights.type_bonus;
        }
        if exact(context.weather.as_deref(), poi.weather.as_deref()) {
            score += weights.weather_bonus;
        }
        if exact(context.travel_type.as_deref(), poi.travel_type.as_deref()) {
            score += weights.travel_type_bonus;
        }
        score -= cost_penalty(poi, context, weights);
        if let Some(distance) = poi.distance_km {
            score -= (distance - context.distance_km).abs() / weights.distance_divisor;
        }
        if let Some(hour) = poi.open_hour {
            score -= (f64::from(hour) - f64::from(context.open_hour)).abs() / weights.hour_divisor;
        }
        score
    }
}

/// Scores places by live distance from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoScorer {
    weights: ScoreWeights,
}

impl GeoScorer {
    /// Create a scorer with the given weights.
    #[must_use]
    pub const fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// Kilometres charged for `poi`, or `None` when the term is omitted.
    fn charged_distance(&self, poi: &PointOfInterest, context: &Context) -> Option<f64> {
        let place = poi.location?;
        match (context.position, self.weights.missing_position) {
            (Some(caller), _) => Some(haversine_km(caller, place)),
            (None, MissingPosition::Penalise { distance_km }) => Some(distance_km),
            (None, MissingPosition::Omit) => None,
        }
    }
}

impl ScoringPolicy for GeoScorer {
    fn name(&self) -> &'static str {
        "geo"
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "the score is a sum of bonuses and scaled differences"
    )]
    fn score(&self, poi: &PointOfInterest, context: &Context) -> f64 {
        let weights = self.weights;
        let loose = |wanted: Option<&str>, actual: Option<&str>| match (wanted, actual) {
            (Some(lhs), Some(rhs)) => eq_ignore_case(lhs, rhs),
            _ => false,
        };

        let mut score = 0.0;
        if loose(context.kind.as_deref(), Some(poi.kind.as_str())) {
            score += weights.type_bonus;
        }
        if loose(context.weather.as_deref(), poi.weather.as_deref()) {
            score += weights.weather_bonus;
        }
        if loose(context.travel_type.as_deref(), poi.travel_type.as_deref()) {
            score += weights.travel_type_bonus;
        }
        score -= cost_penalty(poi, context, weights);
        if let Some(distance) = self.charged_distance(poi, context) {
            score -= distance * weights.geo_distance_factor;
        }
        score
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "cost penalty is a scaled absolute difference"
)]
fn cost_penalty(poi: &PointOfInterest, context: &Context, weights: ScoreWeights) -> f64 {
    poi.avg_cost
        .map_or(0.0, |cost| (cost - context.avg_cost).abs() / weights.cost_divisor)
}

/// The policy chosen for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Policy {
    /// Precomputed-attribute scoring.
    Feature(FeatureScorer),
    /// Live-distance scoring.
    Geo(GeoScorer),
}

impl Policy {
    /// Pick a policy from the dataset's columns and the caller's context.
    ///
    /// The geo policy is used when the caller sent a position and the dataset
    /// has coordinates. Otherwise a dataset with precomputed distances gets
    /// the feature policy, and anything else falls back to geo scoring.
    #[must_use]
    pub fn select(shape: DatasetShape, context: &Context, weights: ScoreWeights) -> Self {
        let policy = if context.position.is_some() && shape.has_coordinates {
            Self::Geo(GeoScorer::new(weights))
        } else if shape.has_distance_km {
            Self::Feature(FeatureScorer::new(weights))
        } else {
            Self::Geo(GeoScorer::new(weights))
        };
        debug!(
            "selected {} scoring (caller position: {}, coordinates: {}, distances: {})",
            policy.name(),
            context.position.is_some(),
            shape.has_coordinates,
            shape.has_distance_km
        );
        policy
    }
}

impl ScoringPolicy for Policy {
    fn name(&self) -> &'static str {
        match self {
            Self::Feature(inner) => inner.name(),
            Self::Geo(inner) => inner.name(),
        }
    }

    fn score(&self, poi: &PointOfInterest, context: &Context) -> f64 {
        match self {
            Self::Feature(inner) => inner.score(poi, context),
            Self::Geo(inner) => inner.score(poi, context),
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare floating-point results within a tolerance"
)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    const EPSILON: f64 = 1e-9;

    #[fixture]
    fn weights() -> ScoreWeights {
        ScoreWeights::default()
    }

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < EPSILON
    }

    fn tagged() -> PointOfInterest {
        PointOfInterest::new("Cubbon Park", "park")
            .with_weather("sunny")
            .with_travel_type("family")
    }

    #[rstest]
    #[case(Context::default(), 0.0)]
    #[case(Context::default().with_kind("park"), 2.0)]
    #[case(Context::default().with_weather("sunny"), 2.0)]
    #[case(Context::default().with_travel_type("family"), 1.0)]
    #[case(
        Context::default()
            .with_kind("park")
            .with_weather("sunny")
            .with_travel_type("family"),
        5.0
    )]
    #[case(Context::default().with_kind("Park"), 0.0)]
    fn feature_bonuses_are_exact_and_independent(
        weights: ScoreWeights,
        #[case] context: Context,
        #[case] expected: f64,
    ) {
        let score = FeatureScorer::new(weights).score(&tagged(), &context);
        assert!(close(score, expected), "score {score} != {expected}");
    }

    #[rstest]
    fn geo_bonuses_ignore_case(weights: ScoreWeights) {
        let context = Context::default()
            .with_kind("PARK")
            .with_weather(" Sunny ")
            .with_travel_type("Family");
        let score = GeoScorer::new(weights).score(&tagged(), &context);
        assert!(close(score, 5.0), "score {score}");
    }

    #[rstest]
    fn feature_penalties_scale_differences(weights: ScoreWeights) {
        let poi = PointOfInterest::new("Museum", "museum")
            .with_avg_cost(110.0)
            .with_distance_km(12.0)
            .with_open_hour(9);
        let mut context = Context::default().with_avg_cost(10.0);
        context.distance_km = 2.0;
        context.open_hour = 15;

        let score = FeatureScorer::new(weights).score(&poi, &context);

        assert!(close(score, -5.0), "score {score}");
    }

    #[rstest]
    fn missing_row_values_contribute_nothing(weights: ScoreWeights) {
        let poi = PointOfInterest::new("Bare", "park");
        let context = Context::default().with_avg_cost(500.0).with_position(0.0, 0.0);
        assert!(close(FeatureScorer::new(weights).score(&poi, &context), 0.0));
        assert!(close(GeoScorer::new(weights).score(&poi, &context), 0.0));
    }

    #[rstest]
    fn coincident_position_has_no_distance_penalty(weights: ScoreWeights) {
        let poi = PointOfInterest::new("Fort", "fort").with_location(12.97, 77.59);
        let here = Context::default().with_position(12.97, 77.59);
        let away = Context::default().with_position(13.97, 77.59);
        let scorer = GeoScorer::new(weights);

        assert!(close(scorer.score(&poi, &here), 0.0));
        assert!(scorer.score(&poi, &away) < scorer.score(&poi, &here));
    }

    #[rstest]
    fn missing_position_is_omitted_or_penalised(weights: ScoreWeights) {
        let poi = PointOfInterest::new("Fort", "fort").with_location(12.97, 77.59);
        let context = Context::default();

        let omitted = GeoScorer::new(weights).score(&poi, &context);
        let penalised =
            GeoScorer::new(weights.with_missing_position_penalty(50.0)).score(&poi, &context);

        assert!(close(omitted, 0.0));
        assert!(close(penalised, -10.0), "score {penalised}");
    }

    #[rstest]
    #[case(true, true, true, "geo")]
    #[case(false, true, true, "feature")]
    #[case(true, false, true, "feature")]
    #[case(false, true, false, "geo")]
    #[case(true, true, false, "geo")]
    fn selection_follows_position_and_columns(
        weights: ScoreWeights,
        #[case] with_position: bool,
        #[case] has_coordinates: bool,
        #[case] has_distance_km: bool,
        #[case] expected: &str,
    ) {
        let context = if with_position {
            Context::default().with_position(1.0, 1.0)
        } else {
            Context::default()
        };
        let shape = DatasetShape {
            has_coordinates,
            has_distance_km,
        };
        assert_eq!(Policy::select(shape, &context, weights).name(), expected);
    }

    fn tag(choice: u8, matching: &str) -> Option<String> {
        match choice {
            0 => None,
            1 => Some(matching.to_owned()),
            _ => Some("elsewhere".to_owned()),
        }
    }

    fn kind_field(context: &mut Context) -> &mut Option<String> {
        &mut context.kind
    }

    fn weather_field(context: &mut Context) -> &mut Option<String> {
        &mut context.weather
    }

    fn travel_type_field(context: &mut Context) -> &mut Option<String> {
        &mut context.travel_type
    }

    proptest! {
        #[test]
        fn each_bonus_is_added_exactly_once(
            kind in 0_u8..3,
            weather in 0_u8..3,
            travel_type in 0_u8..3,
            avg_cost in 0.0_f64..500.0,
            wanted_cost in 0.0_f64..500.0,
            open_hour in 0_u8..24,
        ) {
            let weights = ScoreWeights::default();
            let poi = tagged()
                .with_avg_cost(avg_cost)
                .with_open_hour(open_hour)
                .with_distance_km(3.0)
                .with_location(12.97, 77.59);
            let background = Context {
                kind: tag(kind, "park"),
                weather: tag(weather, "sunny"),
                travel_type: tag(travel_type, "family"),
                ..Context::default()
                    .with_avg_cost(wanted_cost)
                    .with_position(12.0, 77.0)
            };
            let toggles: [(fn(&mut Context) -> &mut Option<String>, &str, f64); 3] = [
                (kind_field, "park", weights.type_bonus),
                (weather_field, "sunny", weights.weather_bonus),
                (travel_type_field, "family", weights.travel_type_bonus),
            ];
            let policies = [
                Policy::Feature(FeatureScorer::new(weights)),
                Policy::Geo(GeoScorer::new(weights)),
            ];

            for (field, matching, bonus) in toggles {
                let mut with_match = background.clone();
                *field(&mut with_match) = Some(matching.to_owned());
                let mut without = background.clone();
                *field(&mut without) = None;
                for policy in policies {
                    let gained = policy.score(&poi, &with_match) - policy.score(&poi, &without);
                    prop_assert!(
                        close(gained, bonus),
                        "{} gained {gained}, expected {bonus}",
                        policy.name()
                    );
                }
            }
        }
    }
}
