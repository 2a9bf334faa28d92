//! Tunable constants of the composite relevance score.

use crate::RecommendError;

/// How the geo policy treats a caller who sent no position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MissingPosition {
    /// Leave the distance term out of the score.
    #[default]
    Omit,
    /// Charge every row as if it were `distance_km` away.
    Penalise {
        /// Assumed distance in kilometres.
        distance_km: f64,
    },
}

/// Bonuses, divisors and factors applied by the scoring policies.
///
/// The defaults award `+2` for a matching type, `+2` for matching weather and
/// `+1` for a matching travel type. Penalties divide the cost difference by
/// 50, the precomputed distance difference by 5 and the opening-hour
/// difference by 6, and multiply live distance by 0.2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Bonus for a matching category.
    pub type_bonus: f64,
    /// Bonus for matching weather.
    pub weather_bonus: f64,
    /// Bonus for a matching travel type.
    pub travel_type_bonus: f64,
    /// Divisor for the absolute cost difference.
    pub cost_divisor: f64,
    /// Divisor for the absolute precomputed-distance difference.
    pub distance_divisor: f64,
    /// Multiplier for the great-circle distance from the caller.
    pub geo_distance_factor: f64,
    /// Divisor for the absolute opening-hour difference.
    pub hour_divisor: f64,
    /// Treatment of callers without a position.
    pub missing_position: MissingPosition,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            type_bonus: 2.0,
            weather_bonus: 2.0,
            travel_type_bonus: 1.0,
            cost_divisor: 50.0,
            distance_divisor: 5.0,
            geo_distance_factor: 0.2,
            hour_divisor: 6.0,
            missing_position: MissingPosition::Omit,
        }
    }
}

impl ScoreWeights {
    /// Use a sentinel distance for callers without a position.
    #[must_use]
    pub const fn with_missing_position_penalty(mut self, distance_km: f64) -> Self {
        self.missing_position = MissingPosition::Penalise { distance_km };
        self
    }

    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`RecommendError::InvalidWeights`] when a value is not finite,
    /// a bonus or factor is negative, a divisor is not strictly positive, or
    /// the sentinel distance is negative.
    pub fn validate(self) -> Result<Self, RecommendError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(RecommendError::InvalidWeights)
        }
    }

    fn is_valid(self) -> bool {
        let non_negative = [
            self.type_bonus,
            self.weather_bonus,
            self.travel_type_bonus,
            self.geo_distance_factor,
        ];
        let divisors = [self.cost_divisor, self.distance_divisor, self.hour_divisor];
        let sentinel_ok = match self.missing_position {
            MissingPosition::Omit => true,
            MissingPosition::Penalise { distance_km } => {
                distance_km.is_finite() && distance_km >= 0.0
            }
        };
        non_negative
            .iter()
            .all(|value| value.is_finite() && *value >= 0.0)
            && divisors
                .iter()
                .all(|value| value.is_finite() && *value > 0.0)
            && sentinel_ok
    }
}
