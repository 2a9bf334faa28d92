//! Plain records handed back to callers.

use crate::distance::haversine_km;
use crate::rank::Scored;
use crate::{Context, PointOfInterest};

/// One ranked point of interest, flattened for serialisation.
///
/// `name`, `type`, `avg_cost`, `short_description` and `score` are always
/// present; the remaining fields appear only when the dataset provides them.
/// `real_distance` is the great-circle distance from the caller and is set
/// only when both the caller and the place have a position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Recommendation {
    /// Display name.
    pub name: String,
    /// Category tag.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    /// Average visit cost; `null` when the dataset value was unusable.
    pub avg_cost: Option<f64>,
    /// One-line description.
    pub short_description: String,
    /// Relevance score; higher is better.
    pub score: f64,
    /// Precomputed distance from the dataset.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub distance_km: Option<f64>,
    /// Distance from the caller in kilometres.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub real_distance: Option<f64>,
    /// Opening hour.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub open_hour: Option<u8>,
    /// Weather tag.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub weather: Option<String>,
    /// Travel type tag.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub travel_type: Option<String>,
    /// Budget band.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub budget_level: Option<String>,
    /// Country.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub country: Option<String>,
    /// State.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub state: Option<String>,
    /// City.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub city: Option<String>,
    /// Latitude in degrees.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub lat: Option<f64>,
    /// Longitude in degrees.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub lng: Option<f64>,
}

impl Recommendation {
    /// Flatten a scored place into a record for `context`.
    #[must_use]
    pub fn from_scored(scored: &Scored<'_>, context: &Context) -> Self {
        let poi: &PointOfInterest = scored.poi;
        let real_distance = context
            .position
            .zip(poi.location)
            .map(|(caller, place)| haversine_km(caller, place));
        Self {
            name: poi.name.clone(),
            kind: poi.kind.clone(),
            avg_cost: poi.avg_cost,
            short_description: poi.short_description.clone(),
            score: scored.score,
            distance_km: poi.distance_km,
            real_distance,
            open_hour: poi.open_hour,
            weather: poi.weather.clone(),
            travel_type: poi.travel_type.clone(),
            budget_level: poi.budget_level.clone(),
            country: poi.region.country.clone(),
            state: poi.region.state.clone(),
            city: poi.region.city.clone(),
            lat: poi.latitude(),
            lng: poi.longitude(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn real_distance_needs_both_positions() {
        let poi = PointOfInterest::new("Fort", "fort").with_location(12.0, 77.0);
        let scored = Scored {
            poi: &poi,
            score: 1.0,
        };

        let without = Recommendation::from_scored(&scored, &Context::default());
        assert!(without.real_distance.is_none());

        let with = Recommendation::from_scored(
            &scored,
            &Context::default().with_position(12.0, 77.0),
        );
        assert_eq!(with.real_distance, Some(0.0));
        assert_eq!(with.lat, Some(12.0));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn serialises_type_and_skips_absent_fields() {
        let poi = PointOfInterest::new("Cubbon", "park")
            .with_avg_cost(10.0)
            .with_description("Green lung");
        let scored = Scored {
            poi: &poi,
            score: 2.0,
        };
        let record = Recommendation::from_scored(&scored, &Context::default());
        let json = serde_json::to_value(&record).expect("serialise record");

        assert_eq!(json["type"], "park");
        assert_eq!(json["avg_cost"], 10.0);
        assert_eq!(json["short_description"], "Green lung");
        assert!(json.get("weather").is_none());
        assert!(json.get("real_distance").is_none());
    }
}
