//! Points of interest and their location hierarchy.

use geo::Coord;

/// Country, state and city tags attached to a point of interest.
///
/// Every level is optional; datasets without a location hierarchy leave all
/// three empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Region {
    /// Country name as written in the dataset.
    pub country: Option<String>,
    /// State, province or region name.
    pub state: Option<String>,
    /// City name.
    pub city: Option<String>,
}

/// A place worth visiting, as read from the dataset.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
/// Numeric fields are `None` when the source value was missing or could not
/// be parsed.
///
/// # Examples
/// ```
/// use rambler_core::PointOfInterest;
///
/// let poi = PointOfInterest::new("Lalbagh", "park")
///     .with_avg_cost(20.0)
///     .with_location(12.95, 77.58);
///
/// assert_eq!(poi.kind, "park");
/// assert_eq!(poi.latitude(), Some(12.95));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    /// Display name; identifies the row.
    pub name: String,
    /// Category tag such as `park` or `museum`.
    pub kind: String,
    /// Average visit cost in the dataset's currency.
    pub avg_cost: Option<f64>,
    /// Distance from a reference point, for datasets that precompute it.
    pub distance_km: Option<f64>,
    /// Geographic position.
    pub location: Option<Coord<f64>>,
    /// Opening hour in `0..=23`.
    pub open_hour: Option<u8>,
    /// Weather the place suits, e.g. `sunny`.
    pub weather: Option<String>,
    /// Travel style the place suits, e.g. `family`.
    pub travel_type: Option<String>,
    /// Budget band, e.g. `low`.
    pub budget_level: Option<String>,
    /// One-line description shown to the visitor.
    pub short_description: String,
    /// Location hierarchy.
    pub region: Region,
}

impl PointOfInterest {
    /// Construct a point of interest with a name and category and no other
    /// attributes.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            avg_cost: None,
            distance_km: None,
            location: None,
            open_hour: None,
            weather: None,
            travel_type: None,
            budget_level: None,
            short_description: String::new(),
            region: Region::default(),
        }
    }

    /// Set the average cost.
    #[must_use]
    pub fn with_avg_cost(mut self, avg_cost: f64) -> Self {
        self.avg_cost = Some(avg_cost);
        self
    }

    /// Set the precomputed distance.
    #[must_use]
    pub fn with_distance_km(mut self, distance_km: f64) -> Self {
        self.distance_km = Some(distance_km);
        self
    }

    /// Set the position from a latitude/longitude pair in degrees.
    #[must_use]
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some(Coord {
            x: longitude,
            y: latitude,
        });
        self
    }

    /// Set the opening hour.
    #[must_use]
    pub fn with_open_hour(mut self, open_hour: u8) -> Self {
        self.open_hour = Some(open_hour);
        self
    }

    /// Set the weather tag.
    #[must_use]
    pub fn with_weather(mut self, weather: impl Into<String>) -> Self {
        self.weather = Some(weather.into());
        self
    }

    /// Set the travel type tag.
    #[must_use]
    pub fn with_travel_type(mut self, travel_type: impl Into<String>) -> Self {
        self.travel_type = Some(travel_type.into());
        self
    }

    /// Set the budget level tag.
    #[must_use]
    pub fn with_budget_level(mut self, budget_level: impl Into<String>) -> Self {
        self.budget_level = Some(budget_level.into());
        self
    }

    /// Set the short description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.short_description = description.into();
        self
    }

    /// Set the location hierarchy.
    #[must_use]
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Latitude in degrees, if the position is known.
    #[must_use]
    pub fn latitude(&self) -> Option<f64> {
        self.location.map(|coord| coord.y)
    }

    /// Longitude in degrees, if the position is known.
    #[must_use]
    pub fn longitude(&self) -> Option<f64> {
        self.location.map(|coord| coord.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_stores_longitude_as_x() {
        let poi = PointOfInterest::new("Fort", "fort").with_location(10.0, 20.0);
        assert_eq!(poi.location, Some(Coord { x: 20.0, y: 10.0 }));
        assert_eq!(poi.longitude(), Some(20.0));
    }

    #[test]
    fn new_leaves_optional_fields_empty() {
        let poi = PointOfInterest::new("Fort", "fort");
        assert!(poi.avg_cost.is_none());
        assert!(poi.region.country.is_none());
        assert!(poi.short_description.is_empty());
    }
}
