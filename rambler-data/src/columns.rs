//! Header normalisation and column lookup.

use rambler_core::DatasetShape;

/// Columns the loader understands, after normalisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Column {
    Name,
    Kind,
    AvgCost,
    ShortDescription,
    DistanceKm,
    Latitude,
    Longitude,
    OpenHour,
    Weather,
    TravelType,
    BudgetLevel,
    Country,
    State,
    City,
}

impl Column {
    /// Map a raw header cell to a column, accepting common aliases.
    pub(crate) fn from_header(raw: &str) -> Option<Self> {
        let normalised = normalise_header(raw);
        let column = match normalised.as_str() {
            "name" => Self::Name,
            "type" => Self::Kind,
            "avg_cost" => Self::AvgCost,
            "short_description" | "description" => Self::ShortDescription,
            "distance_km" | "distance" => Self::DistanceKm,
            "lat" | "latitude" => Self::Latitude,
            "lng" | "lon" | "longitude" => Self::Longitude,
            "open_hour" => Self::OpenHour,
            "weather" => Self::Weather,
            "travel_type" => Self::TravelType,
            "budget_level" => Self::BudgetLevel,
            "country" => Self::Country,
            "state" => Self::State,
            "city" => Self::City,
            _ => return None,
        };
        Some(column)
    }

    /// Canonical name used in error messages.
    pub(crate) const fn canonical(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Kind => "type",
            Self::AvgCost => "avg_cost",
            Self::ShortDescription => "short_description",
            Self::DistanceKm => "distance_km",
            Self::Latitude => "lat",
            Self::Longitude => "lng",
            Self::OpenHour => "open_hour",
            Self::Weather => "weather",
            Self::TravelType => "travel_type",
            Self::BudgetLevel => "budget_level",
            Self::Country => "country",
            Self::State => "state",
            Self::City => "city",
        }
    }
}

/// Trim and lowercase a header cell.
pub(crate) fn normalise_header(raw: &str) -> String {
    raw.trim().trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Positions of the recognised columns within a record.
///
/// The first occurrence wins when a header repeats a column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ColumnMap {
    positions: Vec<(Column, usize)>,
    width: usize,
}

impl ColumnMap {
    pub(crate) fn from_headers<'h>(headers: impl IntoIterator<Item = &'h str>) -> Self {
        let mut map = Self::default();
        for (index, raw) in headers.into_iter().enumerate() {
            map.width = index + 1;
            if let Some(column) = Column::from_header(raw) {
                if map.position(column).is_none() {
                    map.positions.push((column, index));
                }
            }
        }
        map
    }

    pub(crate) fn position(&self, column: Column) -> Option<usize> {
        self.positions
            .iter()
            .find_map(|(known, index)| (*known == column).then_some(*index))
    }

    /// Number of cells in the header row.
    pub(crate) const fn width(&self) -> usize {
        self.width
    }

    /// First mandatory column the header lacks.
    pub(crate) fn first_missing_required(&self) -> Option<Column> {
        [
            Column::Name,
            Column::Kind,
            Column::AvgCost,
            Column::ShortDescription,
        ]
        .into_iter()
        .find(|column| self.position(*column).is_none())
    }

    pub(crate) fn shape(&self) -> DatasetShape {
        DatasetShape {
            has_coordinates: self.position(Column::Latitude).is_some()
                && self.position(Column::Longitude).is_some(),
            has_distance_km: self.position(Column::DistanceKm).is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(" Name ", Some(Column::Name))]
    #[case("TYPE", Some(Column::Kind))]
    #[case("\u{feff}name", Some(Column::Name))]
    #[case("Latitude", Some(Column::Latitude))]
    #[case("lon", Some(Column::Longitude))]
    #[case("Distance", Some(Column::DistanceKm))]
    #[case("description", Some(Column::ShortDescription))]
    #[case("rating", None)]
    fn headers_normalise_to_columns(#[case] raw: &str, #[case] expected: Option<Column>) {
        assert_eq!(Column::from_header(raw), expected);
    }

    #[rstest]
    fn first_duplicate_column_wins() {
        let map = ColumnMap::from_headers(["name", "lat", "latitude", "type"]);
        assert_eq!(map.position(Column::Latitude), Some(1));
        assert_eq!(map.width(), 4);
    }

    #[rstest]
    #[case(&["name", "type", "avg_cost"], Some(Column::ShortDescription))]
    #[case(&["type", "avg_cost", "short_description"], Some(Column::Name))]
    #[case(&["name", "type", "avg_cost", "description"], None)]
    fn reports_first_missing_required_column(
        #[case] headers: &[&str],
        #[case] expected: Option<Column>,
    ) {
        let map = ColumnMap::from_headers(headers.iter().copied());
        assert_eq!(map.first_missing_required(), expected);
    }

    #[rstest]
    #[case(&["lat", "lng"], true, false)]
    #[case(&["lat", "distance_km"], false, true)]
    #[case(&["latitude", "longitude", "distance"], true, true)]
    fn shape_follows_geo_columns(
        #[case] headers: &[&str],
        #[case] coordinates: bool,
        #[case] distance: bool,
    ) {
        let shape = ColumnMap::from_headers(headers.iter().copied()).shape();
        assert_eq!(shape.has_coordinates, coordinates);
        assert_eq!(shape.has_distance_km, distance);
    }
}
