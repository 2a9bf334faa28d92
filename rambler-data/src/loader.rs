//! CSV dataset loading.
//!
//! Loading is tolerant at the row level and strict at the file level: a
//! missing file or unusable header fails the whole load, while malformed or
//! incomplete rows are skipped and counted.

use camino::Utf8Path;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{info, warn};
use rambler_core::amount::{parse_amount, parse_hour};
use rambler_core::{Dataset, DatasetShape, PointOfInterest, Region};

use crate::DatasetError;
use crate::columns::{Column, ColumnMap};

/// Row counts gathered while loading a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Data rows encountered after the header.
    pub rows_read: usize,
    /// Rows kept in the dataset.
    pub rows_loaded: usize,
    /// Rows that could not be decoded or had no name.
    pub skipped_malformed: usize,
    /// Rows dropped because their geographic fields were missing.
    pub dropped_missing_geo: usize,
}

/// A dataset together with the report of how it was read.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    /// The loaded rows.
    pub dataset: Dataset,
    /// Row counts.
    pub report: LoadReport,
}

/// Load a points-of-interest CSV file.
///
/// Column names are trimmed and lowercased before matching, and common
/// aliases such as `latitude` or `description` are accepted. The file must
/// provide `name`, `type`, `avg_cost` and `short_description`, plus either
/// `lat`/`lng` or `distance_km`. When coordinates are present, rows lacking
/// either coordinate are dropped; otherwise rows lacking `distance_km` are.
///
/// # Errors
/// Returns [`DatasetError`] when the file cannot be opened, its header cannot
/// be read, or the header lacks mandatory columns.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use rambler_data::load_dataset;
///
/// let loaded = load_dataset(Utf8Path::new("data/places.csv")).expect("load dataset");
/// println!("{} places", loaded.dataset.len());
/// ```
pub fn load_dataset(path: &Utf8Path) -> Result<LoadedDataset, DatasetError> {
    let file = rambler_fs::open_file(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file);
    let headers = reader
        .headers()
        .map_err(|source| DatasetError::ReadHeader {
            path: path.to_path_buf(),
            source,
        })?;
    let columns = ColumnMap::from_headers(headers.iter());
    if let Some(column) = columns.first_missing_required() {
        return Err(DatasetError::MissingColumn {
            path: path.to_path_buf(),
            column: column.canonical(),
        });
    }
    let shape = columns.shape();
    if !shape.has_coordinates && !shape.has_distance_km {
        return Err(DatasetError::MissingGeoColumns {
            path: path.to_path_buf(),
        });
    }

    let mut report = LoadReport::default();
    let mut pois = Vec::new();
    for result in reader.records() {
        report.rows_read += 1;
        let Ok(record) = result else {
            report.skipped_malformed += 1;
            continue;
        };
        match decode_row(&record, &columns, shape) {
            RowOutcome::Keep(poi) => pois.push(*poi),
            RowOutcome::Malformed => report.skipped_malformed += 1,
            RowOutcome::MissingGeo => report.dropped_missing_geo += 1,
        }
    }
    report.rows_loaded = pois.len();

    if report.skipped_malformed > 0 {
        warn!(
            "skipped {} malformed row(s) in {path}",
            report.skipped_malformed
        );
    }
    if report.dropped_missing_geo > 0 {
        warn!(
            "dropped {} row(s) without geographic fields from {path}",
            report.dropped_missing_geo
        );
    }
    info!(
        "loaded {} of {} row(s) from {path}",
        report.rows_loaded, report.rows_read
    );

    Ok(LoadedDataset {
        dataset: Dataset::new(pois, shape),
        report,
    })
}

enum RowOutcome {
    Keep(Box<PointOfInterest>),
    Malformed,
    MissingGeo,
}

fn decode_row(record: &StringRecord, columns: &ColumnMap, shape: DatasetShape) -> RowOutcome {
    if record.len() > columns.width() {
        return RowOutcome::Malformed;
    }
    let cell = |column: Column| {
        columns
            .position(column)
            .and_then(|index| record.get(index))
            .filter(|value| !value.is_empty())
    };
    let text = |column: Column| cell(column).map(str::to_owned);

    let Some(name) = text(Column::Name) else {
        return RowOutcome::Malformed;
    };
    let mut poi = PointOfInterest::new(name, text(Column::Kind).unwrap_or_default());
    poi.avg_cost = cell(Column::AvgCost).and_then(parse_amount);
    poi.distance_km = cell(Column::DistanceKm).and_then(parse_amount);
    poi.open_hour = cell(Column::OpenHour).and_then(parse_hour);
    poi.weather = text(Column::Weather);
    poi.travel_type = text(Column::TravelType);
    poi.budget_level = text(Column::BudgetLevel);
    poi.short_description = text(Column::ShortDescription).unwrap_or_default();
    poi.region = Region {
        country: text(Column::Country),
        state: text(Column::State),
        city: text(Column::City),
    };

    if shape.has_coordinates {
        let latitude =
            cell(Column::Latitude).and_then(|raw| parse_coordinate(raw, (-90.0, 90.0)));
        let longitude =
            cell(Column::Longitude).and_then(|raw| parse_coordinate(raw, (-180.0, 180.0)));
        let (Some(lat), Some(lng)) = (latitude, longitude) else {
            return RowOutcome::MissingGeo;
        };
        poi = poi.with_location(lat, lng);
    } else if poi.distance_km.is_none() {
        return RowOutcome::MissingGeo;
    }
    RowOutcome::Keep(Box::new(poi))
}

/// Parse a coordinate in degrees, rejecting values outside `min..=max`.
fn parse_coordinate(raw: &str, (min, max): (f64, f64)) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| (min..=max).contains(value))
}
