//! Caller preferences for a single recommendation call.
//!
//! A [`RecommendationRequest`] mirrors what a client sends: every field is
//! optional and numeric fields may arrive as numbers or as loosely formatted
//! text. [`Context::from_request`] is the single place where those values are
//! coerced and defaulted, so scoring code only ever sees a fully populated
//! [`Context`].

use std::num::NonZeroUsize;

use geo::Coord;
use thiserror::Error;

use crate::amount::{Meridiem, hour_from_f64, parse_amount, parse_hour};

/// Number of results returned when the caller does not ask for a specific
/// amount.
pub const DEFAULT_TOP_K: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(value) => value,
    None => NonZeroUsize::MIN,
};

/// Opening hour assumed by [`Context::default`].
pub const DEFAULT_OPEN_HOUR: u8 = 12;

/// A numeric request value, accepted either as a number or as text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum NumericInput {
    /// A plain number.
    Number(f64),
    /// Text that should contain a number, e.g. `"₹250"`.
    Text(String),
}

impl NumericInput {
    /// Coerce the value to a finite number, if possible.
    #[must_use]
    pub fn coerce(&self) -> Option<f64> {
        match self {
            Self::Number(value) => value.is_finite().then_some(*value),
            Self::Text(raw) => parse_amount(raw),
        }
    }

    fn raw(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(raw) => raw.clone(),
        }
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Raw preferences supplied by a caller.
///
/// # Examples
/// ```
/// use rambler_core::{Context, RecommendationRequest};
///
/// let request = RecommendationRequest {
///     kind: Some("park".into()),
///     avg_cost: Some("₹40".into()),
///     ..RecommendationRequest::default()
/// };
/// let context = Context::from_request_at(&request, 9).expect("valid request");
/// assert_eq!(context.avg_cost, 40.0);
/// assert_eq!(context.open_hour, 9);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RecommendationRequest {
    /// Only consider places in this country.
    pub country: Option<String>,
    /// Only consider places in this state.
    pub state: Option<String>,
    /// Only consider places in this city.
    pub city: Option<String>,
    /// Preferred category; filters candidates and earns a bonus.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: Option<String>,
    /// Budget per visit.
    pub avg_cost: Option<NumericInput>,
    /// Preferred distance for datasets with precomputed distances.
    pub distance_km: Option<NumericInput>,
    /// Hour of the visit.
    pub open_hour: Option<NumericInput>,
    /// Current or expected weather.
    pub weather: Option<String>,
    /// Travel style.
    pub travel_type: Option<String>,
    /// Budget band.
    pub budget_level: Option<String>,
    /// Caller latitude in degrees.
    #[cfg_attr(feature = "serde", serde(alias = "lat"))]
    pub user_lat: Option<NumericInput>,
    /// Caller longitude in degrees.
    #[cfg_attr(feature = "serde", serde(alias = "lon", alias = "lng"))]
    pub user_lng: Option<NumericInput>,
    /// Maximum number of results.
    pub top_k: Option<usize>,
}

/// Errors raised when a request value cannot be coerced at all.
#[derive(Debug, Error, PartialEq)]
pub enum ContextError {
    /// A numeric field held text without digits.
    #[error("{field} value {raw:?} is not numeric")]
    NotNumeric {
        /// Request field name.
        field: &'static str,
        /// Value as supplied.
        raw: String,
    },
    /// A numeric field was outside its valid range.
    #[error("{field} value {value} is outside {min}..={max}")]
    OutOfRange {
        /// Request field name.
        field: &'static str,
        /// Coerced value.
        value: f64,
        /// Smallest accepted value.
        min: f64,
        /// Largest accepted value.
        max: f64,
    },
    /// `top_k` was zero.
    #[error("top_k must be a positive integer")]
    ZeroTopK,
}

/// Fully defaulted, strongly typed preferences used by the scoring stages.
///
/// Text fields are trimmed; blank text counts as unspecified.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    /// Country filter.
    pub country: Option<String>,
    /// State filter.
    pub state: Option<String>,
    /// City filter.
    pub city: Option<String>,
    /// Category filter and bonus.
    pub kind: Option<String>,
    /// Weather bonus.
    pub weather: Option<String>,
    /// Travel type bonus.
    pub travel_type: Option<String>,
    /// Budget band, used by the classifier.
    pub budget_level: Option<String>,
    /// Budget per visit; `0.0` when unspecified.
    pub avg_cost: f64,
    /// Preferred precomputed distance; `0.0` when unspecified.
    pub distance_km: f64,
    /// Hour of the visit; the current hour when unspecified.
    pub open_hour: u8,
    /// Caller position, present only when both coordinates were supplied.
    pub position: Option<Coord<f64>>,
    /// Maximum number of results.
    pub top_k: NonZeroUsize,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            country: None,
            state: None,
            city: None,
            kind: None,
            weather: None,
            travel_type: None,
            budget_level: None,
            avg_cost: 0.0,
            distance_km: 0.0,
            open_hour: DEFAULT_OPEN_HOUR,
            position: None,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl Context {
    /// Normalise a request, defaulting the visit hour to the current local
    /// hour.
    ///
    /// # Errors
    /// Returns [`ContextError`] when a supplied value cannot be coerced.
    pub fn from_request(request: &RecommendationRequest) -> Result<Self, ContextError> {
        Self::from_request_at(request, current_hour())
    }

    /// Normalise a request, defaulting the visit hour to `fallback_hour`.
    ///
    /// # Errors
    /// Returns [`ContextError`] when a numeric field has no digits, a
    /// coordinate or hour is out of range, or `top_k` is zero.
    pub fn from_request_at(
        request: &RecommendationRequest,
        fallback_hour: u8,
    ) -> Result<Self, ContextError> {
        let avg_cost = coerce_field("avg_cost", request.avg_cost.as_ref())?.unwrap_or(0.0);
        let distance_km =
            coerce_field("distance_km", request.distance_km.as_ref())?.unwrap_or(0.0);
        let open_hour = match coerce_field("open_hour", request.open_hour.as_ref())? {
            Some(value) => coerce_hour(request.open_hour.as_ref(), value).ok_or(
                ContextError::OutOfRange {
                    field: "open_hour",
                    value,
                    min: 0.0,
                    max: 23.0,
                },
            )?,
            None => fallback_hour.min(23),
        };
        let top_k = match request.top_k {
            Some(value) => NonZeroUsize::new(value).ok_or(ContextError::ZeroTopK)?,
            None => DEFAULT_TOP_K,
        };

        Ok(Self {
            country: clean_text(request.country.as_deref()),
            state: clean_text(request.state.as_deref()),
            city: clean_text(request.city.as_deref()),
            kind: clean_text(request.kind.as_deref()),
            weather: clean_text(request.weather.as_deref()),
            travel_type: clean_text(request.travel_type.as_deref()),
            budget_level: clean_text(request.budget_level.as_deref()),
            avg_cost,
            distance_km,
            open_hour,
            position: position(request)?,
            top_k,
        })
    }

    /// Set the category.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set the weather.
    #[must_use]
    pub fn with_weather(mut self, weather: impl Into<String>) -> Self {
        self.weather = Some(weather.into());
        self
    }

    /// Set the travel type.
    #[must_use]
    pub fn with_travel_type(mut self, travel_type: impl Into<String>) -> Self {
        self.travel_type = Some(travel_type.into());
        self
    }

    /// Set the budget per visit.
    #[must_use]
    pub fn with_avg_cost(mut self, avg_cost: f64) -> Self {
        self.avg_cost = avg_cost;
        self
    }

    /// Set the caller position from a latitude/longitude pair.
    #[must_use]
    pub fn with_position(mut self, latitude: f64, longitude: f64) -> Self {
        self.position = Some(Coord {
            x: longitude,
            y: latitude,
        });
        self
    }

    /// Set the result limit.
    #[must_use]
    pub fn with_top_k(mut self, top_k: NonZeroUsize) -> Self {
        self.top_k = top_k;
        self
    }
}

/// Return the current local hour of day.
#[must_use]
pub fn current_hour() -> u8 {
    u8::try_from(jiff::Zoned::now().hour()).unwrap_or(DEFAULT_OPEN_HOUR)
}

/// Hour of day for a coerced `open_hour`; text with an `am`/`pm` suffix is
/// read as a clock hour.
fn coerce_hour(input: Option<&NumericInput>, value: f64) -> Option<u8> {
    match input {
        Some(NumericInput::Text(raw)) if Meridiem::from_suffix(raw).is_some() => parse_hour(raw),
        _ => hour_from_f64(value),
    }
}

fn coerce_field(
    field: &'static str,
    input: Option<&NumericInput>,
) -> Result<Option<f64>, ContextError> {
    let Some(value) = input else {
        return Ok(None);
    };
    if let NumericInput::Text(raw) = value
        && raw.trim().is_empty()
    {
        return Ok(None);
    }
    value.coerce().map(Some).ok_or_else(|| ContextError::NotNumeric {
        field,
        raw: value.raw(),
    })
}

fn coerce_coordinate(
    field: &'static str,
    input: Option<&NumericInput>,
    (min, max): (f64, f64),
) -> Result<Option<f64>, ContextError> {
    let Some(value) = coerce_field(field, input)? else {
        return Ok(None);
    };
    if (min..=max).contains(&value) {
        Ok(Some(value))
    } else {
        Err(ContextError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn position(request: &RecommendationRequest) -> Result<Option<Coord<f64>>, ContextError> {
    let latitude = coerce_coordinate("user_lat", request.user_lat.as_ref(), (-90.0, 90.0))?;
    let longitude =
        coerce_coordinate("user_lng", request.user_lng.as_ref(), (-180.0, 180.0))?;
    Ok(latitude
        .zip(longitude)
        .map(|(lat, lng)| Coord { x: lng, y: lat }))
}

fn clean_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_request_uses_defaults() {
        let context =
            Context::from_request_at(&RecommendationRequest::default(), 17).expect("defaults");
        assert_eq!(context.avg_cost, 0.0);
        assert_eq!(context.distance_km, 0.0);
        assert_eq!(context.open_hour, 17);
        assert_eq!(context.top_k, DEFAULT_TOP_K);
        assert!(context.position.is_none());
    }

    #[rstest]
    #[case(NumericInput::Number(12.5), 12.5)]
    #[case(NumericInput::from("₹1,500"), 1500.0)]
    #[case(NumericInput::from("  "), 0.0)]
    fn avg_cost_is_coerced(#[case] input: NumericInput, #[case] expected: f64) {
        let request = RecommendationRequest {
            avg_cost: Some(input),
            ..RecommendationRequest::default()
        };
        let context = Context::from_request_at(&request, 12).expect("coercible cost");
        assert_eq!(context.avg_cost, expected);
    }

    #[rstest]
    fn avg_cost_without_digits_is_rejected() {
        let request = RecommendationRequest {
            avg_cost: Some(NumericInput::from("cheap")),
            ..RecommendationRequest::default()
        };
        let err = Context::from_request_at(&request, 12).expect_err("not numeric");
        assert_eq!(
            err,
            ContextError::NotNumeric {
                field: "avg_cost",
                raw: "cheap".to_owned(),
            }
        );
    }

    #[rstest]
    #[case(NumericInput::Number(24.0))]
    #[case(NumericInput::Number(-1.0))]
    #[case(NumericInput::from("13 pm"))]
    fn open_hour_outside_day_is_rejected(#[case] input: NumericInput) {
        let request = RecommendationRequest {
            open_hour: Some(input),
            ..RecommendationRequest::default()
        };
        let err = Context::from_request_at(&request, 12).expect_err("out of range");
        assert!(matches!(
            err,
            ContextError::OutOfRange {
                field: "open_hour",
                ..
            }
        ));
    }

    #[rstest]
    #[case(NumericInput::from("9 PM"), 21)]
    #[case(NumericInput::from("12 am"), 0)]
    #[case(NumericInput::from("18:30"), 18)]
    #[case(NumericInput::Number(7.5), 7)]
    fn open_hour_reads_clock_suffixes(#[case] input: NumericInput, #[case] expected: u8) {
        let request = RecommendationRequest {
            open_hour: Some(input),
            ..RecommendationRequest::default()
        };
        let context = Context::from_request_at(&request, 12).expect("valid hour");
        assert_eq!(context.open_hour, expected);
    }

    #[rstest]
    fn zero_top_k_is_rejected() {
        let request = RecommendationRequest {
            top_k: Some(0),
            ..RecommendationRequest::default()
        };
        assert_eq!(
            Context::from_request_at(&request, 12),
            Err(ContextError::ZeroTopK)
        );
    }

    #[rstest]
    fn partial_position_is_ignored() {
        let request = RecommendationRequest {
            user_lat: Some(NumericInput::Number(12.0)),
            ..RecommendationRequest::default()
        };
        let context = Context::from_request_at(&request, 12).expect("partial position");
        assert!(context.position.is_none());
    }

    #[rstest]
    fn latitude_out_of_range_is_rejected() {
        let request = RecommendationRequest {
            user_lat: Some(NumericInput::Number(91.0)),
            user_lng: Some(NumericInput::Number(0.0)),
            ..RecommendationRequest::default()
        };
        let err = Context::from_request_at(&request, 12).expect_err("latitude range");
        assert!(matches!(
            err,
            ContextError::OutOfRange {
                field: "user_lat",
                ..
            }
        ));
    }

    #[rstest]
    fn blank_text_counts_as_unspecified() {
        let request = RecommendationRequest {
            country: Some("   ".to_owned()),
            kind: Some(" park ".to_owned()),
            ..RecommendationRequest::default()
        };
        let context = Context::from_request_at(&request, 12).expect("text fields");
        assert!(context.country.is_none());
        assert_eq!(context.kind.as_deref(), Some("park"));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialises_client_payload() {
        let payload = r#"{
            "type": "museum",
            "avg_cost": "₹200",
            "distance_km": 3,
            "open_hour": 10,
            "lat": 12.97,
            "lon": 77.59,
            "top_k": 3
        }"#;
        let request: RecommendationRequest =
            serde_json::from_str(payload).expect("payload should deserialise");
        let context = Context::from_request_at(&request, 0).expect("valid payload");
        assert_eq!(context.kind.as_deref(), Some("museum"));
        assert_eq!(context.avg_cost, 200.0);
        assert_eq!(context.distance_km, 3.0);
        assert_eq!(context.open_hour, 10);
        assert_eq!(context.position, Some(Coord { x: 77.59, y: 12.97 }));
        assert_eq!(context.top_k.get(), 3);
    }
}
