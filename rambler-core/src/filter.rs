//! Narrow a dataset to the places matching a caller's location and category.
//!
//! Matching is case-insensitive and ignores surrounding whitespace. Fields the
//! caller leaves unspecified impose no constraint; a place lacking a value for
//! a specified field never matches it.

use crate::{Context, PointOfInterest};

/// Categorical constraints applied before scoring.
///
/// # Examples
/// ```
/// use rambler_core::{LocationFilter, PointOfInterest};
///
/// let filter = LocationFilter {
///     kind: Some("Park"),
///     ..LocationFilter::default()
/// };
/// assert!(filter.matches(&PointOfInterest::new("Cubbon", "park")));
/// assert!(!filter.matches(&PointOfInterest::new("Fort", "fort")));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocationFilter<'a> {
    /// Required country.
    pub country: Option<&'a str>,
    /// Required state.
    pub state: Option<&'a str>,
    /// Required city.
    pub city: Option<&'a str>,
    /// Required category.
    pub kind: Option<&'a str>,
}

impl<'a> LocationFilter<'a> {
    /// Build the filter described by a normalised context.
    #[must_use]
    pub fn from_context(context: &'a Context) -> Self {
        Self {
            country: context.country.as_deref(),
            state: context.state.as_deref(),
            city: context.city.as_deref(),
            kind: context.kind.as_deref(),
        }
    }

    /// Number of fields that constrain the candidate set.
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        [self.country, self.state, self.city, self.kind]
            .iter()
            .filter(|field| field.is_some())
            .count()
    }

    /// Report whether `poi` satisfies every specified field.
    #[must_use]
    pub fn matches(&self, poi: &PointOfInterest) -> bool {
        field_matches(self.country, poi.region.country.as_deref())
            && field_matches(self.state, poi.region.state.as_deref())
            && field_matches(self.city, poi.region.city.as_deref())
            && field_matches(self.kind, Some(poi.kind.as_str()))
    }

    /// Yield the matching places in their original order.
    pub fn apply<'p>(
        &self,
        pois: &'p [PointOfInterest],
    ) -> impl Iterator<Item = &'p PointOfInterest> {
        pois.iter().filter(move |poi| self.matches(poi))
    }
}

/// Case-insensitive comparison after trimming.
#[must_use]
pub fn eq_ignore_case(left: &str, right: &str) -> bool {
    let lhs = left.trim();
    let rhs = right.trim();
    lhs.eq_ignore_ascii_case(rhs) || lhs.to_lowercase() == rhs.to_lowercase()
}

fn field_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match (wanted, actual) {
        (None, _) => true,
        (Some(expected), Some(value)) => eq_ignore_case(expected, value),
        (Some(_), None) => false,
    }
}
