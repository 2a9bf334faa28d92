//! Score points of interest against a caller's context.
//!
//! The `ScoringPolicy` trait assigns a relevance score to a
//! [`PointOfInterest`](crate::PointOfInterest) given a normalised
//! [`Context`](crate::Context). Concrete policies live in `rambler-scorer`.

use crate::{Context, PointOfInterest};

/// Calculate a relevance score for a point of interest.
///
/// Higher scores indicate a better match. Scores are unbounded real numbers:
/// categorical matches add bonuses and numeric mismatches subtract penalties,
/// so negative values are normal. Implementations must be thread-safe
/// (`Send` + `Sync`) so one policy can serve concurrent requests, and must not
/// mutate the point of interest or the context.
///
/// # Examples
///
/// ```rust
/// use rambler_core::{Context, PointOfInterest, ScoringPolicy};
///
/// struct CheapestFirst;
///
/// impl ScoringPolicy for CheapestFirst {
///     fn name(&self) -> &'static str {
///         "cheapest-first"
///     }
///
///     fn score(&self, poi: &PointOfInterest, _context: &Context) -> f64 {
///         -poi.avg_cost.unwrap_or(0.0)
///     }
/// }
///
/// let poi = PointOfInterest::new("Fort", "fort").with_avg_cost(30.0);
/// assert_eq!(CheapestFirst.score(&poi, &Context::default()), -30.0);
/// ```
pub trait ScoringPolicy: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Return a score for `poi` according to `context`.
    fn score(&self, poi: &PointOfInterest, context: &Context) -> f64;
}

/// Make a raw score safe to sort.
///
/// `NaN` becomes negative infinity so it ranks last, and negative zero becomes
/// positive zero so it ties with zero.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "adding positive zero folds negative zero into positive zero"
)]
pub fn sanitise(score: f64) -> f64 {
    if score.is_nan() {
        return f64::NEG_INFINITY;
    }
    score + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(f64::NAN, f64::NEG_INFINITY)]
    #[case(-0.0, 0.0)]
    #[case(-2.5, -2.5)]
    #[case(f64::INFINITY, f64::INFINITY)]
    fn sanitise_orders_safely(#[case] raw: f64, #[case] expected: f64) {
        let cleaned = sanitise(raw);
        assert_eq!(cleaned.total_cmp(&expected), std::cmp::Ordering::Equal);
    }
}
