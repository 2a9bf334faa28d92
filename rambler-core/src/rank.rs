//! Filter, score and select the best candidates.
//!
//! Ranking is a function of score alone. The sort is stable, so places with
//! equal scores keep their dataset order and repeated calls over the same
//! data return identical results.

use std::num::NonZeroUsize;

use crate::filter::LocationFilter;
use crate::record::Recommendation;
use crate::scorer::{ScoringPolicy, sanitise};
use crate::{Context, PointOfInterest};

/// A candidate paired with its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored<'a> {
    /// The candidate.
    pub poi: &'a PointOfInterest,
    /// Its sanitised score.
    pub score: f64,
}

/// Sort by descending score and keep at most `top_k` entries.
///
/// Never pads: fewer than `top_k` inputs yield all of them.
#[must_use]
pub fn select_top_k(mut scored: Vec<Scored<'_>>, top_k: NonZeroUsize) -> Vec<Scored<'_>> {
    scored.sort_by(|left, right| right.score.total_cmp(&left.score));
    scored.truncate(top_k.get());
    scored
}

/// Run the filter, scoring and selection stages over `pois`.
#[must_use]
pub fn rank<'a>(
    pois: &'a [PointOfInterest],
    context: &Context,
    policy: &dyn ScoringPolicy,
) -> Vec<Scored<'a>> {
    let filter = LocationFilter::from_context(context);
    let scored = filter
        .apply(pois)
        .map(|poi| Scored {
            poi,
            score: sanitise(policy.score(poi, context)),
        })
        .collect();
    select_top_k(scored, context.top_k)
}

/// Rank `pois` and flatten the winners into records.
///
/// An empty result means nothing matched the filter; it is not an error.
///
/// # Examples
/// ```
/// use rambler_core::{Context, PointOfInterest, ScoringPolicy, recommend};
///
/// struct ByCost;
///
/// impl ScoringPolicy for ByCost {
///     fn name(&self) -> &'static str {
///         "by-cost"
///     }
///
///     fn score(&self, poi: &PointOfInterest, _context: &Context) -> f64 {
///         -poi.avg_cost.unwrap_or(0.0)
///     }
/// }
///
/// let pois = vec![
///     PointOfInterest::new("Dear", "park").with_avg_cost(50.0),
///     PointOfInterest::new("Cheap", "park").with_avg_cost(5.0),
/// ];
/// let records = recommend(&pois, &Context::default(), &ByCost);
/// assert_eq!(records[0].name, "Cheap");
/// ```
#[must_use]
pub fn recommend(
    pois: &[PointOfInterest],
    context: &Context,
    policy: &dyn ScoringPolicy,
) -> Vec<Recommendation> {
    rank(pois, context, policy)
        .iter()
        .map(|scored| Recommendation::from_scored(scored, context))
        .collect()
}
