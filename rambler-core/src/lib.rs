//! Core domain types for the Rambler recommendation engine.
//!
//! The crate holds everything that is pure and I/O free:
//! - [`PointOfInterest`] rows and the immutable [`Dataset`] they live in.
//! - [`RecommendationRequest`] as received from a caller and the normalised
//!   [`Context`] derived from it.
//! - The filter, scoring and ranking stages that turn a context into an
//!   ordered list of [`Recommendation`] records.
//!
//! Loading datasets lives in `rambler-data`; concrete scoring policies and the
//! recommender service live in `rambler-scorer`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod amount;
pub mod context;
pub mod dataset;
pub mod distance;
pub mod filter;
pub mod poi;
pub mod rank;
pub mod record;
pub mod scorer;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use context::{
    Context, ContextError, DEFAULT_TOP_K, NumericInput, RecommendationRequest, current_hour,
};
pub use dataset::{Dataset, DatasetShape, LocationIndex};
pub use distance::{EARTH_RADIUS_KM, haversine_km};
pub use filter::LocationFilter;
pub use poi::{PointOfInterest, Region};
pub use rank::{Scored, rank, recommend, select_top_k};
pub use record::Recommendation;
pub use scorer::ScoringPolicy;
