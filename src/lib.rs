//! Facade crate for the Rambler recommendation engine.
//!
//! This crate re-exports the core domain types and exposes the dataset
//! loader and the recommender service behind feature flags.
//!
//! ```no_run
//! # #[cfg(feature = "scorer")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use camino::Utf8Path;
//! use rambler_engine::{RecommendationRequest, Recommender};
//!
//! let recommender = Recommender::from_path(Utf8Path::new("places.csv"))?;
//! let request = RecommendationRequest {
//!     city: Some("Bengaluru".into()),
//!     ..RecommendationRequest::default()
//! };
//! for place in recommender.recommend(&request)?.results {
//!     println!("{} ({:.2})", place.name, place.score);
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "scorer"))]
//! # fn main() {}
//! ```

#![forbid(unsafe_code)]

pub use rambler_core::{
    Context, ContextError, Dataset, DatasetShape, LocationIndex, NumericInput, PointOfInterest,
    Recommendation, RecommendationRequest, Region, ScoringPolicy, haversine_km, recommend,
};

#[cfg(feature = "loader")]
pub use rambler_data::{DatasetError, LoadReport, LoadedDataset, SharedDataset, load_dataset};

#[cfg(feature = "scorer")]
pub use rambler_scorer::{
    Classifier, ClassifierError, MissingPosition, Policy, RecommendError, RecommendResponse,
    Recommender, ScoreWeights,
};
