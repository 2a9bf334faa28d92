//! Scoring policies and the recommendation service for the Rambler engine.
//!
//! The crate provides:
//! - [`FeatureScorer`] and [`GeoScorer`], two implementations of
//!   [`ScoringPolicy`](rambler_core::ScoringPolicy), and [`Policy::select`],
//!   which picks one per request from the caller's context and the dataset's
//!   columns.
//! - [`Recommender`], which owns a shared dataset snapshot and turns raw
//!   requests into ranked [`RecommendResponse`]s.
//! - [`Classifier`], a decision tree that names a single best match as a
//!   secondary signal, persisted with `bincode`.
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use rambler_core::RecommendationRequest;
//! use rambler_scorer::{Classifier, Recommender};
//!
//! let recommender = Recommender::from_path(Utf8Path::new("data/places.csv"))
//!     .expect("dataset available");
//! let classifier = Classifier::load_or_train(
//!     Utf8Path::new("artifacts/best_match.bin"),
//!     recommender.dataset().pois(),
//! )
//! .expect("model available");
//! let recommender = recommender.with_classifier(classifier);
//! let response = recommender
//!     .recommend(&RecommendationRequest::default())
//!     .expect("valid request");
//! println!("{} results", response.results.len());
//! ```

#![forbid(unsafe_code)]

pub mod classifier;
mod error;
mod policy;
mod recommender;
mod weights;

pub use classifier::{Classifier, DEFAULT_MAX_DEPTH, LabelEncoder};
pub use error::{ClassifierError, RecommendError};
pub use policy::{FeatureScorer, GeoScorer, Policy};
pub use recommender::{RecommendResponse, Recommender};
pub use weights::{MissingPosition, ScoreWeights};
