//! Dataset loading for the Rambler engine.
//!
//! Responsibilities:
//! - Read points-of-interest CSV files into an immutable
//!   [`Dataset`](rambler_core::Dataset), normalising headers and coercing
//!   loosely formatted values.
//! - Report what was skipped instead of failing on bad rows.
//! - Share the loaded dataset between threads and swap it atomically on
//!   reload.
//!
//! Boundaries:
//! - Scoring rules live in `rambler-core` and `rambler-scorer`.
//!
//! Invariants:
//! - A published dataset is never mutated.

#![forbid(unsafe_code)]

mod columns;
mod error;
mod loader;
mod snapshot;

pub use error::DatasetError;
pub use loader::{LoadReport, LoadedDataset, load_dataset};
pub use snapshot::SharedDataset;
