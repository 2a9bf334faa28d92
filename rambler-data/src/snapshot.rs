//! A shared, atomically replaceable dataset.

use std::sync::{Arc, PoisonError, RwLock};

use camino::Utf8Path;
use log::info;
use rambler_core::Dataset;

use crate::{DatasetError, LoadReport, load_dataset};

/// The dataset currently served, shared across threads.
///
/// Readers take an [`Arc`] snapshot and work on it without holding the lock,
/// so a reload never blocks or disturbs calls already in progress.
#[derive(Debug, Default)]
pub struct SharedDataset {
    current: RwLock<Arc<Dataset>>,
}

impl SharedDataset {
    /// Wrap an initial dataset.
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        Self {
            current: RwLock::new(Arc::new(dataset)),
        }
    }

    /// Return the dataset currently published.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Dataset> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Publish `dataset`, returning the snapshot it replaces.
    #[must_use]
    pub fn replace(&self, dataset: Dataset) -> Arc<Dataset> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(dataset))
    }

    /// Load `path` and publish the result.
    ///
    /// The current snapshot stays in place when loading fails.
    ///
    /// # Errors
    /// Propagates [`DatasetError`] from [`load_dataset`].
    pub fn reload_from(&self, path: &Utf8Path) -> Result<LoadReport, DatasetError> {
        let loaded = load_dataset(path)?;
        let rows = loaded.dataset.len();
        let previous = self.replace(loaded.dataset);
        info!(
            "published {rows} row(s) from {path}, replacing {} row(s)",
            previous.len()
        );
        Ok(loaded.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rambler_core::test_support::city_guide;
    use rambler_core::{DatasetShape, PointOfInterest};
    use rstest::rstest;

    fn guide() -> Dataset {
        Dataset::new(
            city_guide(),
            DatasetShape {
                has_coordinates: false,
                has_distance_km: true,
            },
        )
    }

    #[rstest]
    fn snapshots_outlive_replacement() {
        let shared = SharedDataset::new(guide());
        let before = shared.snapshot();

        let previous = shared.replace(Dataset::new(
            vec![PointOfInterest::new("Only", "park").with_distance_km(1.0)],
            DatasetShape::default(),
        ));

        assert!(Arc::ptr_eq(&before, &previous));
        assert_eq!(before.len(), 4);
        assert_eq!(shared.snapshot().len(), 1);
    }

    #[rstest]
    fn failed_reload_keeps_current_snapshot() {
        let shared = SharedDataset::new(guide());
        let dir = tempfile::TempDir::new().expect("tempdir");
        let missing = camino::Utf8PathBuf::from_path_buf(dir.path().join("gone.csv"))
            .expect("utf-8 path");

        let err = shared.reload_from(&missing).expect_err("missing file");

        assert!(matches!(err, DatasetError::Open { .. }));
        assert_eq!(shared.snapshot().len(), 4);
    }
}
