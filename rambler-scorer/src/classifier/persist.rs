//! Reading and writing the classifier artefact.
//!
//! The file holds the eight magic bytes, a format version and the
//! `bincode`-encoded classifier, in that order.

use std::io::{BufWriter, Write};

use bincode::Options;
use camino::Utf8Path;
use log::info;
use rambler_core::PointOfInterest;
use serde::{Deserialize, Serialize};

use super::Classifier;
use crate::ClassifierError;

/// Bytes every model file starts with.
pub const MODEL_MAGIC: [u8; 8] = *b"RMBLTREE";

/// Format version written by this build.
pub const MODEL_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    magic: [u8; 8],
    version: u32,
}

fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new()
}

impl Classifier {
    /// Persist the classifier to `path`, creating parent directories.
    ///
    /// # Errors
    /// Returns [`ClassifierError`] when the directory or file cannot be
    /// created, or the model cannot be encoded.
    pub fn save(&self, path: &Utf8Path) -> Result<(), ClassifierError> {
        rambler_fs::ensure_parent_dir(path).map_err(|source| ClassifierError::CreateParent {
            path: path
                .parent()
                .map_or_else(|| Utf8Path::new(".").to_path_buf(), Utf8Path::to_path_buf),
            source,
        })?;
        let file = rambler_fs::create_file(path).map_err(|source| ClassifierError::WriteModel {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        let header = Header {
            magic: MODEL_MAGIC,
            version: MODEL_VERSION,
        };
        let encode = |source| ClassifierError::EncodeModel {
            path: path.to_path_buf(),
            source,
        };
        bincode_options()
            .serialize_into(&mut writer, &header)
            .map_err(encode)?;
        bincode_options()
            .serialize_into(&mut writer, self)
            .map_err(encode)?;
        writer.flush().map_err(|source| ClassifierError::WriteModel {
            path: path.to_path_buf(),
            source,
        })?;
        info!("wrote best-match model to {path}");
        Ok(())
    }

    /// Load a classifier written by [`Classifier::save`].
    ///
    /// # Errors
    /// Returns [`ClassifierError`] when the file cannot be read, lacks the
    /// magic bytes, has another format version or fails to decode.
    pub fn load(path: &Utf8Path) -> Result<Self, ClassifierError> {
        let bytes = rambler_fs::read_file(path).map_err(|source| ClassifierError::ReadModel {
            path: path.to_path_buf(),
            source,
        })?;
        if !bytes.starts_with(&MODEL_MAGIC) {
            return Err(ClassifierError::InvalidModelMagic {
                path: path.to_path_buf(),
            });
        }
        let decode = |source| ClassifierError::DecodeModel {
            path: path.to_path_buf(),
            source,
        };
        let mut reader = bytes.as_slice();
        let header: Header = bincode_options()
            .deserialize_from(&mut reader)
            .map_err(decode)?;
        if header.version != MODEL_VERSION {
            return Err(ClassifierError::UnsupportedModelVersion {
                path: path.to_path_buf(),
                found: header.version,
                expected: MODEL_VERSION,
            });
        }
        bincode_options()
            .deserialize_from(&mut reader)
            .map_err(decode)
    }

    /// Load the model at `path`, or train one from `pois` and save it there
    /// when no file exists yet.
    ///
    /// An existing but unreadable model is reported rather than overwritten.
    ///
    /// # Errors
    /// Propagates errors from [`Classifier::load`], [`Classifier::train`] and
    /// [`Classifier::save`].
    pub fn load_or_train(
        path: &Utf8Path,
        pois: &[PointOfInterest],
    ) -> Result<Self, ClassifierError> {
        if rambler_fs::is_regular_file(path).unwrap_or(false) {
            let classifier = Self::load(path)?;
            info!("loaded best-match model from {path}");
            return Ok(classifier);
        }
        let classifier = Self::train(pois)?;
        classifier.save(path)?;
        Ok(classifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rambler_core::test_support::city_guide;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct ModelPath {
        _dir: TempDir,
        path: Utf8PathBuf,
    }

    #[fixture]
    fn model_path() -> ModelPath {
        let dir = TempDir::new().expect("tempdir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("models/best_match.bin"))
            .expect("utf-8 path");
        ModelPath { _dir: dir, path }
    }

    #[rstest]
    fn saved_model_loads_identically(model_path: ModelPath) {
        let trained = Classifier::train(&city_guide()).expect("train");
        trained.save(&model_path.path).expect("save");

        let loaded = Classifier::load(&model_path.path).expect("load");

        assert_eq!(loaded, trained);
    }

    #[rstest]
    fn foreign_files_are_rejected(model_path: ModelPath) {
        rambler_fs::ensure_parent_dir(&model_path.path).expect("parent");
        std::fs::write(&model_path.path, b"name,type\n").expect("write");

        let err = Classifier::load(&model_path.path).expect_err("not a model");

        assert!(matches!(err, ClassifierError::InvalidModelMagic { .. }));
    }

    #[rstest]
    fn newer_versions_are_rejected(model_path: ModelPath) {
        rambler_fs::ensure_parent_dir(&model_path.path).expect("parent");
        let header = Header {
            magic: MODEL_MAGIC,
            version: MODEL_VERSION + 1,
        };
        let bytes = bincode_options().serialize(&header).expect("encode header");
        std::fs::write(&model_path.path, bytes).expect("write");

        let err = Classifier::load(&model_path.path).expect_err("future version");

        assert!(matches!(
            err,
            ClassifierError::UnsupportedModelVersion { found: 2, .. }
        ));
    }

    #[rstest]
    fn truncated_model_fails_to_decode(model_path: ModelPath) {
        rambler_fs::ensure_parent_dir(&model_path.path).expect("parent");
        let header = Header {
            magic: MODEL_MAGIC,
            version: MODEL_VERSION,
        };
        let bytes = bincode_options().serialize(&header).expect("encode header");
        std::fs::write(&model_path.path, bytes).expect("write");

        let err = Classifier::load(&model_path.path).expect_err("no body");

        assert!(matches!(err, ClassifierError::DecodeModel { .. }));
    }

    #[rstest]
    fn load_or_train_reuses_existing_model(model_path: ModelPath) {
        let first = Classifier::load_or_train(&model_path.path, &city_guide()).expect("train");
        assert!(model_path.path.is_file());

        let pois = vec![PointOfInterest::new("Other", "park")];
        let second = Classifier::load_or_train(&model_path.path, &pois).expect("reuse");

        assert_eq!(first, second);
    }
}
