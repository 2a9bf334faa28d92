//! Capability-based filesystem helpers shared by the Rambler crates.
//!
//! Paths are UTF-8 (`camino`) and every operation resolves through an
//! ambient `cap-std` directory handle opened on the path's parent.
#![forbid(unsafe_code)]

use std::io::{self, Read};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open a file for reading.
///
/// # Errors
/// Returns the underlying I/O error when the file is missing or unreadable.
pub fn open_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Read a whole file into memory.
///
/// # Errors
/// Returns the underlying I/O error when the file is missing or unreadable.
pub fn read_file(path: &Utf8Path) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    open_file(path)?.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Report whether `path` names an existing regular file.
///
/// # Errors
/// Returns `NotFound` when the path or its parent is missing, and other I/O
/// errors when the metadata cannot be read.
pub fn is_regular_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = parent_and_name(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Create (or truncate) a file, creating missing parent directories first.
///
/// # Errors
/// Returns the underlying I/O error when a directory or the file cannot be
/// created.
pub fn create_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    ensure_parent_dir(path)?;
    let (dir, name) = parent_and_name(path)?;
    dir.create(name.as_str())
}

/// Create the parent directory chain of `path` when it is missing.
///
/// # Errors
/// Returns the underlying I/O error when a directory cannot be created.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent.parent().is_none() {
        return Ok(());
    }
    let (root, relative) = split_root(parent);
    if relative.as_str().is_empty() {
        return Ok(());
    }
    fs_utf8::Dir::open_ambient_dir(root, ambient_authority())?.create_dir_all(relative)
}

fn parent_and_name(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Split a directory path into the ambient directory to open and the part
/// to create below it.
fn split_root(dir: &Utf8Path) -> (Utf8PathBuf, Utf8PathBuf) {
    let mut components = dir.components();
    match components.next() {
        Some(camino::Utf8Component::Prefix(prefix)) => {
            let mut root = Utf8PathBuf::from(prefix.as_str());
            if let Some(camino::Utf8Component::RootDir) = components.clone().next() {
                components.next();
                root.push(std::path::MAIN_SEPARATOR_STR);
            }
            (root, components.as_path().to_path_buf())
        }
        Some(camino::Utf8Component::RootDir) => (
            Utf8PathBuf::from(std::path::MAIN_SEPARATOR_STR),
            components.as_path().to_path_buf(),
        ),
        _ => (Utf8PathBuf::from("."), dir.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::TempDir;

    fn utf8_root(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir")
    }

    #[rstest]
    fn create_file_builds_missing_parents() {
        let tmp = TempDir::new().expect("tempdir");
        let target = utf8_root(&tmp).join("models/v1/model.bin");

        let mut file = create_file(&target).expect("create nested file");
        file.write_all(b"model").expect("write model");

        assert_eq!(read_file(&target).expect("read back"), b"model");
        assert!(is_regular_file(&target).expect("inspect file"));
    }

    #[rstest]
    fn directories_are_not_regular_files() {
        let tmp = TempDir::new().expect("tempdir");
        let dir = utf8_root(&tmp).join("data");
        std::fs::create_dir(&dir).expect("create dir");

        assert!(!is_regular_file(&dir).expect("inspect dir"));
    }

    #[rstest]
    fn missing_file_reports_not_found() {
        let tmp = TempDir::new().expect("tempdir");
        let missing = utf8_root(&tmp).join("missing.csv");

        let err = open_file(&missing).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        let inspect = is_regular_file(&missing).expect_err("missing metadata");
        assert_eq!(inspect.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    #[case("/", "/", "")]
    #[case("/srv/data", "/", "srv/data")]
    #[case("data/models", ".", "data/models")]
    fn split_root_separates_anchor(
        #[case] input: &str,
        #[case] root: &str,
        #[case] relative: &str,
    ) {
        let (anchor, rest) = split_root(Utf8Path::new(input));
        assert_eq!(anchor, Utf8PathBuf::from(root));
        assert_eq!(rest, Utf8PathBuf::from(relative));
    }
}
