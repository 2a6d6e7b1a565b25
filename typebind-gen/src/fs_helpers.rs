//! Filesystem helpers shared across `typebind-gen` modules.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use std::io::{Read, Write};

use crate::error::TypebindError;

/// Opens a directory if it exists, returning `None` when the path is missing.
pub fn open_optional_dir(path: &Utf8Path) -> Result<Option<Dir>, TypebindError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(Some(dir)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(TypebindError::io(path, err)),
    }
}

/// Opens `path`, creating it and any missing parents first.
pub fn ensure_dir(path: &Utf8Path) -> Result<Dir, TypebindError> {
    if let Some(dir) = open_optional_dir(path)? {
        return Ok(dir);
    }
    Dir::create_ambient_dir_all(path, ambient_authority())
        .map_err(|io_err| TypebindError::io(path, io_err))?;
    Dir::open_ambient_dir(path, ambient_authority()).map_err(|io_err| TypebindError::io(path, io_err))
}

/// Reports whether `relative` exists beneath `dir`.
///
/// Errors other than `NotFound` propagate so permission problems are not
/// mistaken for absent files.
pub fn file_exists(dir: &Dir, root: &Utf8Path, relative: &Utf8Path) -> Result<bool, TypebindError> {
    match dir.metadata(relative) {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(TypebindError::io(root.join(relative), err)),
    }
}

/// Reads `relative` beneath `dir`, returning `None` when it does not exist.
pub fn read_optional(
    dir: &Dir,
    root: &Utf8Path,
    relative: &Utf8Path,
) -> Result<Option<String>, TypebindError> {
    let mut file = match dir.open(relative) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(TypebindError::io(root.join(relative), err)),
    };
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|err| TypebindError::io(root.join(relative), err))?;
    Ok(Some(content))
}

/// Writes `content` to `relative` beneath `root`, creating parent directories
/// as needed and truncating any existing file.
///
/// The write is not atomic: a failure part-way through leaves a truncated
/// file behind.
pub fn write_file(
    root: &Utf8Path,
    relative: &Utf8Path,
    content: &str,
) -> Result<Utf8PathBuf, TypebindError> {
    let target = root.join(relative);
    let parent = target.parent().unwrap_or(root);
    let dir = ensure_dir(parent)?;
    let filename = relative
        .file_name()
        .ok_or_else(|| TypebindError::Message(format!("output path {relative} has no file name")))?;

    let mut file = dir
        .open_with(
            filename,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(|io_err| TypebindError::io(&target, io_err))?;
    file.write_all(content.as_bytes())
        .map_err(|io_err| TypebindError::io(&target, io_err))?;

    Ok(target)
}

#[cfg(test)]
mod tests {
    //! Tests for filesystem helpers.

    use super::*;
    use rstest::rstest;

    fn utf8_tempdir() -> (tempfile::TempDir, Utf8PathBuf) {
        let tempdir = tempfile::tempdir().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(tempdir.path().to_path_buf())
            .expect("tempdir path is UTF-8");
        (tempdir, root)
    }

    #[rstest]
    fn write_file_creates_missing_parents() {
        let (_guard, root) = utf8_tempdir();
        let written = write_file(&root, Utf8Path::new("a/b/out.rs"), "fn main() {}\n")
            .expect("write file");
        assert_eq!(written, root.join("a/b/out.rs"));

        let dir = Dir::open_ambient_dir(&root, ambient_authority()).expect("open root");
        let content = read_optional(&dir, &root, Utf8Path::new("a/b/out.rs"))
            .expect("read file");
        assert_eq!(content.as_deref(), Some("fn main() {}\n"));
    }

    #[rstest]
    fn write_file_truncates_existing_content() {
        let (_guard, root) = utf8_tempdir();
        write_file(&root, Utf8Path::new("out.rs"), "a much longer first version\n")
            .expect("first write");
        write_file(&root, Utf8Path::new("out.rs"), "short\n").expect("second write");

        let dir = Dir::open_ambient_dir(&root, ambient_authority()).expect("open root");
        let content = read_optional(&dir, &root, Utf8Path::new("out.rs")).expect("read file");
        assert_eq!(content.as_deref(), Some("short\n"));
    }

    #[rstest]
    fn missing_files_are_reported_as_absent() {
        let (_guard, root) = utf8_tempdir();
        let dir = Dir::open_ambient_dir(&root, ambient_authority()).expect("open root");
        assert!(!file_exists(&dir, &root, Utf8Path::new("nope.rs")).expect("probe"));
        assert!(
            read_optional(&dir, &root, Utf8Path::new("nope.rs"))
                .expect("probe")
                .is_none()
        );
    }

    #[rstest]
    fn open_optional_dir_returns_none_for_missing_path() {
        let (_guard, root) = utf8_tempdir();
        assert!(open_optional_dir(&root.join("absent")).expect("probe").is_none());
    }
}
