//! Temporary directory trees addressed with UTF-8 paths.
//!
//! # Examples
//!
//! ```
//! use typebind_test_helpers::tree::TempTree;
//!
//! let tree = TempTree::new().expect("create tree");
//! tree.write("templates/binders/header.rs.tera", "//! header\n")
//!     .expect("write template");
//! assert!(tree.exists("templates/binders/header.rs.tera"));
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory removed when dropped.
#[derive(Debug)]
pub struct TempTree {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl TempTree {
    /// Creates an empty temporary tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or its path is not
    /// valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp dir")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("temp dir is not valid UTF-8: {}", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Returns the absolute root of the tree.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns `relative` resolved against the root.
    #[must_use]
    pub fn path(&self, relative: impl AsRef<Utf8Path>) -> Utf8PathBuf {
        self.root.join(relative)
    }

    /// Writes `content` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or the file cannot be written.
    pub fn write(&self, relative: impl AsRef<Utf8Path>, content: &str) -> Result<Utf8PathBuf> {
        let target = self.path(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&target, content).with_context(|| format!("write {target}"))?;
        Ok(target)
    }

    /// Creates the directory `relative` and its parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn mkdir(&self, relative: impl AsRef<Utf8Path>) -> Result<Utf8PathBuf> {
        let target = self.path(relative);
        std::fs::create_dir_all(&target).with_context(|| format!("create {target}"))?;
        Ok(target)
    }

    /// Reads `relative` as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read(&self, relative: impl AsRef<Utf8Path>) -> Result<String> {
        let target = self.path(relative);
        std::fs::read_to_string(&target).with_context(|| format!("read {target}"))
    }

    /// Removes the file at `relative`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be removed.
    pub fn remove(&self, relative: impl AsRef<Utf8Path>) -> Result<()> {
        let target = self.path(relative);
        std::fs::remove_file(&target).with_context(|| format!("remove {target}"))
    }

    /// Reports whether a file or directory exists at `relative`.
    #[must_use]
    pub fn exists(&self, relative: impl AsRef<Utf8Path>) -> bool {
        self.path(relative).exists()
    }

    /// Lists every file beneath `relative`, as sorted `/`-separated paths
    /// relative to it.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be read.
    pub fn files_under(&self, relative: impl AsRef<Utf8Path>) -> Result<Vec<String>> {
        let base = self.path(relative);
        let mut found = Vec::new();
        collect_files(&base, "", &mut found)?;
        found.sort();
        Ok(found)
    }
}

fn collect_files(dir: &Utf8Path, prefix: &str, found: &mut Vec<String>) -> Result<()> {
    for entry_result in dir.read_dir_utf8().with_context(|| format!("read dir {dir}"))? {
        let entry = entry_result.with_context(|| format!("read entry in {dir}"))?;
        let name = if prefix.is_empty() {
            entry.file_name().to_owned()
        } else {
            format!("{prefix}/{}", entry.file_name())
        };
        if entry.path().is_dir() {
            collect_files(entry.path(), &name, found)?;
        } else {
            found.push(name);
        }
    }
    Ok(())
}
