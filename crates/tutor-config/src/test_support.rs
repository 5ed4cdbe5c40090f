//! Scratch directories for tutor-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary directory tree, removed on drop.
pub struct Scratch {
    /// Owned temporary directory.
    root: TempDir,
}

impl Scratch {
    /// Creates an empty scratch tree.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates `rel` (and its parents) and returns its path.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes `contents` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    /// Writes a config file into `rel_dir`; an empty `rel_dir` means the root.
    pub fn config(&self, rel_dir: &str, contents: &str) -> PathBuf {
        let dir = self.dir(rel_dir);
        let path = dir.join(CONFIG_FILENAME);
        fs::write(&path, contents).unwrap();
        path
    }
}
