//! Local filesystem storage backend
//!
//! All operations complete immediately.

use super::StorageError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Local filesystem storage backend
#[derive(Debug, Clone)]
pub struct LocalStorage {
    /// Base directory for relative paths (usually current working directory)
    base_dir: PathBuf,
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage {
    /// Create a new local storage backend rooted at the current directory
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("."),
        }
    }

    /// Create a local storage backend with a custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve a path relative to the base directory
    fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Read a whole file.
    pub fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        Ok(std::fs::read(self.resolve(path))?)
    }

    /// Write a file, creating parent directories as needed.
    ///
    /// The data goes to a sibling `.tmp` file first, which is then renamed over
    /// the target, so a failed write never leaves a truncated file behind.
    pub fn write(&self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp_path = temp_path(&full_path);
        if let Err(e) = std::fs::write(&temp_path, data) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }
        std::fs::rename(&temp_path, &full_path)?;
        Ok(())
    }

    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }
}

/// `dir/name.ext.tmp` next to `path`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
