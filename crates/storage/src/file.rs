//! File-backed storage backend
//!
//! One file per storage key under a root directory. The storage key is used
//! as a relative path, so keys like `_tabstate/slots` land in a
//! subdirectory. Blobs survive process restarts for as long as the
//! directory does.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tabstate_core::{Result, StorageBackend};
use tracing::debug;

/// Durable string blob storage rooted at a directory
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `root`
    ///
    /// The directory is created if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(FileBackend { root })
    }

    /// The root directory blobs are stored under
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, storage_key: &str) -> PathBuf {
        self.root.join(storage_key)
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, storage_key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(storage_key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, storage_key: &str, blob: &str) -> Result<()> {
        let path = self.path_for(storage_key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, blob)?;
        debug!(target: "tabstate::storage", key = storage_key, bytes = blob.len(), "blob written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_returns_none() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        assert!(backend.read("slots").unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        backend.write("slots", "[]").unwrap();
        assert_eq!(backend.read("slots").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_nested_storage_key_creates_subdirectory() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        backend.write("_tabstate/slots", "[]").unwrap();
        assert!(dir.path().join("_tabstate").join("slots").is_file());
    }

    #[test]
    fn test_blobs_survive_backend_reconstruction() {
        let dir = TempDir::new().unwrap();
        {
            let backend = FileBackend::open(dir.path()).unwrap();
            backend.write("slots", "persisted").unwrap();
        }
        let backend = FileBackend::open(dir.path()).unwrap();
        assert_eq!(backend.read("slots").unwrap().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_open_creates_root() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("does").join("not").join("exist");
        let backend = FileBackend::open(&nested).unwrap();
        assert_eq!(backend.root(), nested.as_path());
        assert!(nested.is_dir());
    }
}
