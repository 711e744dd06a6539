//! Storage backend abstraction
//!
//! This module defines the StorageBackend trait, the seam to the host
//! environment's session-scoped key-value facility. The store reads and
//! writes its entire persisted collection as one string blob under one
//! fixed storage key; the backend only needs to move blobs.

use crate::error::Result;

/// Session-scoped string key-value storage
///
/// Models the host's persistent storage facility: get/set by string key,
/// string payloads, lifetime bounded by the backend itself. Implementations
/// live in the storage crate; swapping one in changes where slots persist
/// without touching upper layers.
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync).
pub trait StorageBackend: Send + Sync {
    /// Read the blob stored under `storage_key`
    ///
    /// Returns `None` if nothing has been stored under that key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    fn read(&self, storage_key: &str) -> Result<Option<String>>;

    /// Write `blob` under `storage_key`, replacing any previous blob
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    fn write(&self, storage_key: &str, blob: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// A minimal in-memory StorageBackend for testing the trait contract.
    struct MockBackend {
        blobs: RwLock<HashMap<String, String>>,
    }

    impl MockBackend {
        fn new() -> Self {
            MockBackend {
                blobs: RwLock::new(HashMap::new()),
            }
        }
    }

    impl StorageBackend for MockBackend {
        fn read(&self, storage_key: &str) -> Result<Option<String>> {
            Ok(self.blobs.read().unwrap().get(storage_key).cloned())
        }

        fn write(&self, storage_key: &str, blob: &str) -> Result<()> {
            self.blobs
                .write()
                .unwrap()
                .insert(storage_key.to_string(), blob.to_string());
            Ok(())
        }
    }

    /// A backend that always returns errors.
    struct FailingBackend;

    impl StorageBackend for FailingBackend {
        fn read(&self, _: &str) -> Result<Option<String>> {
            Err(Error::Storage("read failed".into()))
        }

        fn write(&self, _: &str, _: &str) -> Result<()> {
            Err(Error::Storage("write failed".into()))
        }
    }

    #[test]
    fn backend_is_object_safe_and_send_sync() {
        fn accepts_backend(_: &dyn StorageBackend) {}
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        let _ = accepts_backend as fn(&dyn StorageBackend);
        assert_send::<Box<dyn StorageBackend>>();
        assert_sync::<Box<dyn StorageBackend>>();
    }

    #[test]
    fn read_unwritten_key_returns_none() {
        let backend = MockBackend::new();
        assert!(backend.read("slots").unwrap().is_none());
    }

    #[test]
    fn write_then_read_returns_blob() {
        let backend = MockBackend::new();
        backend.write("slots", "[]").unwrap();
        assert_eq!(backend.read("slots").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn write_replaces_previous_blob() {
        let backend = MockBackend::new();
        backend.write("slots", "old").unwrap();
        backend.write("slots", "new").unwrap();
        assert_eq!(backend.read("slots").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn keys_are_independent() {
        let backend = MockBackend::new();
        backend.write("a", "1").unwrap();
        backend.write("b", "2").unwrap();
        assert_eq!(backend.read("a").unwrap().as_deref(), Some("1"));
        assert_eq!(backend.read("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn backend_errors_propagate_through_trait_object() {
        let backend: Box<dyn StorageBackend> = Box::new(FailingBackend);
        assert!(backend.read("slots").is_err());
        assert!(backend.write("slots", "[]").is_err());
    }
}
