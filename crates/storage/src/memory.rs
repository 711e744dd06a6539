//! In-memory storage backend
//!
//! Blobs live in a process-local map and vanish with the backend. This is
//! the session-storage stand-in: sharing one `MemoryBackend` between two
//! store instances models a reload within the same browsing session.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tabstate_core::{Result, StorageBackend};

/// Process-local string blob storage
///
/// Cheap to clone: clones share the same underlying map, so a cloned
/// backend observes writes made through the original.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    blobs: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of storage keys currently holding a blob
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    /// Whether no blob has been stored yet
    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, storage_key: &str) -> Result<Option<String>> {
        Ok(self.blobs.read().get(storage_key).cloned())
    }

    fn write(&self, storage_key: &str, blob: &str) -> Result<()> {
        self.blobs
            .write()
            .insert(storage_key.to_string(), blob.to_string());
        Ok(())
    }
}
