//! Persistence bridge
//!
//! Keeps the persisted slot collection as one JSON document in the storage
//! backend: an array of `[segments, value]` pairs under one fixed storage
//! key, e.g.
//!
//! ```json
//! [[["user","name"],"Ada"],[["counter"],2]]
//! ```
//!
//! Writes merge into the existing collection: an exact key match replaces
//! that entry's value in place, anything else appends. The read-modify-write
//! is not atomic across concurrent writers; the store's single-writer
//! execution model is the caller's concern.
//!
//! A blob that fails to decode as the expected array-of-pairs shape
//! surfaces as [`Error::Corruption`](tabstate_core::Error::Corruption) to
//! the caller of the triggering operation. The bridge never falls back to
//! an empty collection on a parse failure.

use std::sync::Arc;
use tabstate_core::{Error, Key, Result, StorageBackend, Value};
use tracing::debug;

/// Fixed storage key the slot collection lives under
pub const STORAGE_KEY: &str = "_tabstate/slots";

/// Reads and writes the persisted slot collection
pub struct PersistenceBridge {
    backend: Arc<dyn StorageBackend>,
    storage_key: String,
}

impl PersistenceBridge {
    /// Create a bridge over `backend` using the default storage key
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_storage_key(backend, STORAGE_KEY)
    }

    /// Create a bridge over `backend` using a custom storage key
    pub fn with_storage_key(backend: Arc<dyn StorageBackend>, storage_key: impl Into<String>) -> Self {
        PersistenceBridge {
            backend,
            storage_key: storage_key.into(),
        }
    }

    /// Load the full persisted collection, in persisted order
    ///
    /// Returns an empty collection when nothing has been persisted yet.
    ///
    /// # Errors
    ///
    /// `Error::Corruption` if the stored blob does not parse as an array of
    /// `[segments, value]` pairs; backend failures pass through.
    pub fn load(&self) -> Result<Vec<(Key, Value)>> {
        let Some(blob) = self.backend.read(&self.storage_key)? else {
            return Ok(Vec::new());
        };
        let pairs: Vec<(Key, serde_json::Value)> = serde_json::from_str(&blob)
            .map_err(|e| Error::Corruption(format!("stored slot collection: {e}")))?;
        Ok(pairs
            .into_iter()
            .map(|(key, json)| (key, Value::from_json(json)))
            .collect())
    }

    /// Merge one slot into the persisted collection
    ///
    /// Exact key match replaces the stored value in place; otherwise the
    /// slot is appended. The whole collection is written back as one JSON
    /// document.
    ///
    /// # Errors
    ///
    /// `Error::NotSerializable` if the value cannot be encoded (checked
    /// before the collection is read, so a failed persist leaves storage
    /// untouched); `Error::Corruption` and backend failures as in `load`.
    pub fn persist(&self, key: &Key, value: &Value) -> Result<()> {
        let encoded = value.to_json()?;
        let mut pairs: Vec<(Key, serde_json::Value)> = match self.backend.read(&self.storage_key)? {
            Some(blob) => serde_json::from_str(&blob)
                .map_err(|e| Error::Corruption(format!("stored slot collection: {e}")))?,
            None => Vec::new(),
        };

        match pairs.iter_mut().find(|(k, _)| k == key) {
            Some((_, stored)) => *stored = encoded,
            None => pairs.push((key.clone(), encoded)),
        }

        let blob = serde_json::to_string(&pairs)
            .map_err(|e| Error::NotSerializable(e.to_string()))?;
        self.backend.write(&self.storage_key, &blob)?;
        debug!(target: "tabstate::persist", key = %key, entries = pairs.len(), "slot persisted");
        Ok(())
    }

    /// Values of every persisted slot governed by `key`, in persisted order
    ///
    /// Prefix semantics: a stored slot matches when its key starts with (or
    /// equals) the supplied key. Returns an empty vec when storage is empty
    /// or nothing matches.
    pub fn matching(&self, key: &Key) -> Result<Vec<Value>> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|(stored, _)| key.governs(stored))
            .map(|(_, value)| value)
            .collect())
    }
}
