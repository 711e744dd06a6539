//! tabstate - Hierarchical observable state store for a single document session
//!
//! tabstate lets independent pieces of code in one document session declare
//! named state slots, read and mutate them through closures, optionally
//! persist them to a session-scoped key-value backend, and get notified
//! when any code in the same session changes a slot.
//!
//! # Quick Start
//!
//! ```
//! use tabstate::Store;
//!
//! // One store per document session
//! let store = Store::ephemeral();
//!
//! // Declare a persisted slot and get its accessor/mutator handle
//! let counter = store.create(0, ["app", "counter"], true)?;
//!
//! // React to changes of that exact key
//! store.listen(["app", "counter"], |value| {
//!     println!("counter changed: {value:?}");
//! })?;
//!
//! // Mutate through a closure of the current value
//! counter.set(|v| (v.as_int().unwrap_or(0) + 1).into())?;
//! assert_eq!(counter.get().as_int(), Some(1));
//!
//! // Query persisted values hierarchically: ["app"] governs ["app","counter"]
//! assert_eq!(store.get(["app"])?.len(), 1);
//! # Ok::<(), tabstate::Error>(())
//! ```
//!
//! # Architecture
//!
//! The store is an explicit context object wiring three responsibilities:
//! a slot registry (in-memory ordered slot list with stable slot identity),
//! a persistence bridge (one merged JSON document in the backend), and a
//! change bus (synchronous in-process notifications, exact-key dispatch).
//!
//! Retrieval and notification deliberately differ in how they match keys:
//! [`Store::get`] matches persisted slots by governing prefix, while
//! [`Store::listen`] fires on exact key equality only.
//!
//! Storage backends implement the [`StorageBackend`] seam; `MemoryBackend`
//! stands in for the host's session storage and `FileBackend` persists
//! across process restarts.

// Re-export the public API
pub use tabstate_core::{Error, Key, KeyError, Limits, Result, StorageBackend, Value};
pub use tabstate_engine::{ChangeBus, PersistenceBridge, Slot, Store, STORAGE_KEY};
pub use tabstate_storage::{FileBackend, MemoryBackend};
