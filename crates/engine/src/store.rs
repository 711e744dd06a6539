//! The store context and slot handle
//!
//! One [`Store`] per document session, constructed explicitly over a
//! storage backend and injected into consumers; dropping it on teardown
//! releases the registry and the listener list. There is no ambient global
//! instance.
//!
//! [`Store::create`] registers a state slot and returns a [`Slot`] handle,
//! the accessor/mutator pair for that slot. The handle's registry index is
//! fixed at creation by exact-key lookup, so concurrently active slots
//! never alias each other's storage cell and an index never drifts as the
//! registry grows.

use crate::bus::ChangeBus;
use crate::persist::PersistenceBridge;
use crate::registry::SlotRegistry;
use std::sync::Arc;
use tabstate_core::{Error, Key, Result, StorageBackend, Value};
use tabstate_storage::MemoryBackend;
use tracing::debug;

struct StoreInner {
    registry: SlotRegistry,
    bridge: PersistenceBridge,
    bus: Arc<ChangeBus>,
}

/// Hierarchical observable state store for one document session
///
/// # Example
///
/// ```
/// use tabstate_engine::Store;
///
/// let store = Store::ephemeral();
/// let counter = store.create(0, ["counter"], true)?;
///
/// store.listen(["counter"], |value| println!("counter is now {value:?}"))?;
///
/// counter.set(|v| (v.as_int().unwrap_or(0) + 1).into())?;
/// assert_eq!(counter.get().as_int(), Some(1));
/// # Ok::<(), tabstate_core::Error>(())
/// ```
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    /// Create a store over `backend`
    ///
    /// Slots persisted through this store land in the backend under the
    /// fixed storage key; a later store over the same backend sees them.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let bus = Arc::new(ChangeBus::new());
        Store {
            inner: Arc::new(StoreInner {
                registry: SlotRegistry::new(),
                bridge: PersistenceBridge::new(backend),
                bus,
            }),
        }
    }

    /// Create a store over a fresh in-memory backend
    ///
    /// Persisted slots live exactly as long as the store. Useful for tests
    /// and for hosts without a storage facility.
    pub fn ephemeral() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Register a state slot and obtain its accessor/mutator handle
    ///
    /// The slot is identified by `segments`, seeded with `default`, and
    /// write-through persisted on every mutation when `persist` is set.
    /// Seeding goes through the same write path as any other mutation, so
    /// it persists the default (when requested) and emits one change
    /// notification.
    ///
    /// Creating a second slot under an already-registered key yields a
    /// handle to the same registry cell and re-seeds it.
    ///
    /// # Errors
    ///
    /// `Error::InvalidKey` if `segments` is empty or exceeds the key
    /// limits; nothing is touched in that case. Persistence failures from
    /// the seeding write pass through.
    pub fn create<V, I, S>(&self, default: V, segments: I, persist: bool) -> Result<Slot>
    where
        V: Into<Value>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        // Validate before any state is touched
        let key = Key::new(segments)?;
        let index = self.inner.registry.resolve(&key);
        let slot = Slot {
            store: self.inner.clone(),
            key,
            index,
            persist,
        };
        let default = default.into();
        slot.set(|_| default)?;
        debug!(
            target: "tabstate::store",
            key = %slot.key,
            index,
            persist,
            "slot created"
        );
        Ok(slot)
    }

    /// Values previously persisted under `segments`, matched by prefix
    ///
    /// Returns the values of every persisted slot whose key starts with
    /// (or equals) the supplied key, in persisted order; an empty vec when
    /// storage is empty or nothing matches. Reads storage fresh on every
    /// call, so slots persisted by an earlier store over the same backend
    /// are visible.
    ///
    /// # Errors
    ///
    /// `Error::InvalidKey` for an invalid key, `Error::Corruption` if the
    /// stored blob does not parse; backend failures pass through.
    pub fn get<I, S>(&self, segments: I) -> Result<Vec<Value>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = Key::new(segments)?;
        self.inner.bridge.matching(&key)
    }

    /// Register `callback` for changes to exactly the supplied key
    ///
    /// The callback runs synchronously on every mutation of a slot with
    /// that exact key (equal length, per-segment equality; prefixes do not
    /// match), transient and persisted slots alike. Registrations cannot
    /// be removed.
    ///
    /// # Errors
    ///
    /// `Error::InvalidKey` for an invalid key.
    pub fn listen<I, S, F>(&self, segments: I, callback: F) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&Value) + Send + Sync + 'static,
    {
        let key = Key::new(segments)?;
        self.inner.bus.subscribe(key, callback);
        Ok(())
    }

    /// The change bus this store publishes on
    ///
    /// The bus is a shared channel: other code in the session may publish
    /// its own events here or subscribe independently of [`Store::listen`].
    pub fn bus(&self) -> &Arc<ChangeBus> {
        &self.inner.bus
    }

    /// Number of slots registered in memory
    pub fn slot_count(&self) -> usize {
        self.inner.registry.len()
    }
}

/// Accessor/mutator handle for one state slot
///
/// Cheap to clone; clones refer to the same registry cell.
#[derive(Clone)]
pub struct Slot {
    store: Arc<StoreInner>,
    key: Key,
    index: usize,
    persist: bool,
}

impl std::fmt::Debug for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot")
            .field("key", &self.key)
            .field("index", &self.index)
            .field("persist", &self.persist)
            .finish_non_exhaustive()
    }
}

impl Slot {
    /// The slot's current in-memory value
    ///
    /// No side effects.
    pub fn get(&self) -> Value {
        self.store.registry.value_at(self.index)
    }

    /// Mutate the slot through `updater`
    ///
    /// `updater` receives the current value (`Value::Null` if none has
    /// been recorded) and returns the next one. The write runs to
    /// completion in order: registry write, then write-through persistence
    /// (if requested at creation), then exactly one change notification
    /// with the new value. Returns the new value.
    ///
    /// `updater` should be pure: it runs with no locks held and its only
    /// effect should be computing the next value.
    ///
    /// # Errors
    ///
    /// Persistence failures (`Error::NotSerializable`,
    /// `Error::Corruption`, backend errors) abort before the notification
    /// step; the registry write has already happened at that point.
    pub fn set<F>(&self, updater: F) -> Result<Value>
    where
        F: FnOnce(Value) -> Value,
    {
        let current = self.store.registry.value_at(self.index);
        let next = updater(current);
        self.store.registry.replace(self.index, next.clone());

        if self.persist {
            // Key is validated non-empty at creation; guard kept for the
            // write-through path.
            if self.key.is_empty() {
                return Err(Error::PersistConfig(
                    "write-through requested for a slot with no key".into(),
                ));
            }
            self.store.bridge.persist(&self.key, &next)?;
        }

        self.store.bus.publish(&self.key, &next);
        Ok(next)
    }

    /// The key this slot was created under
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Whether mutations write through to the persisted store
    pub fn is_persisted(&self) -> bool {
        self.persist
    }
}
