//! Change notification bus
//!
//! An explicit in-process publish/subscribe registry: an ordered list of
//! (key, callback) registrations. Every slot mutation publishes one
//! `(key, new_value)` event; dispatch is synchronous and in registration
//! order.
//!
//! ## Matching rule
//!
//! Listeners fire on exact key equality only (equal length, per-segment
//! equality). This is deliberately narrower than the persisted store's
//! prefix retrieval and is preserved as-is.
//!
//! ## Failure isolation
//!
//! A panicking callback is caught, reported via `tracing::warn!`, and never
//! blocks later callbacks or the publisher.
//!
//! ## Reentrancy
//!
//! No lock is held while a callback runs, so a callback may publish,
//! subscribe, or mutate slots on the same store. An inner publish runs to
//! completion before the outer dispatch continues; listeners registered
//! mid-dispatch are reached once iteration gets to them.
//!
//! The bus is a shared channel: any code holding a reference may publish or
//! subscribe, and the store is just one sender among them.

use parking_lot::RwLock;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tabstate_core::{Key, Value};
use tracing::warn;

type Callback = dyn Fn(&Value) + Send + Sync;

struct Listener {
    key: Key,
    callback: Arc<Callback>,
}

/// Ordered listener registry with exact-key dispatch
#[derive(Default)]
pub struct ChangeBus {
    listeners: RwLock<Vec<Listener>>,
}

impl ChangeBus {
    /// Create a bus with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for changes to exactly `key`
    ///
    /// Registrations are never deduplicated and cannot be removed; they
    /// live as long as the bus.
    pub fn subscribe<F>(&self, key: Key, callback: F)
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.listeners.write().push(Listener {
            key,
            callback: Arc::new(callback),
        });
    }

    /// Broadcast a change event to every listener registered on `key`
    ///
    /// Listeners run synchronously, in registration order, each isolated
    /// from the others' panics.
    pub fn publish(&self, key: &Key, value: &Value) {
        let mut index = 0;
        loop {
            // Re-lock per step: callbacks may subscribe or publish while
            // this dispatch is in flight.
            let callback = {
                let listeners = self.listeners.read();
                match listeners.get(index) {
                    Some(listener) if listener.key == *key => Some(listener.callback.clone()),
                    Some(_) => None,
                    None => break,
                }
            };
            if let Some(callback) = callback {
                if catch_unwind(AssertUnwindSafe(|| callback(value))).is_err() {
                    warn!(
                        target: "tabstate::bus",
                        key = %key,
                        listener = index,
                        "listener panicked during dispatch"
                    );
                }
            }
            index += 1;
        }
    }

    /// Number of registered listeners, across all keys
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }
}
