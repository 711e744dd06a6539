//! In-memory slot registry
//!
//! An ordered list of (key, value) slots, append-only except for in-place
//! value replacement. Slots are unique by exact key: resolving a key that
//! is already registered returns the existing position instead of
//! appending, so a slot's index is fixed at creation and never drifts as
//! the registry grows.

use parking_lot::RwLock;
use tabstate_core::{Key, Value};

struct SlotEntry {
    key: Key,
    value: Value,
}

/// Ordered slot list with exact-key identity
#[derive(Default)]
pub(crate) struct SlotRegistry {
    entries: RwLock<Vec<SlotEntry>>,
}

impl SlotRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Resolve the registry index for `key`
    ///
    /// First match by exact key wins; if the key is not registered yet, a
    /// null-seeded entry is appended and its index returned.
    pub(crate) fn resolve(&self, key: &Key) -> usize {
        let mut entries = self.entries.write();
        if let Some(index) = entries.iter().position(|e| e.key == *key) {
            return index;
        }
        entries.push(SlotEntry {
            key: key.clone(),
            value: Value::Null,
        });
        entries.len() - 1
    }

    /// Current value of the slot at `index`
    ///
    /// Panics if `index` was not produced by `resolve`; indices are
    /// creation-fixed and entries are never removed, so a resolved index
    /// stays in bounds for the registry's lifetime.
    pub(crate) fn value_at(&self, index: usize) -> Value {
        self.entries.read()[index].value.clone()
    }

    /// Replace the value of the slot at `index` in place
    pub(crate) fn replace(&self, index: usize, value: Value) {
        self.entries.write()[index].value = value;
    }

    /// Number of registered slots
    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }
}
