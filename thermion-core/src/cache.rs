//! Value cache over the fixed key set shared with the gateway
//!
//! The set of tracked keys is established once at construction and never
//! changes afterward; inbound records for other keys are the caller's
//! problem (the synchronizer skips them).

use heapless::Vec;
use thermion_protocol::{Key, Value, ValueRef};

/// Most keys a cache can track
pub const MAX_TRACKED_KEYS: usize = 8;

/// Errors that can occur when constructing or updating the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CacheError {
    /// More seed entries than the cache can track
    Full,
    /// Seed entries repeat a key
    DuplicateKey,
    /// Value payload exceeds the per-value cap
    ValueTooLong,
    /// Key is not part of the tracked set
    UnknownKey,
}

#[derive(Debug, Clone)]
struct Entry {
    key: Key,
    value: Value,
}

/// Fixed-key value store
///
/// Values are typed per write, not per key: the gateway may legally
/// replace an integer with text under the same key. Keeping the schema
/// stable is a convention between the peers, not something the cache
/// enforces.
#[derive(Debug, Clone)]
pub struct ValueCache {
    entries: Vec<Entry, MAX_TRACKED_KEYS>,
}

impl ValueCache {
    /// Build a cache tracking exactly the seeded keys, each with its
    /// initial value
    pub fn from_entries(seed: &[(Key, ValueRef<'_>)]) -> Result<Self, CacheError> {
        let mut entries: Vec<Entry, MAX_TRACKED_KEYS> = Vec::new();

        for (key, value) in seed {
            if entries.iter().any(|entry| entry.key == *key) {
                return Err(CacheError::DuplicateKey);
            }
            let value = Value::from_ref(value).ok_or(CacheError::ValueTooLong)?;
            entries
                .push(Entry { key: *key, value })
                .map_err(|_| CacheError::Full)?;
        }

        Ok(Self { entries })
    }

    /// Current value for a tracked key
    pub fn get(&self, key: Key) -> Option<&Value> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    /// Store a value for a tracked key
    ///
    /// Returns `true` when the stored value actually changed; writing a
    /// value structurally equal to the current one returns `false` and is
    /// otherwise a no-op. An untracked key fails without writing anything.
    pub fn set(&mut self, key: Key, value: ValueRef<'_>) -> Result<bool, CacheError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.key == key)
            .ok_or(CacheError::UnknownKey)?;

        if entry.value.matches(&value) {
            return Ok(false);
        }

        entry.value = Value::from_ref(&value).ok_or(CacheError::ValueTooLong)?;
        Ok(true)
    }

    /// Whether `key` is part of the tracked set
    pub fn contains(&self, key: Key) -> bool {
        self.entries.iter().any(|entry| entry.key == key)
    }

    /// Number of tracked keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the cache tracks no keys at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the tracked keys in seed order
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.entries.iter().map(|entry| entry.key)
    }
}
