//! Per-key storage of [`PositionMap`] snapshots.
//!
//! ## Architecture
//! - Entries live in an `FxHashMap<IdentityKey, PositionMap<T>>`.
//! - The store is single-threaded; [`IndexCache`](crate::cache::IndexCache)
//!   guards it with the same `RwLock` as the access counters.
//! - An entry is inserted once and never rewritten. The only way to replace
//!   it is to remove it and build again.
//!
//! ## Core Operations
//! - `get`: read-only lookup.
//! - `build`: scan a sequence and register its entry if the key is absent.
//! - `remove`: drop an entry.
//!
//! ## Example Usage
//! ```rust
//! use indexkit::ds::IdentityKey;
//! use indexkit::store::EntryStore;
//!
//! let mut store = EntryStore::new();
//! let key = IdentityKey::from_raw(1);
//! store.build(key, &['a', 'b', 'a']);
//! assert_eq!(store.get(&key).and_then(|e| e.position(&'a')), Some(0));
//! assert!(store.remove(&key).is_some());
//! assert!(store.is_empty());
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{IdentityKey, PositionMap};

/// Map from identity key to the entry built for it.
#[derive(Debug)]
pub struct EntryStore<T> {
    entries: FxHashMap<IdentityKey, PositionMap<T>>,
}

impl<T> EntryStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a store pre-sized for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Fetch the entry for `key`.
    #[inline]
    pub fn get(&self, key: &IdentityKey) -> Option<&PositionMap<T>> {
        self.entries.get(key)
    }

    /// Check whether an entry exists.
    #[inline]
    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove the entry for `key`.
    pub fn remove(&mut self, key: &IdentityKey) -> Option<PositionMap<T>> {
        self.entries.remove(key)
    }

    /// Return the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the stored keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = IdentityKey> + '_ {
        self.entries.keys().copied()
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> EntryStore<T>
where
    T: Eq + Hash + Clone,
{
    /// Build and register the entry for `key` unless one already exists.
    ///
    /// An existing entry is returned untouched.
    pub fn build(&mut self, key: IdentityKey, items: &[T]) -> &PositionMap<T> {
        self.entries
            .entry(key)
            .or_insert_with(|| PositionMap::build(items))
    }
}

impl<T> Default for EntryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
