//! Per-key access counters used to rank eviction victims.
//!
//! Counters are `AtomicU64` so a lookup holding only the shared lock can
//! still count itself. Registering and removing keys changes the table's
//! shape and needs `&mut self`, i.e. the exclusive lock.
//!
//! Counts are a priority signal only. Lookup results never depend on them.

use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;

use crate::ds::IdentityKey;

/// Table of lookup counts keyed by identity key.
#[derive(Debug, Default)]
pub struct AccessCounters {
    counts: FxHashMap<IdentityKey, AtomicU64>,
}

impl AccessCounters {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Start tracking `key` at zero. An already tracked key keeps its count.
    pub fn register(&mut self, key: IdentityKey) {
        self.counts.entry(key).or_insert_with(|| AtomicU64::new(0));
    }

    /// Bump the count for `key`, returning the new value.
    ///
    /// Returns `None` if `key` is not tracked.
    #[inline]
    pub fn increment(&self, key: &IdentityKey) -> Option<u64> {
        self.counts
            .get(key)
            .map(|count| count.fetch_add(1, Ordering::Relaxed) + 1)
    }

    #[inline]
    pub fn get(&self, key: &IdentityKey) -> Option<u64> {
        self.counts.get(key).map(|count| count.load(Ordering::Relaxed))
    }

    /// Stop tracking `key`, returning its final count.
    pub fn remove(&mut self, key: &IdentityKey) -> Option<u64> {
        self.counts.remove(key).map(AtomicU64::into_inner)
    }

    #[inline]
    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.counts.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(key, count)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (IdentityKey, u64)> + '_ {
        self.counts
            .iter()
            .map(|(key, count)| (*key, count.load(Ordering::Relaxed)))
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}
