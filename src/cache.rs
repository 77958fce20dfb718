//! Memoized first-position lookup shared across threads.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                           IndexCache<T>                                  │
//! │                                                                          │
//! │   RwLock<IndexTable<T>>                                                  │
//! │   ┌──────────────────────────────────┐  ┌──────────────────────────────┐ │
//! │   │ entries: EntryStore<T>           │  │ counters: AccessCounters     │ │
//! │   │   key → PositionMap<T>           │  │   key → AtomicU64            │ │
//! │   └──────────────────────────────────┘  └──────────────────────────────┘ │
//! │                                                                          │
//! │   policy: LeastReferenced { limit }      metrics: IndexMetrics (feature) │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lookup Flow
//!
//! ```text
//!   index_of(seq, value):
//!     1. empty sequence                  → None, store untouched
//!     2. key = seq.identity_key()
//!     3. read lock:  entry present?      → count++, answer
//!     4. write lock: entry present now?  → another thread built it
//!                    else                → build (reverse scan), register
//!     5. count++
//!     6. if built and len > limit        → evict least-referenced (≠ key)
//!     7. answer = entry.position(value)
//! ```
//!
//! Warm lookups only take the shared lock; the counter is an atomic so it
//! can be bumped there. Building, registering, evicting and removing take
//! the exclusive lock, so an entry and its counter appear and disappear
//! together.
//!
//! ## Staleness
//!
//! Entries are snapshots. Whether a changed sequence can be answered from
//! an old snapshot depends on the key source:
//!
//! - [`TrackedSeq`](crate::ds::TrackedSeq): storage is immutable, never stale.
//! - [`ContentKeyed`](crate::ds::ContentKeyed): changed contents hash to a
//!   new key, so the old entry is never consulted again.
//! - [`Keyed`](crate::ds::Keyed): the caller's key is trusted. Call
//!   [`IndexCache::remove`] after mutating a sequence that keeps its key.
//!
//! ## Resource Usage
//!
//! The limit bounds the number of entries, not their size: each entry holds
//! one slot per distinct value of its sequence.
//!
//! ## Example Usage
//!
//! ```
//! use indexkit::cache::IndexCache;
//! use indexkit::ds::TrackedSeq;
//!
//! let cache = IndexCache::new();
//! let seq = TrackedSeq::from(vec![5, 3, 5, 8]);
//!
//! assert_eq!(cache.index_of(&seq, &5), Some(0));
//! assert_eq!(cache.index_of(&seq, &8), Some(3));
//! assert_eq!(cache.index_of(&seq, &9), None);
//! assert_eq!(cache.access_count(&seq.key()), Some(3));
//! ```

use std::fmt;
use std::hash::Hash;

use parking_lot::RwLock;

use crate::ds::IdentityKey;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{
    IndexMetrics, IndexMetricsRecorder, IndexMetricsSnapshot, MetricsReset,
    MetricsSnapshotProvider,
};
use crate::policy::LeastReferenced;
use crate::store::{AccessCounters, EntryStore};
use crate::traits::{ConcurrentIndexLookup, IndexLookup, SequenceKey};

/// Number of entries retained when no limit is configured.
pub const DEFAULT_LIMIT: usize = 10;

/// Upper bound on the up-front table allocation. The limit caps growth; the
/// tables only reach it if that many sequences are actually looked up.
pub const MAX_PRESIZE: usize = 256;

/// Entries and counters, always locked together.
#[derive(Debug)]
struct IndexTable<T> {
    entries: EntryStore<T>,
    counters: AccessCounters,
}

/// Summary of one cached entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryInfo {
    /// Sequence length when the entry was built.
    pub source_len: usize,
    /// Distinct values recorded.
    pub distinct_len: usize,
    /// Lookups that referenced the entry.
    pub access_count: u64,
}

/// Bounded, thread-safe cache of first-position maps.
///
/// `IndexCache` is an explicit object: create one per domain, share it by
/// reference or `Arc`, and drop it to release every entry.
pub struct IndexCache<T> {
    table: RwLock<IndexTable<T>>,
    policy: LeastReferenced,
    #[cfg(feature = "metrics")]
    metrics: IndexMetrics,
}

impl<T> IndexCache<T> {
    /// Creates a cache retaining up to [`DEFAULT_LIMIT`] entries.
    pub fn new() -> Self {
        Self::from_policy(LeastReferenced::new(DEFAULT_LIMIT), DEFAULT_LIMIT + 1)
    }

    /// Creates a cache retaining up to `limit` entries.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is zero. Use [`try_with_limit`](Self::try_with_limit)
    /// for user-supplied values.
    pub fn with_limit(limit: usize) -> Self {
        Self::from_policy(LeastReferenced::new(limit), limit.saturating_add(1))
    }

    /// Fallible variant of [`with_limit`](Self::with_limit).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `limit` is zero.
    pub fn try_with_limit(limit: usize) -> Result<Self, ConfigError> {
        let policy = LeastReferenced::try_new(limit)?;
        Ok(Self::from_policy(policy, limit.saturating_add(1)))
    }

    /// `capacity_hint` is clamped to [`MAX_PRESIZE`].
    pub(crate) fn from_policy(policy: LeastReferenced, capacity_hint: usize) -> Self {
        let capacity_hint = capacity_hint.min(MAX_PRESIZE);
        Self {
            table: RwLock::new(IndexTable {
                entries: EntryStore::with_capacity(capacity_hint),
                counters: AccessCounters::with_capacity(capacity_hint),
            }),
            policy,
            #[cfg(feature = "metrics")]
            metrics: IndexMetrics::new(),
        }
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.table.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries retained between lookups.
    #[inline]
    pub fn limit(&self) -> usize {
        self.policy.limit()
    }

    /// Returns `true` if an entry is cached for `key`.
    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.table.read().entries.contains(key)
    }

    /// Lookups that referenced `key` since its entry was built.
    pub fn access_count(&self, key: &IdentityKey) -> Option<u64> {
        self.table.read().counters.get(key)
    }

    /// Size and access count of the entry cached for `key`.
    pub fn entry_info(&self, key: &IdentityKey) -> Option<EntryInfo> {
        let table = self.table.read();
        let entry = table.entries.get(key)?;
        Some(EntryInfo {
            source_len: entry.source_len(),
            distinct_len: entry.distinct_len(),
            access_count: table.counters.get(key).unwrap_or(0),
        })
    }

    /// Cached keys in unspecified order.
    pub fn keys(&self) -> Vec<IdentityKey> {
        self.table.read().entries.keys().collect()
    }

    /// Drops the entry and counter for `key`.
    ///
    /// Returns `true` if an entry was cached. The next lookup for `key`
    /// rebuilds from the sequence it is given.
    pub fn remove(&self, key: &IdentityKey) -> bool {
        let mut guard = self.table.write();
        let table = &mut *guard;
        let removed = table.entries.remove(key).is_some();
        table.counters.remove(key);
        #[cfg(feature = "metrics")]
        if removed {
            self.metrics.record_removal();
        }
        removed
    }

    /// Drops every entry and counter.
    pub fn clear(&self) {
        let mut guard = self.table.write();
        guard.entries.clear();
        guard.counters.clear();
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    /// Verifies that entries and counters track the same keys and that the
    /// population is within the limit.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let table = self.table.read();
        let entries = table.entries.len();
        let counters = table.counters.len();
        if entries != counters {
            return Err(InvariantError::new(format!(
                "entry table has {} keys but counter table has {}",
                entries, counters
            )));
        }
        if let Some(orphan) = table.entries.keys().find(|key| !table.counters.contains(key)) {
            return Err(InvariantError::new(format!(
                "entry {} has no access counter",
                orphan
            )));
        }
        if entries > self.policy.limit() {
            return Err(InvariantError::new(format!(
                "population {} exceeds limit {}",
                entries,
                self.policy.limit()
            )));
        }
        Ok(())
    }
}

impl<T> IndexCache<T>
where
    T: Eq + Hash + Clone,
{
    /// Returns the lowest index at which `value` occurs in `seq`, or `None`.
    ///
    /// The first lookup for a sequence scans it once and caches the
    /// resulting position map; later lookups, for any value, are answered
    /// from that map. An empty sequence is answered without caching
    /// anything. A value missing from a non-empty sequence still leaves the
    /// entry cached.
    ///
    /// # Example
    ///
    /// ```
    /// use indexkit::cache::IndexCache;
    /// use indexkit::ds::ContentKeyed;
    ///
    /// let cache = IndexCache::new();
    /// let data = [1, 2, 3];
    /// let seq = ContentKeyed::new(&data);
    ///
    /// assert_eq!(cache.index_of(&seq, &9), None);
    /// assert_eq!(cache.len(), 1);
    /// assert_eq!(cache.index_of(&seq, &2), Some(1));
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn index_of<S>(&self, seq: &S, value: &T) -> Option<usize>
    where
        S: SequenceKey<T> + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_lookup();

        let items = seq.elements();
        if items.is_empty() {
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_empty_lookup();
                self.metrics.record_not_found();
            }
            return None;
        }

        let key = seq.identity_key();
        let found = {
            let table = self.table.read();
            table.entries.get(&key).map(|entry| {
                table.counters.increment(&key);
                entry.position(value)
            })
        };

        let position = match found {
            Some(position) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_hit();
                position
            },
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_miss();
                self.build_and_lookup(key, items, value)
            },
        };

        #[cfg(feature = "metrics")]
        if position.is_none() {
            self.metrics.record_not_found();
        }
        position
    }

    /// Slow path: exclusive lock, re-check, build, count, evict.
    #[cold]
    fn build_and_lookup(&self, key: IdentityKey, items: &[T], value: &T) -> Option<usize> {
        let mut guard = self.table.write();
        let table = &mut *guard;

        let built = !table.entries.contains(&key);
        if built {
            let entry = table.entries.build(key, items);
            tracing::debug!(
                key = %key,
                source_len = entry.source_len(),
                distinct_len = entry.distinct_len(),
                "built position entry"
            );
            table.counters.register(key);
            #[cfg(feature = "metrics")]
            self.metrics.record_build();
        } else {
            tracing::trace!(key = %key, "position entry built by a concurrent lookup");
            #[cfg(feature = "metrics")]
            self.metrics.record_build_race_lost();
        }

        table.counters.increment(&key);
        let position = table.entries.get(&key).and_then(|entry| entry.position(value));

        if built {
            let evicted = self
                .policy
                .enforce(&mut table.entries, &mut table.counters, &key);
            #[cfg(feature = "metrics")]
            if evicted.is_some() {
                self.metrics.record_eviction();
            }
            #[cfg(not(feature = "metrics"))]
            let _ = evicted;
        }

        position
    }
}

impl<T> Default for IndexCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for IndexCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexCache")
            .field("limit", &self.policy.limit())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<T> IndexLookup<T> for IndexCache<T>
where
    T: Eq + Hash + Clone,
{
    #[inline]
    fn index_of<S>(&self, seq: &S, value: &T) -> Option<usize>
    where
        S: SequenceKey<T> + ?Sized,
    {
        IndexCache::index_of(self, seq, value)
    }

    fn len(&self) -> usize {
        IndexCache::len(self)
    }

    fn limit(&self) -> usize {
        IndexCache::limit(self)
    }

    fn contains(&self, key: &IdentityKey) -> bool {
        IndexCache::contains(self, key)
    }
}

impl<T: Send + Sync> ConcurrentIndexLookup for IndexCache<T> {}

#[cfg(feature = "metrics")]
impl<T> MetricsSnapshotProvider<IndexMetricsSnapshot> for IndexCache<T> {
    fn snapshot(&self) -> IndexMetricsSnapshot {
        self.metrics.snapshot(self.len(), self.policy.limit())
    }
}

#[cfg(feature = "metrics")]
impl<T> MetricsReset for IndexCache<T> {
    fn reset_metrics(&self) {
        self.metrics.reset_metrics();
    }
}
