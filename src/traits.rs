//! # Lookup Trait Hierarchy
//!
//! ```text
//!   ┌─────────────────────────────────────┐       ┌──────────────────────────────┐
//!   │          SequenceKey<T>             │       │        IndexLookup<T>        │
//!   │                                     │       │                              │
//!   │  identity_key(&) → IdentityKey      │──────►│  index_of(&, &S, &T)         │
//!   │  elements(&) → &[T]                 │ input │      → Option<usize>         │
//!   └─────────────────────────────────────┘       │  len / limit / contains      │
//!      ▲            ▲             ▲               └──────────────┬───────────────┘
//!      │            │             │                              │
//!  TrackedSeq  ContentKeyed     Keyed                 ConcurrentIndexLookup
//!                                                     (Send + Sync marker)
//! ```
//!
//! `SequenceKey` separates *which entry* a lookup uses from *what it
//! scans*. `IndexLookup` is the read surface shared by every cache
//! front-end; it takes `&self` because lookups are safe to issue from many
//! threads at once.

use crate::ds::IdentityKey;

/// A sequence together with the key identifying its cache entry.
///
/// Implementations must return the same key for the same sequence identity
/// on every call. They may return the same key for different sequences
/// only as a documented hazard of their keying scheme.
pub trait SequenceKey<T> {
    /// Key under which the sequence's entry is cached.
    fn identity_key(&self) -> IdentityKey;

    /// Elements to scan when the entry has to be built.
    fn elements(&self) -> &[T];
}

/// Memoized first-position lookup.
pub trait IndexLookup<T> {
    /// Returns the lowest index at which `value` occurs in `seq`, or `None`.
    ///
    /// Absence is an ordinary result, not an error.
    fn index_of<S>(&self, seq: &S, value: &T) -> Option<usize>
    where
        S: SequenceKey<T> + ?Sized;

    /// Number of cached entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries retained between lookups.
    fn limit(&self) -> usize;

    /// Returns `true` if an entry is cached for `key`.
    fn contains(&self, key: &IdentityKey) -> bool;
}

/// Marker for lookup caches that can be shared across threads.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use indexkit::cache::IndexCache;
/// use indexkit::ds::TrackedSeq;
/// use indexkit::traits::{ConcurrentIndexLookup, IndexLookup};
///
/// fn share<C: ConcurrentIndexLookup + IndexLookup<u8> + 'static>(cache: Arc<C>) {
///     let seq = TrackedSeq::from(vec![1u8, 2, 3]);
///     std::thread::spawn(move || cache.index_of(&seq, &2))
///         .join()
///         .unwrap();
/// }
///
/// share(Arc::new(IndexCache::<u8>::new()));
/// ```
pub trait ConcurrentIndexLookup: Send + Sync {}
