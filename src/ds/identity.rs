//! Identity keys for sequences stored in an [`IndexCache`](crate::cache::IndexCache).
//!
//! Every lookup is routed to a cache entry by an [`IdentityKey`]. A key must
//! be reproducible: two lookups against the same sequence identity have to
//! land on the same entry, otherwise the cache never hits.
//!
//! ## Key Kinds
//!
//! ```text
//!   ┌──────────────────┬──────────────────────────┬──────────────────────────────┐
//!   │ Source           │ Key derived from         │ Collision / staleness        │
//!   ├──────────────────┼──────────────────────────┼──────────────────────────────┤
//!   │ TrackedSeq<T>    │ monotonic handle counter │ none: ids are never reused   │
//!   │                  │ (assigned at creation)   │ and storage is immutable     │
//!   │ ContentKeyed<T>  │ FxHash of the contents   │ 64-bit hash collisions only  │
//!   │ Keyed<T>         │ caller-supplied u64      │ caller owns uniqueness       │
//!   └──────────────────┴──────────────────────────┴──────────────────────────────┘
//! ```
//!
//! Each kind has its own key space, so a caller key of `1` never aliases the
//! first tracked sequence.
//!
//! ## Example Usage
//!
//! ```
//! use indexkit::ds::{ContentKeyed, TrackedSeq};
//! use indexkit::traits::SequenceKey;
//!
//! let seq = TrackedSeq::from(vec![3, 1, 4]);
//! let same = seq.clone();
//! assert_eq!(seq.identity_key(), same.identity_key());
//!
//! let data = [3, 1, 4];
//! assert_eq!(
//!     ContentKeyed::new(&data).identity_key(),
//!     ContentKeyed::new(&[3, 1, 4]).identity_key()
//! );
//! ```

use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault, Hash};
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHasher;

use crate::traits::SequenceKey;

/// Next handle handed out to a [`TrackedSeq`]. Starts at 1 so a zero value
/// is never observed in logs.
static NEXT_TRACKED_ID: AtomicU64 = AtomicU64::new(1);

/// Which key space an [`IdentityKey`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyKind {
    /// Assigned to a [`TrackedSeq`] at construction.
    Tracked,
    /// Hash of a borrowed slice's contents.
    Content,
    /// Chosen by the caller.
    Caller,
}

/// Opaque key identifying one cached sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey {
    kind: KeyKind,
    value: u64,
}

impl IdentityKey {
    /// Creates a caller-managed key.
    ///
    /// The caller is responsible for never reusing `raw` for a different
    /// sequence while the cache still holds an entry for it.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self {
            kind: KeyKind::Caller,
            value: raw,
        }
    }

    #[inline]
    const fn tracked(id: u64) -> Self {
        Self {
            kind: KeyKind::Tracked,
            value: id,
        }
    }

    #[inline]
    const fn content(hash: u64) -> Self {
        Self {
            kind: KeyKind::Content,
            value: hash,
        }
    }

    /// Returns the key space this key belongs to.
    #[inline]
    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    /// Returns the raw value within the key space.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.value
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            KeyKind::Tracked => "tracked",
            KeyKind::Content => "content",
            KeyKind::Caller => "caller",
        };
        write!(f, "{}:{:#x}", prefix, self.value)
    }
}

// ---------------------------------------------------------------------------
// TrackedSeq
// ---------------------------------------------------------------------------

/// Immutable sequence bound to a unique identity key at construction.
///
/// Clones share both the storage and the key, so every clone hits the same
/// cache entry. Two `TrackedSeq`s built from equal contents get different
/// keys. Since the elements cannot be mutated, an entry cached for a
/// tracked sequence never goes stale.
///
/// # Example
///
/// ```
/// use indexkit::ds::TrackedSeq;
/// use indexkit::traits::SequenceKey;
///
/// let a = TrackedSeq::from(vec!["x", "y"]);
/// let b = TrackedSeq::from(vec!["x", "y"]);
/// assert_ne!(a.identity_key(), b.identity_key());
/// assert_eq!(&a[..], &b[..]);
/// ```
pub struct TrackedSeq<T> {
    key: IdentityKey,
    items: Arc<[T]>,
}

impl<T> TrackedSeq<T> {
    /// Wraps `items` and assigns a fresh identity key.
    pub fn new(items: impl Into<Arc<[T]>>) -> Self {
        let id = NEXT_TRACKED_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            key: IdentityKey::tracked(id),
            items: items.into(),
        }
    }

    /// Returns the key assigned at construction.
    #[inline]
    pub fn key(&self) -> IdentityKey {
        self.key
    }

    /// Returns the elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns `true` if `other` is a clone of `self`.
    #[inline]
    pub fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl<T> Clone for TrackedSeq<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> From<Vec<T>> for TrackedSeq<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for TrackedSeq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T> Deref for TrackedSeq<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T: fmt::Debug> fmt::Debug for TrackedSeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedSeq")
            .field("key", &self.key)
            .field("items", &&self.items[..])
            .finish()
    }
}

impl<T> SequenceKey<T> for TrackedSeq<T> {
    #[inline]
    fn identity_key(&self) -> IdentityKey {
        self.key
    }

    #[inline]
    fn elements(&self) -> &[T] {
        &self.items
    }
}

// ---------------------------------------------------------------------------
// ContentKeyed
// ---------------------------------------------------------------------------

/// Borrowed slice keyed by a hash of its contents.
///
/// Equal contents share one cache entry, which is always correct. Mutating
/// the underlying data changes the key, so an old entry is simply never
/// hit again and ages out through eviction. Distinct contents that collide
/// on the 64-bit hash are answered from the wrong entry; this is not
/// detected.
///
/// Deriving the key costs one pass over the slice.
#[derive(Debug, Clone, Copy)]
pub struct ContentKeyed<'a, T> {
    items: &'a [T],
}

impl<'a, T> ContentKeyed<'a, T> {
    #[inline]
    pub fn new(items: &'a [T]) -> Self {
        Self { items }
    }
}

impl<T: Hash> SequenceKey<T> for ContentKeyed<'_, T> {
    fn identity_key(&self) -> IdentityKey {
        let hash = BuildHasherDefault::<FxHasher>::default().hash_one(self.items);
        IdentityKey::content(hash)
    }

    #[inline]
    fn elements(&self) -> &[T] {
        self.items
    }
}

// ---------------------------------------------------------------------------
// Keyed
// ---------------------------------------------------------------------------

/// Borrowed slice paired with a caller-chosen key.
///
/// The cache trusts the key: reusing it for a different (or mutated)
/// sequence returns positions from the entry built for the first one until
/// that entry is evicted or removed.
#[derive(Debug, Clone, Copy)]
pub struct Keyed<'a, T> {
    key: IdentityKey,
    items: &'a [T],
}

impl<'a, T> Keyed<'a, T> {
    #[inline]
    pub fn new(key: IdentityKey, items: &'a [T]) -> Self {
        Self { key, items }
    }
}

impl<T> SequenceKey<T> for Keyed<'_, T> {
    #[inline]
    fn identity_key(&self) -> IdentityKey {
        self.key
    }

    #[inline]
    fn elements(&self) -> &[T] {
        self.items
    }
}
