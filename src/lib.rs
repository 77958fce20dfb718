//! indexkit: memoized, bounded first-position lookup for sequences that are
//! queried repeatedly.
//!
//! An [`IndexCache`](cache::IndexCache) scans a sequence once, keeps a
//! value-to-lowest-index map for it, and answers later `index_of` queries
//! from that map. Entries are keyed by an [`IdentityKey`](ds::IdentityKey)
//! and the number of cached sequences is bounded; when a new entry pushes
//! the population past the limit, the least-referenced one is dropped.
//!
//! ```
//! use indexkit::prelude::*;
//!
//! let cache = IndexCache::new();
//! let seq = TrackedSeq::from(vec!["b", "a", "b"]);
//! assert_eq!(cache.index_of(&seq, &"b"), Some(0));
//! assert_eq!(cache.index_of(&seq, &"c"), None);
//! ```
//!
//! ## Modules
//!
//! - [`cache`]: the lookup operation and cache lifecycle.
//! - [`ds`]: identity keys and the immutable position map.
//! - [`store`]: entry and access-counter tables.
//! - [`policy`]: least-referenced eviction.
//! - [`builder`]: configuration.
//! - `metrics` (feature `metrics`): counters, snapshots, Prometheus export.

pub mod builder;
pub mod cache;
pub mod ds;
pub mod error;
pub mod policy;
pub mod store;
pub mod traits;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
