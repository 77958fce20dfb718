//! Storage backends behind an [`IndexCache`](crate::cache::IndexCache).
//!
//! The store owns the entries and the counters; the eviction policy in
//! [`policy`](crate::policy) decides which key to drop. Both tables are
//! mutated together under one exclusive lock.

pub mod counter;
pub mod entry_store;

pub use counter::AccessCounters;
pub use entry_store::EntryStore;
