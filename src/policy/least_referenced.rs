//! Least-referenced eviction for the position cache.
//!
//! ## Algorithm
//!
//! ```text
//!   after build(new_key):
//!     population = entries.len()
//!     if population <= limit  → done
//!     victim = argmin count(k) for k in counters, k != new_key
//!     remove entries[victim], counters[victim]
//! ```
//!
//! - Runs reactively: only after a build pushed the population past
//!   `limit`, and evicts at most one key per build.
//! - The key that was just built is never a candidate, even though its
//!   count is the lowest in the table.
//! - Ties on the minimum count go to whichever key the counter table
//!   yields first. That order is unspecified.
//!
//! The victim scan is O(n) in the number of tracked keys. Populations are
//! small (the default limit is 10), so no heap or bucket index is kept.

use crate::ds::IdentityKey;
use crate::error::ConfigError;
use crate::store::{AccessCounters, EntryStore};

/// Key removed by [`LeastReferenced::enforce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eviction {
    /// Key whose entry and counter were dropped.
    pub key: IdentityKey,
    /// Its access count at removal time.
    pub access_count: u64,
}

/// Population bound with least-referenced victim selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeastReferenced {
    limit: usize,
}

impl LeastReferenced {
    /// Creates a policy bounding the cache to `limit` keys.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is zero.
    pub fn new(limit: usize) -> Self {
        match Self::try_new(limit) {
            Ok(policy) => policy,
            Err(err) => panic!("{}", err),
        }
    }

    /// Fallible variant of [`new`](Self::new).
    pub fn try_new(limit: usize) -> Result<Self, ConfigError> {
        if limit == 0 {
            return Err(ConfigError::zero_limit());
        }
        Ok(Self { limit })
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[inline]
    pub fn is_over_limit(&self, population: usize) -> bool {
        population > self.limit
    }

    /// Picks the tracked key with the lowest count, skipping `protected`.
    pub fn select_victim(
        &self,
        counters: &AccessCounters,
        protected: &IdentityKey,
    ) -> Option<(IdentityKey, u64)> {
        counters
            .iter()
            .filter(|(key, _)| key != protected)
            .min_by_key(|(_, count)| *count)
    }

    /// Evicts one key if the population exceeds the limit.
    ///
    /// `protected` is the key whose build triggered the check.
    pub fn enforce<T>(
        &self,
        entries: &mut EntryStore<T>,
        counters: &mut AccessCounters,
        protected: &IdentityKey,
    ) -> Option<Eviction> {
        if !self.is_over_limit(entries.len()) {
            return None;
        }

        let (victim, _) = self.select_victim(counters, protected)?;
        entries.remove(&victim);
        let access_count = counters.remove(&victim).unwrap_or(0);

        tracing::debug!(
            victim = %victim,
            access_count,
            population = entries.len(),
            limit = self.limit,
            "evicted least-referenced position entry"
        );

        Some(Eviction {
            key: victim,
            access_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: u64) -> IdentityKey {
        IdentityKey::from_raw(raw)
    }

    fn populate(
        policy: &LeastReferenced,
        counts: &[u64],
    ) -> (EntryStore<u64>, AccessCounters) {
        let mut entries = EntryStore::new();
        let mut counters = AccessCounters::new();
        for (raw, hits) in counts.iter().enumerate() {
            let k = key(raw as u64);
            entries.build(k, &[raw as u64]);
            counters.register(k);
            for _ in 0..*hits {
                counters.increment(&k);
            }
        }
        assert!(entries.len() <= policy.limit() + 1);
        (entries, counters)
    }

    #[test]
    fn zero_limit_is_rejected() {
        let err = LeastReferenced::try_new(0).unwrap_err();
        assert!(err.message().contains("limit"));
    }

    #[test]
    #[should_panic(expected = "population limit")]
    fn new_panics_on_zero_limit() {
        let _ = LeastReferenced::new(0);
    }

    #[test]
    fn nothing_evicted_at_limit() {
        let policy = LeastReferenced::new(3);
        let (mut entries, mut counters) = populate(&policy, &[1, 1, 1]);
        assert_eq!(policy.enforce(&mut entries, &mut counters, &key(2)), None);
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn evicts_lowest_count_other_than_protected() {
        let policy = LeastReferenced::new(3);
        let (mut entries, mut counters) = populate(&policy, &[5, 2, 7, 0]);

        let eviction = policy.enforce(&mut entries, &mut counters, &key(3));
        assert_eq!(
            eviction,
            Some(Eviction {
                key: key(1),
                access_count: 2
            })
        );
        assert_eq!(entries.len(), 3);
        assert!(!entries.contains(&key(1)));
        assert!(!counters.contains(&key(1)));
        assert!(entries.contains(&key(3)));
    }

    #[test]
    fn tie_picks_one_of_the_minimum() {
        let policy = LeastReferenced::new(2);
        let (_, counters) = populate(&policy, &[4, 1, 1]);
        let (victim, count) = policy.select_victim(&counters, &key(9)).unwrap();
        assert_eq!(count, 1);
        assert!(victim == key(1) || victim == key(2));
    }

    #[test]
    fn only_protected_key_means_no_victim() {
        let policy = LeastReferenced::new(1);
        let (_, counters) = populate(&policy, &[0]);
        assert_eq!(policy.select_victim(&counters, &key(0)), None);
    }
}
