use std::sync::atomic::{AtomicU64, Ordering};

use crate::metrics::snapshot::IndexMetricsSnapshot;
use crate::metrics::traits::{IndexMetricsRecorder, MetricsReset};

/// Lock-free counters for one [`IndexCache`](crate::cache::IndexCache).
#[derive(Debug, Default)]
pub struct IndexMetrics {
    lookups: AtomicU64,
    empty_lookups: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    builds: AtomicU64,
    build_races_lost: AtomicU64,
    not_found: AtomicU64,
    evictions: AtomicU64,
    removals: AtomicU64,
    clears: AtomicU64,
}

impl IndexMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the counters, filling in the gauges supplied by the cache.
    pub fn snapshot(&self, population: usize, limit: usize) -> IndexMetricsSnapshot {
        IndexMetricsSnapshot {
            lookups: self.lookups.load(Ordering::Relaxed),
            empty_lookups: self.empty_lookups.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            builds: self.builds.load(Ordering::Relaxed),
            build_races_lost: self.build_races_lost.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            removals: self.removals.load(Ordering::Relaxed),
            clears: self.clears.load(Ordering::Relaxed),
            population,
            limit,
        }
    }

    #[inline]
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

impl IndexMetricsRecorder for IndexMetrics {
    fn record_lookup(&self) {
        Self::bump(&self.lookups);
    }

    fn record_empty_lookup(&self) {
        Self::bump(&self.empty_lookups);
    }

    fn record_hit(&self) {
        Self::bump(&self.hits);
    }

    fn record_miss(&self) {
        Self::bump(&self.misses);
    }

    fn record_build(&self) {
        Self::bump(&self.builds);
    }

    fn record_build_race_lost(&self) {
        Self::bump(&self.build_races_lost);
    }

    fn record_not_found(&self) {
        Self::bump(&self.not_found);
    }

    fn record_eviction(&self) {
        Self::bump(&self.evictions);
    }

    fn record_removal(&self) {
        Self::bump(&self.removals);
    }

    fn record_clear(&self) {
        Self::bump(&self.clears);
    }
}

impl MetricsReset for IndexMetrics {
    fn reset_metrics(&self) {
        for counter in [
            &self.lookups,
            &self.empty_lookups,
            &self.hits,
            &self.misses,
            &self.builds,
            &self.build_races_lost,
            &self.not_found,
            &self.evictions,
            &self.removals,
            &self.clears,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_resets() {
        let metrics = IndexMetrics::new();
        metrics.record_lookup();
        metrics.record_lookup();
        metrics.record_miss();
        metrics.record_build();
        metrics.record_hit();
        metrics.record_eviction();

        let snapshot = metrics.snapshot(4, 10);
        assert_eq!(snapshot.lookups, 2);
        assert_eq!(snapshot.misses, 1);
        assert_eq!(snapshot.builds, 1);
        assert_eq!(snapshot.hits, 1);
        assert_eq!(snapshot.evictions, 1);
        assert_eq!(snapshot.population, 4);
        assert_eq!(snapshot.limit, 10);

        metrics.reset_metrics();
        assert_eq!(metrics.snapshot(0, 10), IndexMetricsSnapshot {
            limit: 10,
            ..Default::default()
        });
    }
}
