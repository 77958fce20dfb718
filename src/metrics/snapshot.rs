/// Point-in-time copy of an [`IndexCache`](crate::cache::IndexCache)'s counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IndexMetricsSnapshot {
    pub lookups: u64,
    pub empty_lookups: u64, // answered without touching the store
    pub hits: u64,          // entry found under the shared lock
    pub misses: u64,
    pub builds: u64,
    pub build_races_lost: u64, // miss, but another thread built first
    pub not_found: u64,

    pub evictions: u64,
    pub removals: u64,
    pub clears: u64,

    // gauges captured at snapshot time
    pub population: usize,
    pub limit: usize,
}

impl IndexMetricsSnapshot {
    /// Fraction of non-empty lookups answered under the shared lock, in
    /// `[0, 1]`. Lookups that lost a build race count as misses.
    pub fn hit_ratio(&self) -> f64 {
        let served = self.hits + self.misses;
        if served == 0 {
            0.0
        } else {
            self.hits as f64 / served as f64
        }
    }
}
