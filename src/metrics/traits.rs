//! # Metrics Traits
//!
//! Recording, snapshotting and export are split into separate traits so a
//! cache only writes counters, tests and benches read snapshots, and
//! production code publishes them.
//!
//! ```text
//!   IndexMetricsRecorder          MetricsSnapshotProvider<S>      MetricsExporter<S>
//!   (lookup path, &self)   ──►    (tests / benches)        ──►    (monitoring)
//! ```

/// Counters written by the lookup path.
///
/// Methods take `&self`: lookups hold only the shared lock, so recorders
/// must use interior mutability.
pub trait IndexMetricsRecorder {
    fn record_lookup(&self);
    fn record_empty_lookup(&self);
    fn record_hit(&self);
    fn record_miss(&self);
    fn record_build(&self);
    fn record_build_race_lost(&self);
    fn record_not_found(&self);
    fn record_eviction(&self);
    fn record_removal(&self);
    fn record_clear(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&self);
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
