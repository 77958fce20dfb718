//! Optional counters for [`IndexCache`](crate::cache::IndexCache), enabled
//! with the `metrics` feature.

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::IndexMetrics;
pub use snapshot::IndexMetricsSnapshot;
pub use traits::{IndexMetricsRecorder, MetricsExporter, MetricsReset, MetricsSnapshotProvider};
