use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::IndexMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for index cache snapshots.
///
/// Writes the text exposition format so the output can be scraped by
/// Prometheus or forwarded to an OpenTelemetry collector. Write errors are
/// dropped; metrics are best effort.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consume the exporter and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<IndexMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &IndexMetricsSnapshot) {
        let counters = [
            ("lookups_total", snapshot.lookups),
            ("empty_lookups_total", snapshot.empty_lookups),
            ("hits_total", snapshot.hits),
            ("misses_total", snapshot.misses),
            ("builds_total", snapshot.builds),
            ("build_races_lost_total", snapshot.build_races_lost),
            ("not_found_total", snapshot.not_found),
            ("evictions_total", snapshot.evictions),
            ("removals_total", snapshot.removals),
            ("clears_total", snapshot.clears),
        ];
        for (suffix, value) in counters {
            self.write_metric("counter", suffix, value);
        }
        self.write_metric("gauge", "population", snapshot.population as u64);
        self.write_metric("gauge", "limit", snapshot.limit as u64);
    }
}
