//! Telemetry sinks for live controller tuning
//!
//! Controllers publish their intermediate values as named numbers. Where those
//! numbers end up (a dashboard table, the log, nowhere) is decided by the
//! [`TelemetrySink`] the caller injects.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Log target used by [`LogSink`]
pub const TELEMETRY_LOG_TARGET: &str = "pidloop::telemetry";

/// Trait for providing lightweight logging summaries of value types
///
/// Used when a configuration or a cycle's terms need to appear in a single
/// log line.
pub trait LogSummary {
    /// Return a compact string representation suitable for logging
    fn log_summary(&self) -> String;
}

/// Key/value numeric telemetry output.
///
/// Publishing is fire-and-forget: implementations must not block for long and
/// have no way to report failure back to the caller.
pub trait TelemetrySink: Send + Sync {
    /// Publish the latest value for `key`
    fn put_number(&self, key: &str, value: f64);
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn put_number(&self, _key: &str, _value: f64) {}
}

/// Sink that writes every value as a `debug` log record
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl TelemetrySink for LogSink {
    fn put_number(&self, key: &str, value: f64) {
        log::debug!(target: TELEMETRY_LOG_TARGET, "{key} = {value:.6}");
    }
}

/// In-memory table holding the latest value per key.
///
/// Clones share the same table, so one clone can be handed to controllers as
/// their sink while another is read by a display or a test.
#[derive(Clone, Default)]
pub struct TelemetryTable {
    values: Arc<RwLock<BTreeMap<String, f64>>>,
    updates: Arc<AtomicU64>,
}

impl TelemetryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest value for `key`, if one was ever published
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.read().get(key).copied()
    }

    /// Latest value for `key`, or `default`
    pub fn get_number(&self, key: &str, default: f64) -> f64 {
        self.get(key).unwrap_or(default)
    }

    /// Published keys, sorted
    pub fn keys(&self) -> Vec<String> {
        self.values.read().keys().cloned().collect()
    }

    /// Copy of the whole table
    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        self.values.read().clone()
    }

    /// Total number of `put_number` calls since creation or the last [`clear`](Self::clear)
    pub fn update_count(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.values.write().clear();
        self.updates.store(0, Ordering::Relaxed);
    }
}

impl TelemetrySink for TelemetryTable {
    fn put_number(&self, key: &str, value: f64) {
        self.values.write().insert(key.to_string(), value);
        self.updates.fetch_add(1, Ordering::Relaxed);
    }
}

impl LogSummary for TelemetryTable {
    fn log_summary(&self) -> String {
        let values = self.values.read();
        let entries: Vec<String> = values
            .iter()
            .map(|(key, value)| format!("{key}={value:.3}"))
            .collect();
        format!("TelemetryTable[{}]", entries.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_keeps_latest_value() {
        let table = TelemetryTable::new();
        table.put_number("Error", 3.0);
        table.put_number("Error", 1.5);
        table.put_number("Output", -0.2);

        assert_eq!(table.get("Error"), Some(1.5));
        assert_eq!(table.get_number("Output", 0.0), -0.2);
        assert_eq!(table.get_number("DTerm", 7.0), 7.0);
        assert_eq!(table.keys(), vec!["Error", "Output"]);
        assert_eq!(table.update_count(), 3);
    }

    #[test]
    fn test_table_clones_share_values() {
        let table = TelemetryTable::new();
        let sink: Arc<dyn TelemetrySink> = Arc::new(table.clone());

        sink.put_number("PTerm", 0.75);
        assert_eq!(table.get("PTerm"), Some(0.75));

        table.clear();
        assert!(table.snapshot().is_empty());
        assert_eq!(table.update_count(), 0);
    }

    #[test]
    fn test_log_summary() {
        let table = TelemetryTable::new();
        table.put_number("ITerm", 0.1);
        table.put_number("Error", 2.0);
        assert_eq!(
            table.log_summary(),
            "TelemetryTable[Error=2.000, ITerm=0.100]"
        );
    }

    #[test]
    fn test_null_and_log_sinks_accept_values() {
        let sinks: Vec<Box<dyn TelemetrySink>> = vec![Box::new(NullSink), Box::new(LogSink)];
        for sink in sinks {
            sink.put_number("Output", 1.0);
        }
    }
}
