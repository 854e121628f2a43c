//! Counters recorded when the `metrics` feature is enabled.
//!
//! Without the feature every function here is a no-op, so call sites never
//! need their own `cfg` gates.

/// Items a source driver forwarded into a pipeline.
pub const ITEMS_DRIVEN: &str = "pushweld_items_driven_total";

/// Per-item file writes performed by the file sinks.
pub const FILE_WRITES: &str = "pushweld_file_writes_total";

#[cfg(feature = "metrics")]
pub(crate) fn items_driven(source: &'static str, count: usize) {
    ::metrics::counter!(ITEMS_DRIVEN, "source" => source).increment(count as u64);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn items_driven(_source: &'static str, _count: usize) {}

#[cfg(feature = "metrics")]
pub(crate) fn file_write(sink: &'static str) {
    ::metrics::counter!(FILE_WRITES, "sink" => sink).increment(1);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn file_write(_sink: &'static str) {}
