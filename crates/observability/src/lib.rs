//! Tracing/logging (shared setup).

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use crate::tracing::OutputFormat;

/// Initialize process-wide tracing with the given default filter.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(default_filter: &str, format: OutputFormat) {
    tracing::init(default_filter, format);
}
