//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable lines for an interactive terminal.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Build the filter: `RUST_LOG` wins, otherwise `default_filter`, otherwise `warn`.
pub fn filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Initialize tracing/logging for the process.
///
/// Logs go to stderr so command output on stdout stays clean. Safe to call
/// multiple times (subsequent calls are no-ops).
pub fn init(default_filter: &str, format: OutputFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(default_filter))
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match format {
        OutputFormat::Json => builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init(),
        OutputFormat::Pretty => builder.compact().try_init(),
    };
}
