//! Tracing/logging setup shared by every `finprod` binary.

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use tracing::LogFormat;

/// Initialize process-wide observability (tracing/logging) with JSON output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::Json);
}

/// Same as [`init`], with an explicit output format.
pub fn init_with(format: LogFormat) {
    tracing::init(format);
}
