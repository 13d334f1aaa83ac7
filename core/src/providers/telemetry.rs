//! Telemetry collaborator.

use std::future::Future;

/// Telemetry sink.
///
/// Best-effort: a failure to record is logged by the caller and never
/// aborts the boot.
pub trait TelemetrySink: Send + Sync {
    /// Record the running server version.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink rejects the sample. The caller
    /// logs it and continues.
    fn record_version(&self, version: &str) -> impl Future<Output = anyhow::Result<()>> + Send;
}
