//! Prometheus telemetry sink.

use std::future::Future;
use typetempo_core::TelemetrySink;

/// Records the running server version as a labelled gauge, the
/// conventional `*_version_info` pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrometheusTelemetry;

impl TelemetrySink for PrometheusTelemetry {
    fn record_version(&self, version: &str) -> impl Future<Output = anyhow::Result<()>> + Send {
        let version = version.to_string();
        async move {
            metrics::gauge!("typetempo_server_version_info", "version" => version).set(1.0);
            Ok(())
        }
    }
}
