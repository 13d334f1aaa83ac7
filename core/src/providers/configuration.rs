//! Remote configuration collaborator.

use crate::snapshot::ConfigurationSnapshot;
use std::future::Future;

/// Remote configuration service.
///
/// Fetches the live configuration once, mid-sequence. The returned
/// snapshot is threaded read-only into the later cache warm-up step.
pub trait ConfigurationService: Send + Sync {
    /// Fetch the current live configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be fetched or
    /// deserialized. This failure is fatal to the boot.
    fn fetch_live(&self) -> impl Future<Output = anyhow::Result<ConfigurationSnapshot>> + Send;
}
