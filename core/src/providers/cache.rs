//! Cache warm-up collaborator.

use crate::snapshot::DailyLeaderboardsConfig;
use std::future::Future;

/// Daily-leaderboard cache warmer.
///
/// Runs only when the broker connected, consuming the warm-up
/// parameters from the configuration snapshot fetched earlier in the
/// sequence. A warm-up failure is logged and the boot continues; a
/// cold cache is a degradation, not an outage.
pub trait CacheWarmer<H>: Send + Sync {
    /// Prime the cache through the broker handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache could not be primed. The caller
    /// logs it and continues.
    fn warm(
        &self,
        handle: &H,
        config: &DailyLeaderboardsConfig,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}
