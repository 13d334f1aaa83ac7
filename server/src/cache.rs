//! Daily-leaderboard cache warmer.

use crate::broker::RedisHandle;
use anyhow::Context as _;
use redis::AsyncCommands as _;
use std::future::Future;
use tracing::info;
use typetempo_core::{CacheWarmer, DailyLeaderboardsConfig};

const CONFIG_KEY: &str = "daily-leaderboards:config";

/// Primes the daily-leaderboard cache with the warm-up parameters from
/// the configuration snapshot.
///
/// Workers and request handlers read these parameters from the broker
/// instead of holding their own copy of the live configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaderboardCacheWarmer;

impl CacheWarmer<RedisHandle> for LeaderboardCacheWarmer {
    fn warm(
        &self,
        handle: &RedisHandle,
        config: &DailyLeaderboardsConfig,
    ) -> impl Future<Output = anyhow::Result<()>> + Send {
        let mut conn = handle.connection();
        let config = config.clone();
        async move {
            if !config.enabled {
                info!("daily leaderboards disabled, nothing to warm");
                return Ok(());
            }

            let fields = [
                ("max_results", u64::from(config.max_results)),
                ("expiry_hours", u64::from(config.expiry_hours)),
            ];
            let _: () = conn
                .hset_multiple(CONFIG_KEY, &fields)
                .await
                .context("failed to write leaderboard warm-up parameters")?;

            info!(
                max_results = config.max_results,
                expiry_hours = config.expiry_hours,
                "daily-leaderboard cache primed"
            );
            Ok(())
        }
    }
}
