//! Redis cache/broker probe.

use redis::Client;
use redis::aio::ConnectionManager;
use std::future::Future;
use tracing::warn;
use typetempo_core::{BrokerConfigError, CacheBroker, ConnectionState};

/// Clonable handle over the shared Redis connection.
///
/// Handed read-only to every queue and worker initializer; each caller
/// clones its own multiplexed connection off the manager.
#[derive(Clone)]
pub struct RedisHandle {
    manager: ConnectionManager,
}

impl RedisHandle {
    /// A multiplexed connection for this caller.
    #[must_use]
    pub fn connection(&self) -> ConnectionManager {
        self.manager.clone()
    }
}

/// Redis connection probe.
///
/// A URL that does not parse is operator error and fails the boot; a
/// server that does not answer is reported as `Unavailable` and the
/// service degrades.
#[derive(Debug, Clone)]
pub struct RedisBroker {
    url: String,
}

impl RedisBroker {
    /// Create a probe for a Redis URL.
    #[must_use]
    pub const fn new(url: String) -> Self {
        Self { url }
    }
}

impl CacheBroker for RedisBroker {
    type Handle = RedisHandle;

    fn connect(
        &self,
    ) -> impl Future<Output = Result<ConnectionState<Self::Handle>, BrokerConfigError>> + Send
    {
        let url = self.url.clone();
        async move {
            let client = Client::open(url.as_str())
                .map_err(|error| BrokerConfigError(format!("unparsable redis url: {error}")))?;

            match ConnectionManager::new(client).await {
                Ok(manager) => Ok(ConnectionState::Connected(RedisHandle { manager })),
                Err(error) => {
                    warn!(%error, "redis unreachable");
                    Ok(ConnectionState::Unavailable)
                }
            }
        }
    }
}
