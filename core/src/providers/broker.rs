//! Cache/broker connection probe.

use crate::connection::ConnectionState;
use crate::error::BrokerConfigError;
use std::future::Future;

/// Cache/broker connection probe.
///
/// Unlike the other collaborators, `connect` reports unavailability as
/// a *state*, not an error: an unreachable broker degrades the service
/// (queues, workers and the warm cache stay off) but never aborts the
/// boot. Only configuration-level problems detected before the connect
/// attempt (such as a malformed URL) surface as `Err`; those are
/// operator error and abort the boot.
pub trait CacheBroker: Send + Sync {
    /// Connection handle shared read-only by queue and worker
    /// initializers.
    type Handle: Clone + Send + Sync + 'static;

    /// Attempt to establish the broker connection.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerConfigError`] only for malformed configuration;
    /// an unreachable broker yields
    /// `Ok(`[`ConnectionState::Unavailable`]`)`.
    fn connect(
        &self,
    ) -> impl Future<Output = Result<ConnectionState<Self::Handle>, BrokerConfigError>> + Send;
}
