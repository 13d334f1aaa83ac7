//! Boot environment.
//!
//! This module defines the environment type for dependency injection
//! in the boot sequencer: every external collaborator the sequence
//! touches, threaded explicitly rather than held as ambient state so
//! each step's dependencies are visible in its signature.

use typetempo_core::{
    CacheBroker, CacheWarmer, ConfigurationService, DataStore, EmailClient, IdentityCredential,
    IdentityProvider, TelemetrySink,
};

/// Boot environment.
///
/// Contains all external collaborators needed by the boot sequencer.
///
/// # Type Parameters
///
/// - `S`: persistent data store
/// - `I`: identity provider
/// - `C`: configuration service
/// - `M`: email client
/// - `B`: cache/broker probe
/// - `T`: telemetry sink
/// - `W`: cache warmer (consumes the broker handle)
#[derive(Clone)]
pub struct BootEnvironment<S, I, C, M, B, T, W>
where
    S: DataStore,
    I: IdentityProvider,
    C: ConfigurationService,
    M: EmailClient + Clone,
    B: CacheBroker,
    T: TelemetrySink + Clone,
    W: CacheWarmer<B::Handle>,
{
    /// Persistent data store.
    pub store: S,

    /// Identity/credential provider.
    pub identity: I,

    /// Remote configuration service.
    pub configuration: C,

    /// Transactional email client.
    pub email: M,

    /// Cache/broker connection probe.
    pub broker: B,

    /// Telemetry sink.
    pub telemetry: T,

    /// Daily-leaderboard cache warmer.
    pub cache: W,

    /// Opaque secret bundle handed to the identity provider.
    pub credential: IdentityCredential,
}

impl<S, I, C, M, B, T, W> BootEnvironment<S, I, C, M, B, T, W>
where
    S: DataStore,
    I: IdentityProvider,
    C: ConfigurationService,
    M: EmailClient + Clone,
    B: CacheBroker,
    T: TelemetrySink + Clone,
    W: CacheWarmer<B::Handle>,
{
    /// Create a new boot environment.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: S,
        identity: I,
        configuration: C,
        email: M,
        broker: B,
        telemetry: T,
        cache: W,
        credential: IdentityCredential,
    ) -> Self {
        Self {
            store,
            identity,
            configuration,
            email,
            broker,
            telemetry,
            cache,
            credential,
        }
    }
}
