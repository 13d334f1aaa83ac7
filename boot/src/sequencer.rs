//! The boot sequencer.
//!
//! Executes the fixed step sequence and enforces the fail-fast
//! contract: any required-step failure stops the sequence, is logged
//! with its full cause chain and propagates to the binary, which exits
//! with status 1. The broker-gated branch (queues, workers, warm
//! cache) and the best-effort tail (telemetry, diagnostic email) are
//! the only deviations from strict fatality.

use crate::environment::BootEnvironment;
use crate::listen::{ListenGate, ReadyHandle};
use crate::registry::SubsystemRegistry;
use crate::settings::Settings;
use axum::Router;
use futures::future::try_join_all;
use std::fmt::Write as _;
use tracing::{error, info, warn};
use typetempo_core::{
    BootError, CacheBroker, CacheWarmer, ConfigurationService, DataStore, EmailClient,
    IdentityProvider, Result, TelemetrySink,
};

/// A step of the boot sequence.
///
/// Steps execute in strictly increasing index order; a later step
/// never begins before an earlier required step has completed
/// successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootStep {
    /// Connect the persistent data store.
    Store,
    /// Initialize the identity provider.
    Identity,
    /// Fetch the live configuration snapshot.
    Configuration,
    /// Initialize the email client.
    Email,
    /// Connect the cache/broker.
    Broker,
    /// Initialize queues, then start workers (broker-gated).
    Subsystems,
    /// Warm the daily-leaderboard cache (broker-gated).
    CacheWarmup,
    /// Start the cron jobs.
    Cron,
    /// Record the server version.
    Telemetry,
    /// Dispatch the operator diagnostic email (trigger-gated).
    Diagnostic,
    /// Bind the network listener.
    Listen,
}

impl BootStep {
    /// One-based position in the sequence.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Store => 1,
            Self::Identity => 2,
            Self::Configuration => 3,
            Self::Email => 4,
            Self::Broker => 5,
            Self::Subsystems => 6,
            Self::CacheWarmup => 7,
            Self::Cron => 8,
            Self::Telemetry => 9,
            Self::Diagnostic => 10,
            Self::Listen => 11,
        }
    }

    /// Whether a failure here is fatal to the process.
    #[must_use]
    pub const fn required(self) -> bool {
        !matches!(self, Self::Subsystems | Self::CacheWarmup)
    }

    /// Log line emitted when the step begins.
    #[must_use]
    pub const fn attempt_message(self) -> &'static str {
        match self {
            Self::Store => "connecting to data store",
            Self::Identity => "initializing identity provider",
            Self::Configuration => "fetching live configuration",
            Self::Email => "initializing email client",
            Self::Broker => "connecting to cache broker",
            Self::Subsystems => "initializing queues and workers",
            Self::CacheWarmup => "warming daily-leaderboard cache",
            Self::Cron => "starting cron jobs",
            Self::Telemetry => "recording server version",
            Self::Diagnostic => "dispatching diagnostic email",
            Self::Listen => "binding api listener",
        }
    }
}

/// Where the sequencer currently is.
///
/// Transitions strictly forward: `NotStarted -> Running(step) ->
/// {Ready, Aborted}`. `Ready` is reachable only after the listen step
/// succeeded; `Aborted` from any required step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootPhase {
    /// `run` has not been called yet.
    NotStarted,
    /// The named step is executing.
    Running(BootStep),
    /// The listener is bound and accepting connections.
    Ready,
    /// A required step failed; the process is terminating.
    Aborted,
}

/// The central boot orchestrator.
///
/// Owns the collaborators, the subsystem registry, the settings and
/// the application router, and drives them through the fixed step
/// sequence exactly once.
pub struct BootSequencer<S, I, C, M, B, T, W>
where
    S: DataStore,
    I: IdentityProvider,
    C: ConfigurationService,
    M: EmailClient + Clone,
    B: CacheBroker,
    T: TelemetrySink + Clone,
    W: CacheWarmer<B::Handle>,
{
    env: BootEnvironment<S, I, C, M, B, T, W>,
    registry: SubsystemRegistry<B::Handle>,
    settings: Settings,
    router: Router,
    version: &'static str,
    phase: BootPhase,
}

impl<S, I, C, M, B, T, W> BootSequencer<S, I, C, M, B, T, W>
where
    S: DataStore,
    I: IdentityProvider,
    C: ConfigurationService,
    M: EmailClient + Clone + 'static,
    B: CacheBroker,
    T: TelemetrySink + Clone + 'static,
    W: CacheWarmer<B::Handle>,
{
    /// Create a sequencer.
    ///
    /// `version` is the crate version recorded by the telemetry step
    /// and printed in the startup banner.
    #[must_use]
    pub const fn new(
        env: BootEnvironment<S, I, C, M, B, T, W>,
        registry: SubsystemRegistry<B::Handle>,
        settings: Settings,
        router: Router,
        version: &'static str,
    ) -> Self {
        Self {
            env,
            registry,
            settings,
            router,
            version,
            phase: BootPhase::NotStarted,
        }
    }

    /// Current phase of the sequence.
    #[must_use]
    pub const fn phase(&self) -> BootPhase {
        self.phase
    }

    /// Run the boot sequence to completion.
    ///
    /// Returns the [`ReadyHandle`] once the listener is bound. On a
    /// required-step failure the error is logged here with its full
    /// cause chain and returned; the caller is expected to terminate
    /// the process with a non-zero status.
    ///
    /// # Errors
    ///
    /// Returns the [`BootError`] of the first failing required step.
    pub async fn run(self) -> Result<ReadyHandle> {
        info!(
            version = self.version,
            mode = %self.settings.mode,
            "starting server"
        );

        match self.execute().await {
            Ok(ready) => Ok(ready),
            Err(error) => {
                error!("failed to boot server: {}", render_cause(&error));
                Err(error)
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    async fn execute(mut self) -> Result<ReadyHandle> {
        self.enter(BootStep::Store);
        self.env.store.connect().await.map_err(BootError::Store)?;
        info!("data store connected");

        self.enter(BootStep::Identity);
        self.env
            .identity
            .initialize(&self.env.credential)
            .await
            .map_err(BootError::Identity)?;
        info!("identity provider initialized");

        self.enter(BootStep::Configuration);
        let snapshot = self
            .env
            .configuration
            .fetch_live()
            .await
            .map_err(BootError::Configuration)?;
        info!("live configuration fetched");

        self.enter(BootStep::Email);
        self.env.email.init().await.map_err(BootError::Email)?;
        info!("email client initialized");

        self.enter(BootStep::Broker);
        let connection = self.env.broker.connect().await?;
        if !connection.is_connected() {
            warn!("cache broker unavailable, queues, workers and the warm cache stay disabled");
        }

        // Broker-gated branch. Failures inside it share the fatal
        // envelope of the broker step: the branch only exists at all
        // when connectivity already succeeded.
        if let Some(handle) = connection.handle() {
            info!("cache broker connected");

            self.enter(BootStep::Subsystems);
            let queue_inits = self.registry.queues().iter().map(|queue| {
                let handle = handle.clone();
                async move {
                    queue.init(handle).await.map_err(|source| BootError::Queue {
                        name: queue.name().to_string(),
                        source,
                    })
                }
            });
            try_join_all(queue_inits).await?;
            info!(queues = %self.registry.queue_names(), "queues initialized");

            // Workers start only after every queue exists.
            let worker_starts = self.registry.workers().iter().map(|worker| {
                let handle = handle.clone();
                async move {
                    worker
                        .start(handle)
                        .await
                        .map_err(|source| BootError::Worker {
                            name: worker.name().to_string(),
                            source,
                        })
                }
            });
            try_join_all(worker_starts).await?;
            info!(workers = %self.registry.worker_names(), "workers started");

            self.enter(BootStep::CacheWarmup);
            match self
                .env
                .cache
                .warm(handle, &snapshot.daily_leaderboards)
                .await
            {
                Ok(()) => info!("daily-leaderboard cache warmed"),
                Err(error) => {
                    warn!(%error, "cache warm-up failed, continuing with a cold cache");
                }
            }
        }

        self.enter(BootStep::Cron);
        for cron in self.registry.crons() {
            cron.start().map_err(|source| BootError::Cron {
                name: cron.name().to_string(),
                source,
            })?;
        }
        info!("cron jobs started");

        self.enter(BootStep::Telemetry);
        let telemetry = self.env.telemetry.clone();
        let version = self.version;
        tokio::spawn(async move {
            if let Err(error) = telemetry.record_version(version).await {
                warn!(%error, "failed to record server version");
            }
        });

        if let Some(diagnostic) = self.settings.diagnostic.clone() {
            self.enter(BootStep::Diagnostic);
            let email = self.env.email.clone();
            tokio::spawn(async move {
                match email
                    .send_diagnostic(&diagnostic.recipient, &diagnostic.label, &diagnostic.link)
                    .await
                {
                    Ok(()) => info!(recipient = %diagnostic.recipient, "diagnostic email dispatched"),
                    Err(error) => warn!(
                        %error,
                        recipient = %diagnostic.recipient,
                        "diagnostic email delivery failed"
                    ),
                }
            });
        }

        self.enter(BootStep::Listen);
        let gate = ListenGate::new(self.router);
        let ready = gate.bind(self.settings.port).await?;
        self.phase = BootPhase::Ready;
        Ok(ready)
    }

    fn enter(&mut self, step: BootStep) {
        self.phase = BootPhase::Running(step);
        info!(step = step.index(), "{}", step.attempt_message());
    }
}

/// Render an error with its full cause chain on one line.
fn render_cause(error: &BootError) -> String {
    let mut rendered = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        let _ = write!(rendered, ": {cause}");
        source = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_indices_are_strictly_increasing() {
        let steps = [
            BootStep::Store,
            BootStep::Identity,
            BootStep::Configuration,
            BootStep::Email,
            BootStep::Broker,
            BootStep::Subsystems,
            BootStep::CacheWarmup,
            BootStep::Cron,
            BootStep::Telemetry,
            BootStep::Diagnostic,
            BootStep::Listen,
        ];
        for pair in steps.windows(2) {
            assert!(pair[0].index() < pair[1].index());
        }
    }

    #[test]
    fn only_the_broker_gated_steps_are_optional() {
        assert!(!BootStep::Subsystems.required());
        assert!(!BootStep::CacheWarmup.required());
        assert!(BootStep::Store.required());
        assert!(BootStep::Broker.required());
        assert!(BootStep::Cron.required());
        assert!(BootStep::Listen.required());
    }

    #[test]
    fn cause_chain_is_rendered_on_one_line() {
        let error = BootError::Store(
            anyhow::anyhow!("connection refused").context("pool exhausted"),
        );
        let rendered = render_cause(&error);
        assert!(rendered.contains("failed to connect to the data store"));
        assert!(rendered.contains("connection refused"));
    }
}
