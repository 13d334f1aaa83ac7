//! Mock implementations of the boot collaborators.

use crate::call_log::CallLog;
use std::future::Future;
use typetempo_core::{
    BrokerConfigError, CacheBroker, CacheWarmer, ConfigurationService, ConfigurationSnapshot,
    ConnectionState, DailyLeaderboardsConfig, DataStore, EmailClient, IdentityCredential,
    IdentityProvider, TelemetrySink,
};

/// Mock persistent data store.
#[derive(Debug, Clone)]
pub struct MockDataStore {
    log: CallLog,
    should_succeed: bool,
}

impl MockDataStore {
    /// A store whose connect succeeds.
    #[must_use]
    pub const fn new(log: CallLog) -> Self {
        Self {
            log,
            should_succeed: true,
        }
    }

    /// A store whose connect fails.
    #[must_use]
    pub const fn failing(log: CallLog) -> Self {
        Self {
            log,
            should_succeed: false,
        }
    }
}

impl DataStore for MockDataStore {
    fn connect(&self) -> impl Future<Output = anyhow::Result<()>> + Send {
        let log = self.log.clone();
        let should_succeed = self.should_succeed;
        async move {
            log.record("store.connect");
            if should_succeed {
                Ok(())
            } else {
                Err(anyhow::anyhow!("connection refused"))
            }
        }
    }
}

/// Mock identity provider.
#[derive(Debug, Clone)]
pub struct MockIdentityProvider {
    log: CallLog,
    should_succeed: bool,
}

impl MockIdentityProvider {
    /// A provider whose initialization succeeds.
    #[must_use]
    pub const fn new(log: CallLog) -> Self {
        Self {
            log,
            should_succeed: true,
        }
    }

    /// A provider that rejects every credential.
    #[must_use]
    pub const fn failing(log: CallLog) -> Self {
        Self {
            log,
            should_succeed: false,
        }
    }
}

impl IdentityProvider for MockIdentityProvider {
    fn initialize(
        &self,
        _credential: &IdentityCredential,
    ) -> impl Future<Output = anyhow::Result<()>> + Send {
        let log = self.log.clone();
        let should_succeed = self.should_succeed;
        async move {
            log.record("identity.initialize");
            if should_succeed {
                Ok(())
            } else {
                Err(anyhow::anyhow!("credential rejected"))
            }
        }
    }
}

/// Mock configuration service returning a fixed snapshot.
#[derive(Debug, Clone)]
pub struct MockConfigurationService {
    log: CallLog,
    snapshot: ConfigurationSnapshot,
    should_succeed: bool,
}

impl MockConfigurationService {
    /// A service returning the default snapshot.
    #[must_use]
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            snapshot: ConfigurationSnapshot::default(),
            should_succeed: true,
        }
    }

    /// A service whose fetch fails.
    #[must_use]
    pub fn failing(log: CallLog) -> Self {
        Self {
            log,
            snapshot: ConfigurationSnapshot::default(),
            should_succeed: false,
        }
    }

    /// Replace the snapshot the service returns.
    #[must_use]
    pub fn with_snapshot(mut self, snapshot: ConfigurationSnapshot) -> Self {
        self.snapshot = snapshot;
        self
    }
}

impl ConfigurationService for MockConfigurationService {
    fn fetch_live(&self) -> impl Future<Output = anyhow::Result<ConfigurationSnapshot>> + Send {
        let log = self.log.clone();
        let snapshot = self.snapshot.clone();
        let should_succeed = self.should_succeed;
        async move {
            log.record("configuration.fetch_live");
            if should_succeed {
                Ok(snapshot)
            } else {
                Err(anyhow::anyhow!("configuration store unreachable"))
            }
        }
    }
}

/// Mock email client recording every diagnostic send.
#[derive(Debug, Clone)]
pub struct MockEmailClient {
    log: CallLog,
    init_succeeds: bool,
    send_succeeds: bool,
}

impl MockEmailClient {
    /// A client whose init and sends succeed.
    #[must_use]
    pub const fn new(log: CallLog) -> Self {
        Self {
            log,
            init_succeeds: true,
            send_succeeds: true,
        }
    }

    /// A client whose init fails.
    #[must_use]
    pub const fn failing_init(log: CallLog) -> Self {
        Self {
            log,
            init_succeeds: false,
            send_succeeds: true,
        }
    }

    /// A client that initializes but rejects every send.
    #[must_use]
    pub const fn failing_send(log: CallLog) -> Self {
        Self {
            log,
            init_succeeds: true,
            send_succeeds: false,
        }
    }

    /// Number of diagnostic sends recorded so far.
    #[must_use]
    pub fn diagnostic_sends(&self) -> usize {
        self.log.count_prefixed("email.send_diagnostic:")
    }
}

impl EmailClient for MockEmailClient {
    fn init(&self) -> impl Future<Output = anyhow::Result<()>> + Send {
        let log = self.log.clone();
        let init_succeeds = self.init_succeeds;
        async move {
            log.record("email.init");
            if init_succeeds {
                Ok(())
            } else {
                Err(anyhow::anyhow!("smtp relay rejected credentials"))
            }
        }
    }

    fn send_diagnostic(
        &self,
        recipient: &str,
        _label: &str,
        _link: &str,
    ) -> impl Future<Output = anyhow::Result<()>> + Send {
        let log = self.log.clone();
        let send_succeeds = self.send_succeeds;
        let entry = format!("email.send_diagnostic:{recipient}");
        async move {
            log.record(entry);
            if send_succeeds {
                Ok(())
            } else {
                Err(anyhow::anyhow!("recipient rejected"))
            }
        }
    }
}

/// Handle handed out by [`MockBroker`] when scripted as connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockHandle;

#[derive(Debug, Clone, Copy)]
enum BrokerScript {
    Connected,
    Unavailable,
    Misconfigured,
}

/// Mock cache/broker probe with a scripted outcome.
#[derive(Debug, Clone)]
pub struct MockBroker {
    log: CallLog,
    script: BrokerScript,
}

impl MockBroker {
    /// A broker that connects.
    #[must_use]
    pub const fn connected(log: CallLog) -> Self {
        Self {
            log,
            script: BrokerScript::Connected,
        }
    }

    /// A broker that is unreachable (graceful degradation).
    #[must_use]
    pub const fn unavailable(log: CallLog) -> Self {
        Self {
            log,
            script: BrokerScript::Unavailable,
        }
    }

    /// A broker with malformed configuration (fatal).
    #[must_use]
    pub const fn misconfigured(log: CallLog) -> Self {
        Self {
            log,
            script: BrokerScript::Misconfigured,
        }
    }
}

impl CacheBroker for MockBroker {
    type Handle = MockHandle;

    fn connect(
        &self,
    ) -> impl Future<Output = Result<ConnectionState<Self::Handle>, BrokerConfigError>> + Send
    {
        let log = self.log.clone();
        let script = self.script;
        async move {
            log.record("broker.connect");
            match script {
                BrokerScript::Connected => Ok(ConnectionState::Connected(MockHandle)),
                BrokerScript::Unavailable => Ok(ConnectionState::Unavailable),
                BrokerScript::Misconfigured => {
                    Err(BrokerConfigError("unparsable broker url".to_string()))
                }
            }
        }
    }
}

/// Mock telemetry sink.
#[derive(Debug, Clone)]
pub struct MockTelemetry {
    log: CallLog,
    should_succeed: bool,
}

impl MockTelemetry {
    /// A sink that accepts every sample.
    #[must_use]
    pub const fn new(log: CallLog) -> Self {
        Self {
            log,
            should_succeed: true,
        }
    }

    /// A sink that rejects every sample.
    #[must_use]
    pub const fn failing(log: CallLog) -> Self {
        Self {
            log,
            should_succeed: false,
        }
    }
}

impl TelemetrySink for MockTelemetry {
    fn record_version(&self, version: &str) -> impl Future<Output = anyhow::Result<()>> + Send {
        let log = self.log.clone();
        let should_succeed = self.should_succeed;
        let entry = format!("telemetry.record_version:{version}");
        async move {
            log.record(entry);
            if should_succeed {
                Ok(())
            } else {
                Err(anyhow::anyhow!("metrics recorder not installed"))
            }
        }
    }
}

/// Mock daily-leaderboard cache warmer.
#[derive(Debug, Clone)]
pub struct MockCacheWarmer {
    log: CallLog,
    should_succeed: bool,
}

impl MockCacheWarmer {
    /// A warmer that succeeds.
    #[must_use]
    pub const fn new(log: CallLog) -> Self {
        Self {
            log,
            should_succeed: true,
        }
    }

    /// A warmer that fails.
    #[must_use]
    pub const fn failing(log: CallLog) -> Self {
        Self {
            log,
            should_succeed: false,
        }
    }
}

impl CacheWarmer<MockHandle> for MockCacheWarmer {
    fn warm(
        &self,
        _handle: &MockHandle,
        config: &DailyLeaderboardsConfig,
    ) -> impl Future<Output = anyhow::Result<()>> + Send {
        let log = self.log.clone();
        let should_succeed = self.should_succeed;
        let entry = format!("cache.warm:enabled={}", config.enabled);
        async move {
            log.record(entry);
            if should_succeed {
                Ok(())
            } else {
                Err(anyhow::anyhow!("cache write failed"))
            }
        }
    }
}
