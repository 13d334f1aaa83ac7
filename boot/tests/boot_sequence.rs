//! Integration tests for the boot sequence.
//!
//! Every test drives the real sequencer against mock collaborators
//! that record their invocations into a shared call log, asserting
//! the ordering, gating and fail-fast properties of the sequence.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use axum::Router;
use std::time::Duration;
use typetempo_boot::{
    BootEnvironment, BootSequencer, CronDescriptor, DiagnosticEmailSettings, QueueDescriptor,
    Settings, SubsystemRegistry, WorkerDescriptor,
};
use typetempo_core::{BootError, IdentityCredential};
use typetempo_testing::{
    CallLog, MockBroker, MockCacheWarmer, MockConfigurationService, MockDataStore,
    MockEmailClient, MockHandle, MockIdentityProvider, MockTelemetry,
};

type TestEnv = BootEnvironment<
    MockDataStore,
    MockIdentityProvider,
    MockConfigurationService,
    MockEmailClient,
    MockBroker,
    MockTelemetry,
    MockCacheWarmer,
>;

const TEST_VERSION: &str = "0.0.0-test";

fn env_with(log: &CallLog, broker: MockBroker) -> TestEnv {
    BootEnvironment::new(
        MockDataStore::new(log.clone()),
        MockIdentityProvider::new(log.clone()),
        MockConfigurationService::new(log.clone()),
        MockEmailClient::new(log.clone()),
        broker,
        MockTelemetry::new(log.clone()),
        MockCacheWarmer::new(log.clone()),
        IdentityCredential::new("test-credential".to_string()),
    )
}

fn test_settings() -> Settings {
    Settings {
        port: 0,
        mode: "test".to_string(),
        diagnostic: None,
    }
}

fn counting_queue(log: &CallLog, name: &'static str) -> QueueDescriptor<MockHandle> {
    let log = log.clone();
    QueueDescriptor::new(name, move |_handle| {
        let log = log.clone();
        async move {
            log.record(format!("queue.init:{name}"));
            Ok(())
        }
    })
}

fn counting_worker(log: &CallLog, name: &'static str) -> WorkerDescriptor<MockHandle> {
    let log = log.clone();
    WorkerDescriptor::new(name, move |_handle| {
        let log = log.clone();
        async move {
            log.record(format!("worker.start:{name}"));
            Ok(())
        }
    })
}

fn counting_cron(log: &CallLog, name: &'static str) -> CronDescriptor {
    let log = log.clone();
    CronDescriptor::new(name, move || {
        log.record(format!("cron.start:{name}"));
        Ok(())
    })
}

fn full_registry(log: &CallLog) -> SubsystemRegistry<MockHandle> {
    SubsystemRegistry::new()
        .with_queue(counting_queue(log, "Q1"))
        .with_queue(counting_queue(log, "Q2"))
        .with_worker(counting_worker(log, "W1"))
        .with_cron(counting_cron(log, "daily-leaderboard-rollover"))
}

fn sequencer(
    env: TestEnv,
    registry: SubsystemRegistry<MockHandle>,
    settings: Settings,
) -> BootSequencer<
    MockDataStore,
    MockIdentityProvider,
    MockConfigurationService,
    MockEmailClient,
    MockBroker,
    MockTelemetry,
    MockCacheWarmer,
> {
    BootSequencer::new(env, registry, settings, Router::new(), TEST_VERSION)
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not met within one second");
}

// Scenario A: broker unavailable. The sequence still reaches Ready,
// and neither the queues, the workers nor the cache warm-up run.
#[tokio::test]
async fn broker_unavailable_degrades_but_still_reaches_ready() {
    let log = CallLog::new();
    let env = env_with(&log, MockBroker::unavailable(log.clone()));

    let ready = sequencer(env, full_registry(&log), test_settings())
        .run()
        .await
        .unwrap();

    assert_ne!(ready.port(), 0);
    assert_eq!(log.count_prefixed("queue.init:"), 0);
    assert_eq!(log.count_prefixed("worker.start:"), 0);
    assert_eq!(log.count_prefixed("cache.warm:"), 0);
    // Steps after the skipped branch still ran.
    assert_eq!(log.count("cron.start:daily-leaderboard-rollover"), 1);
}

// Scenario B: the very first step fails. Nothing after it executes
// and the underlying cause survives in the error chain.
#[tokio::test]
async fn store_failure_aborts_before_any_later_step() {
    let log = CallLog::new();
    let env = BootEnvironment::new(
        MockDataStore::failing(log.clone()),
        MockIdentityProvider::new(log.clone()),
        MockConfigurationService::new(log.clone()),
        MockEmailClient::new(log.clone()),
        MockBroker::connected(log.clone()),
        MockTelemetry::new(log.clone()),
        MockCacheWarmer::new(log.clone()),
        IdentityCredential::new("test-credential".to_string()),
    );

    let err = sequencer(env, full_registry(&log), test_settings())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, BootError::Store(_)));
    let source = std::error::Error::source(&err).unwrap();
    assert!(source.to_string().contains("connection refused"));

    assert_eq!(log.count("store.connect"), 1);
    assert_eq!(log.count("identity.initialize"), 0);
    assert_eq!(log.count("configuration.fetch_live"), 0);
    assert_eq!(log.count("email.init"), 0);
    assert_eq!(log.count("broker.connect"), 0);
    assert_eq!(log.count_prefixed("cron.start:"), 0);
}

// Scenario C: broker connected, registry Q1, Q2, W1. Both queue inits
// happen before the worker starts, and the sequence reaches Ready.
#[tokio::test]
async fn queues_initialize_before_workers_start() {
    let log = CallLog::new();
    let env = env_with(&log, MockBroker::connected(log.clone()));

    let ready = sequencer(env, full_registry(&log), test_settings())
        .run()
        .await
        .unwrap();
    assert_ne!(ready.port(), 0);

    let q1 = log.index_of("queue.init:Q1").unwrap();
    let q2 = log.index_of("queue.init:Q2").unwrap();
    let w1 = log.index_of("worker.start:W1").unwrap();
    assert!(q1 < w1);
    assert!(q2 < w1);

    assert_eq!(log.count("queue.init:Q1"), 1);
    assert_eq!(log.count("queue.init:Q2"), 1);
    assert_eq!(log.count("worker.start:W1"), 1);
}

// When connected, every registered queue and worker runs exactly once
// before the cache warm-up step.
#[tokio::test]
async fn subsystems_complete_before_cache_warmup() {
    let log = CallLog::new();
    let env = env_with(&log, MockBroker::connected(log.clone()));

    sequencer(env, full_registry(&log), test_settings())
        .run()
        .await
        .unwrap();

    let warm = log.index_of("cache.warm:enabled=false").unwrap();
    for entry in ["queue.init:Q1", "queue.init:Q2", "worker.start:W1"] {
        assert_eq!(log.count(entry), 1);
        assert!(log.index_of(entry).unwrap() < warm);
    }
}

// Mid-sequence required failures: each one stops the sequence at the
// failing step and nothing later is invoked.
#[tokio::test]
async fn each_required_step_gates_the_next() {
    // Identity fails: configuration is never fetched.
    let log = CallLog::new();
    let env = BootEnvironment::new(
        MockDataStore::new(log.clone()),
        MockIdentityProvider::failing(log.clone()),
        MockConfigurationService::new(log.clone()),
        MockEmailClient::new(log.clone()),
        MockBroker::connected(log.clone()),
        MockTelemetry::new(log.clone()),
        MockCacheWarmer::new(log.clone()),
        IdentityCredential::new("test-credential".to_string()),
    );
    let err = sequencer(env, full_registry(&log), test_settings())
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, BootError::Identity(_)));
    assert_eq!(log.count("configuration.fetch_live"), 0);

    // Configuration fails: the email client is never initialized.
    let log = CallLog::new();
    let env = BootEnvironment::new(
        MockDataStore::new(log.clone()),
        MockIdentityProvider::new(log.clone()),
        MockConfigurationService::failing(log.clone()),
        MockEmailClient::new(log.clone()),
        MockBroker::connected(log.clone()),
        MockTelemetry::new(log.clone()),
        MockCacheWarmer::new(log.clone()),
        IdentityCredential::new("test-credential".to_string()),
    );
    let err = sequencer(env, full_registry(&log), test_settings())
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, BootError::Configuration(_)));
    assert_eq!(log.count("email.init"), 0);

    // Email init fails: the broker is never probed.
    let log = CallLog::new();
    let env = BootEnvironment::new(
        MockDataStore::new(log.clone()),
        MockIdentityProvider::new(log.clone()),
        MockConfigurationService::new(log.clone()),
        MockEmailClient::failing_init(log.clone()),
        MockBroker::connected(log.clone()),
        MockTelemetry::new(log.clone()),
        MockCacheWarmer::new(log.clone()),
        IdentityCredential::new("test-credential".to_string()),
    );
    let err = sequencer(env, full_registry(&log), test_settings())
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, BootError::Email(_)));
    assert_eq!(log.count("broker.connect"), 0);
}

// Malformed broker configuration is operator error and fatal, unlike
// plain unavailability.
#[tokio::test]
async fn broker_misconfiguration_is_fatal() {
    let log = CallLog::new();
    let env = env_with(&log, MockBroker::misconfigured(log.clone()));

    let err = sequencer(env, full_registry(&log), test_settings())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, BootError::BrokerConfig(_)));
    assert_eq!(log.count_prefixed("queue.init:"), 0);
    assert_eq!(log.count_prefixed("cron.start:"), 0);
}

// Failure of a single queue initializer aborts the boot: the branch
// shares the fatal envelope of the broker step.
#[tokio::test]
async fn queue_failure_inside_the_branch_is_fatal() {
    let log = CallLog::new();
    let env = env_with(&log, MockBroker::connected(log.clone()));
    let registry = SubsystemRegistry::new()
        .with_queue(counting_queue(&log, "Q1"))
        .with_queue(QueueDescriptor::new("broken", |_handle: MockHandle| async {
            Err(anyhow::anyhow!("stream group create failed"))
        }))
        .with_worker(counting_worker(&log, "W1"));

    let err = sequencer(env, registry, test_settings())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, BootError::Queue { ref name, .. } if name == "broken"));
    assert_eq!(log.count("worker.start:W1"), 0);
    assert_eq!(log.count_prefixed("cache.warm:"), 0);
}

#[tokio::test]
async fn cron_start_failure_is_fatal() {
    let log = CallLog::new();
    let env = env_with(&log, MockBroker::unavailable(log.clone()));
    let registry = SubsystemRegistry::new().with_cron(CronDescriptor::new(
        "stale-session-sweep",
        || Err(anyhow::anyhow!("scheduler rejected the job")),
    ));

    let err = sequencer(env, registry, test_settings())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, BootError::Cron { ref name, .. } if name == "stale-session-sweep"));
}

// Telemetry is best effort: a failing sink never prevents Ready.
#[tokio::test]
async fn telemetry_failure_is_not_fatal() {
    let log = CallLog::new();
    let env = BootEnvironment::new(
        MockDataStore::new(log.clone()),
        MockIdentityProvider::new(log.clone()),
        MockConfigurationService::new(log.clone()),
        MockEmailClient::new(log.clone()),
        MockBroker::unavailable(log.clone()),
        MockTelemetry::failing(log.clone()),
        MockCacheWarmer::new(log.clone()),
        IdentityCredential::new("test-credential".to_string()),
    );

    let ready = sequencer(env, full_registry(&log), test_settings())
        .run()
        .await
        .unwrap();
    assert_ne!(ready.port(), 0);

    wait_until(|| log.count_prefixed("telemetry.record_version:") == 1).await;
}

// A failed warm-up degrades to a cold cache; the boot still completes.
#[tokio::test]
async fn cache_warmup_failure_is_not_fatal() {
    let log = CallLog::new();
    let env = BootEnvironment::new(
        MockDataStore::new(log.clone()),
        MockIdentityProvider::new(log.clone()),
        MockConfigurationService::new(log.clone()),
        MockEmailClient::new(log.clone()),
        MockBroker::connected(log.clone()),
        MockTelemetry::new(log.clone()),
        MockCacheWarmer::failing(log.clone()),
        IdentityCredential::new("test-credential".to_string()),
    );

    sequencer(env, full_registry(&log), test_settings())
        .run()
        .await
        .unwrap();

    assert_eq!(log.count_prefixed("cache.warm:"), 1);
    assert_eq!(log.count("cron.start:daily-leaderboard-rollover"), 1);
}

// The diagnostic email goes out iff the trigger is configured.
#[tokio::test]
async fn diagnostic_email_sent_only_when_trigger_is_present() {
    let log = CallLog::new();
    let email = MockEmailClient::new(log.clone());
    let env = BootEnvironment::new(
        MockDataStore::new(log.clone()),
        MockIdentityProvider::new(log.clone()),
        MockConfigurationService::new(log.clone()),
        email.clone(),
        MockBroker::unavailable(log.clone()),
        MockTelemetry::new(log.clone()),
        MockCacheWarmer::new(log.clone()),
        IdentityCredential::new("test-credential".to_string()),
    );
    let settings = Settings {
        diagnostic: Some(DiagnosticEmailSettings {
            recipient: "ops@example.com".to_string(),
            label: "boot check".to_string(),
            link: "https://typetempo.dev".to_string(),
        }),
        ..test_settings()
    };

    sequencer(env, full_registry(&log), settings)
        .run()
        .await
        .unwrap();

    wait_until(|| email.diagnostic_sends() == 1).await;
    assert_eq!(log.count("email.send_diagnostic:ops@example.com"), 1);
}

#[tokio::test]
async fn diagnostic_email_absent_without_trigger() {
    let log = CallLog::new();
    let email = MockEmailClient::new(log.clone());
    let env = BootEnvironment::new(
        MockDataStore::new(log.clone()),
        MockIdentityProvider::new(log.clone()),
        MockConfigurationService::new(log.clone()),
        email.clone(),
        MockBroker::unavailable(log.clone()),
        MockTelemetry::new(log.clone()),
        MockCacheWarmer::new(log.clone()),
        IdentityCredential::new("test-credential".to_string()),
    );

    sequencer(env, full_registry(&log), test_settings())
        .run()
        .await
        .unwrap();

    // Give any stray fire-and-forget task a chance to run.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(email.diagnostic_sends(), 0);
}
