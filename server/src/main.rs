//! TypeTempo backend server binary.
//!
//! Wires the production collaborators (`PostgreSQL`, Redis, SMTP,
//! Prometheus) into the boot sequencer and runs it. Any required-step
//! failure has already been logged by the sequencer when it surfaces
//! here; the process then exits with status 1 and leaves restarting to
//! the outer supervisor.

mod broker;
mod cache;
mod config;
mod email;
mod identity;
mod routes;
mod stores;
mod subsystems;
mod telemetry;

use anyhow::Context as _;
use broker::RedisBroker;
use cache::LeaderboardCacheWarmer;
use config::ServerConfig;
use email::SmtpEmailClient;
use identity::ServiceAccountIdentity;
use metrics_exporter_prometheus::PrometheusBuilder;
use stores::{PgDataStore, PgLiveConfiguration};
use telemetry::PrometheusTelemetry;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use typetempo_boot::{BootEnvironment, BootSequencer, Settings};
use typetempo_core::{BootError, IdentityCredential};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    init_tracing();

    if let Err(error) = boot().await {
        error!(%error, "boot aborted");
        std::process::exit(1);
    }
}

async fn boot() -> Result<(), BootError> {
    let settings = Settings::from_env()?;
    let config = ServerConfig::from_env();

    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|error| BootError::Settings(format!("metrics recorder install failed: {error}")))?;

    let credential = std::fs::read_to_string(&config.credential_path)
        .with_context(|| format!("cannot read credential file {}", config.credential_path))
        .map_err(BootError::Identity)?;

    let store = PgDataStore::new(config.database_url.clone());
    let env = BootEnvironment::new(
        store.clone(),
        ServiceAccountIdentity::default(),
        PgLiveConfiguration::new(store),
        SmtpEmailClient::new(config.smtp.clone()),
        RedisBroker::new(config.redis_url.clone()),
        PrometheusTelemetry,
        LeaderboardCacheWarmer,
        IdentityCredential::new(credential),
    );

    let sequencer = BootSequencer::new(
        env,
        subsystems::registry(),
        settings,
        routes::router(prometheus),
        VERSION,
    );

    let ready = sequencer.run().await?;
    ready.closed().await;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "typetempo_server=info,typetempo_boot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
