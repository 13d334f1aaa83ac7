//! Error types for the boot sequence.

use thiserror::Error;

/// Result type alias for boot operations.
pub type Result<T> = std::result::Result<T, BootError>;

/// Failure raised by a required boot step.
///
/// Every variant is fatal: the sequencer stops at the failing step,
/// logs the full cause chain and the process exits with status 1.
/// Situations that are *not* fatal (broker unreachable, cache warm-up
/// failure, telemetry or diagnostic-email errors) never surface as a
/// `BootError`; they are logged and the sequence continues.
#[derive(Debug, Error)]
pub enum BootError {
    /// Environment settings are missing or malformed.
    #[error("invalid settings: {0}")]
    Settings(String),

    /// The persistent data store could not be reached.
    #[error("failed to connect to the data store")]
    Store(#[source] anyhow::Error),

    /// The identity provider rejected the supplied credential.
    #[error("failed to initialize the identity provider")]
    Identity(#[source] anyhow::Error),

    /// The live configuration snapshot could not be fetched.
    #[error("failed to fetch the live configuration")]
    Configuration(#[source] anyhow::Error),

    /// The email client failed to initialize.
    #[error("failed to initialize the email client")]
    Email(#[source] anyhow::Error),

    /// The broker configuration is malformed.
    ///
    /// Distinct from broker *unavailability*: a bad URL is operator
    /// error and aborts the boot, an unreachable broker degrades.
    #[error(transparent)]
    BrokerConfig(#[from] BrokerConfigError),

    /// A queue failed to initialize after the broker connected.
    #[error("failed to initialize queue {name}")]
    Queue {
        /// Name of the failing queue.
        name: String,
        /// Underlying cause.
        #[source]
        source: anyhow::Error,
    },

    /// A worker failed to start after the broker connected.
    #[error("failed to start worker {name}")]
    Worker {
        /// Name of the failing worker.
        name: String,
        /// Underlying cause.
        #[source]
        source: anyhow::Error,
    },

    /// A cron job failed to start.
    #[error("failed to start cron job {name}")]
    Cron {
        /// Name of the failing job.
        name: String,
        /// Underlying cause.
        #[source]
        source: anyhow::Error,
    },

    /// The network listener could not be bound.
    #[error("failed to bind listener on port {port}")]
    Listen {
        /// Requested port.
        port: u16,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },
}

/// Malformed cache/broker configuration, detected before any connect
/// attempt is made.
#[derive(Debug, Error)]
#[error("invalid broker configuration: {0}")]
pub struct BrokerConfigError(pub String);
