//! Core types and collaborator traits for the TypeTempo backend boot sequence.
//!
//! The boot orchestrator brings the backend from "process started" to
//! "accepting requests" by driving a fixed sequence of subsystem
//! initializations. This crate defines the vocabulary that sequence is
//! written in: the tri-state broker [`ConnectionState`], the
//! [`ConfigurationSnapshot`] fetched mid-sequence and threaded into the
//! cache warm-up step, the [`BootError`] taxonomy, and one trait per
//! external collaborator.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │           Boot sequencer (boot)          │  ← ordering, fail-fast
//! ├──────────────────────────────────────────┤
//! │        Collaborator traits (here)        │  ← DataStore, CacheBroker, ...
//! ├──────────────────────────────────────────┤
//! │   Production implementations (server)    │  ← sqlx, redis, lettre
//! │   Mock implementations (testing)         │  ← call recording
//! └──────────────────────────────────────────┘
//! ```
//!
//! Collaborators are **interfaces**, not implementations. The sequencer
//! depends on these traits; the server binary provides production
//! implementations and the testing crate provides deterministic mocks.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod connection;
pub mod error;
pub mod providers;
pub mod snapshot;

pub use connection::ConnectionState;
pub use error::{BootError, BrokerConfigError, Result};
pub use providers::{
    CacheBroker, CacheWarmer, ConfigurationService, DataStore, EmailClient, IdentityCredential,
    IdentityProvider, TelemetrySink,
};
pub use snapshot::{ConfigurationSnapshot, DailyLeaderboardsConfig};
