//! Boot collaborators.
//!
//! This module defines one trait per external subsystem the boot
//! sequence touches. These traits enable dependency injection and make
//! the sequencing logic testable without a database, a broker or an
//! SMTP relay.
//!
//! Providers are **interfaces**, not implementations. The sequencer
//! depends on these traits; the server binary supplies production
//! implementations (`PostgreSQL`, `Redis`, SMTP) and the testing crate
//! supplies deterministic mocks.

pub mod broker;
pub mod cache;
pub mod configuration;
pub mod email;
pub mod identity;
pub mod store;
pub mod telemetry;

pub use broker::CacheBroker;
pub use cache::CacheWarmer;
pub use configuration::ConfigurationService;
pub use email::EmailClient;
pub use identity::{IdentityCredential, IdentityProvider};
pub use store::DataStore;
pub use telemetry::TelemetrySink;
