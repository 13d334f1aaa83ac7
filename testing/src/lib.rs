//! Mock collaborators and test helpers for the TypeTempo boot sequence.
//!
//! Every mock records its invocations into a shared [`CallLog`], so a
//! test can assert both *whether* and *in which order* the sequencer
//! touched each collaborator. Failure injection follows the
//! constructor-per-outcome pattern: `MockDataStore::new` succeeds,
//! `MockDataStore::failing` fails, and so on.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod call_log;
pub mod mocks;

pub use call_log::CallLog;
pub use mocks::{
    MockBroker, MockCacheWarmer, MockConfigurationService, MockDataStore, MockEmailClient,
    MockHandle, MockIdentityProvider, MockTelemetry,
};
