//! Boot sequencer for the TypeTempo backend.
//!
//! Drives the service from "process started" to "accepting requests"
//! through a fixed, ordered sequence of initialization steps:
//!
//! ```text
//!  1. connect data store          required
//!  2. initialize identity         required
//!  3. fetch live configuration    required   ──┐ snapshot
//!  4. initialize email client     required     │
//!  5. connect cache/broker        required     │ (unreachable degrades)
//!  6. init queues, start workers  if connected │
//!  7. warm leaderboard cache      if connected ◄┘
//!  8. start cron jobs             required
//!  9. record version telemetry    best effort
//! 10. diagnostic email            if configured
//! 11. bind listener               required
//! ```
//!
//! Any required-step failure aborts the whole boot: the sequencer logs
//! the failure with its full cause chain and returns the error so the
//! binary can exit with status 1. There is no retry and no resumption;
//! restart policy belongs to the outer process supervisor.
//!
//! Within step 6 all queue initializations run concurrently, and all
//! worker starts run concurrently, but the worker phase as a whole
//! waits for the queue phase as a whole (queues must exist before the
//! workers that consume them).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod environment;
pub mod listen;
pub mod registry;
pub mod sequencer;
pub mod settings;

pub use environment::BootEnvironment;
pub use listen::{ListenGate, ReadyHandle};
pub use registry::{CronDescriptor, QueueDescriptor, SubsystemRegistry, WorkerDescriptor};
pub use sequencer::{BootPhase, BootSequencer, BootStep};
pub use settings::{DiagnosticEmailSettings, Settings};
