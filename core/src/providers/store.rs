//! Persistent data store collaborator.

use std::future::Future;

/// Persistent data store.
///
/// This trait abstracts over the backing database driver. The boot
/// sequence only needs a single operation from it: establish the
/// connection (or connection pool) the rest of the service will use.
pub trait DataStore: Send + Sync {
    /// Connect to the data store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or rejects the
    /// connection. This failure is fatal to the boot.
    fn connect(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}
