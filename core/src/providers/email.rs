//! Transactional email collaborator.

use std::future::Future;

/// Transactional email client.
///
/// This trait abstracts over the delivery transport (SMTP relay,
/// SendGrid, AWS SES, etc.).
pub trait EmailClient: Send + Sync {
    /// Initialize the client (verify transport credentials, open the
    /// connection pool).
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be set up. This
    /// failure is fatal to the boot.
    fn init(&self) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Send the operator diagnostic email.
    ///
    /// Dispatched fire-and-forget after boot; a delivery failure is
    /// logged by the caller and never aborts anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the message is rejected by the transport.
    fn send_diagnostic(
        &self,
        recipient: &str,
        label: &str,
        link: &str,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}
