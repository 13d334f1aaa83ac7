//! Identity provider collaborator.

use std::fmt;
use std::future::Future;

/// Opaque secret bundle handed to the identity provider.
///
/// The orchestrator never inspects the contents; it only carries the
/// bundle from the environment to [`IdentityProvider::initialize`].
/// The `Debug` impl redacts the payload so the secret can never leak
/// into a log line.
#[derive(Clone)]
pub struct IdentityCredential(String);

impl IdentityCredential {
    /// Wrap raw credential material.
    #[must_use]
    pub const fn new(raw: String) -> Self {
        Self(raw)
    }

    /// The raw credential material.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for IdentityCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdentityCredential(<redacted>)")
    }
}

/// Identity/credential provider.
///
/// This trait abstracts over the identity SDK (service-account based
/// providers, OIDC issuers, etc.).
pub trait IdentityProvider: Send + Sync {
    /// Initialize the provider with the supplied credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential is malformed or rejected.
    /// This failure is fatal to the boot.
    fn initialize(
        &self,
        credential: &IdentityCredential,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}
