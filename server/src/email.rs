//! SMTP email client.

use crate::config::SmtpConfig;
use anyhow::Context as _;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport as _, Message, Tokio1Executor};
use std::future::Future;
use std::sync::{Arc, OnceLock};
use typetempo_core::EmailClient;

type Transport = AsyncSmtpTransport<Tokio1Executor>;

/// SMTP-backed transactional email client.
///
/// `init` builds the transport and verifies the relay answers;
/// `send_diagnostic` requires a prior successful `init`.
#[derive(Clone)]
pub struct SmtpEmailClient {
    config: SmtpConfig,
    transport: Arc<OnceLock<Transport>>,
}

impl SmtpEmailClient {
    /// Create a client around an SMTP relay configuration.
    #[must_use]
    pub fn new(config: SmtpConfig) -> Self {
        Self {
            config,
            transport: Arc::new(OnceLock::new()),
        }
    }

    fn build_transport(config: &SmtpConfig) -> anyhow::Result<Transport> {
        let transport = match &config.credentials {
            Some((user, pass)) => Transport::relay(&config.host)
                .context("invalid smtp relay host")?
                .credentials(Credentials::new(user.clone(), pass.clone()))
                .build(),
            // No credentials: plaintext transport for local relays.
            None => Transport::builder_dangerous(&config.host).build(),
        };
        Ok(transport)
    }
}

impl EmailClient for SmtpEmailClient {
    fn init(&self) -> impl Future<Output = anyhow::Result<()>> + Send {
        let config = self.config.clone();
        let slot = Arc::clone(&self.transport);
        async move {
            let transport = Self::build_transport(&config)?;
            let reachable = transport
                .test_connection()
                .await
                .context("smtp relay connection failed")?;
            anyhow::ensure!(reachable, "smtp relay refused the connection");
            let _ = slot.set(transport);
            Ok(())
        }
    }

    fn send_diagnostic(
        &self,
        recipient: &str,
        label: &str,
        link: &str,
    ) -> impl Future<Output = anyhow::Result<()>> + Send {
        let sender = self.config.sender.clone();
        let slot = Arc::clone(&self.transport);
        let recipient = recipient.to_string();
        let label = label.to_string();
        let link = link.to_string();
        async move {
            let transport = slot.get().context("email client not initialized")?;
            let message = Message::builder()
                .from(sender.parse::<Mailbox>().context("invalid sender mailbox")?)
                .to(recipient
                    .parse::<Mailbox>()
                    .context("invalid recipient mailbox")?)
                .subject(format!("{label} is up"))
                .body(format!("Boot diagnostic for {label}: {link}"))
                .context("failed to build diagnostic message")?;
            transport
                .send(message)
                .await
                .context("smtp relay rejected the diagnostic message")?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn transport_builds_without_credentials() {
        let config = SmtpConfig {
            host: "localhost".to_string(),
            credentials: None,
            sender: "TypeTempo <no-reply@typetempo.dev>".to_string(),
        };
        SmtpEmailClient::build_transport(&config).unwrap();
    }

    #[tokio::test]
    async fn sending_before_init_is_an_error() {
        let client = SmtpEmailClient::new(SmtpConfig {
            host: "localhost".to_string(),
            credentials: None,
            sender: "TypeTempo <no-reply@typetempo.dev>".to_string(),
        });
        let err = client
            .send_diagnostic("ops@example.com", "TypeTempo", "https://typetempo.dev")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not initialized"));
    }
}
