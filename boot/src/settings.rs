//! Orchestrator settings read from the process environment.

use typetempo_core::{BootError, Result};

/// Default listener port when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 5005;

/// Inputs the boot sequence consumes from the process environment.
///
/// Collaborator endpoints (database URL, broker URL, SMTP relay) are
/// read by the server binary when it constructs the collaborators;
/// this struct only carries what the sequencer itself needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Port the listener binds once every prior step succeeded.
    pub port: u16,

    /// Deployment mode label, used only in the startup banner.
    pub mode: String,

    /// Diagnostic-email trigger. `None` disables step 10 entirely.
    pub diagnostic: Option<DiagnosticEmailSettings>,
}

/// Operator-configured diagnostic email.
///
/// The original deployment hardcoded a recipient and link for this
/// post-boot test email; here every field comes from the environment
/// and the step is a no-op unless a recipient is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEmailSettings {
    /// Recipient address.
    pub recipient: String,

    /// Display label used in the message body.
    pub label: String,

    /// Link included in the message body.
    pub link: String,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// Recognized variables: `PORT` (default 5005), `MODE` (default
    /// "dev"), `DIAGNOSTIC_EMAIL_RECIPIENT` plus optional
    /// `DIAGNOSTIC_EMAIL_LABEL` and `DIAGNOSTIC_EMAIL_LINK`.
    ///
    /// # Errors
    ///
    /// Returns [`BootError::Settings`] if `PORT` is present but not a
    /// valid port number.
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Read settings through an injected lookup function.
    ///
    /// Tests use this to avoid mutating process-wide environment
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`BootError::Settings`] if `PORT` is present but not a
    /// valid port number.
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match get("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| BootError::Settings(format!("PORT is not a valid port: {raw:?}")))?,
            None => DEFAULT_PORT,
        };

        let mode = get("MODE").unwrap_or_else(|| "dev".to_string());

        let diagnostic = get("DIAGNOSTIC_EMAIL_RECIPIENT").map(|recipient| {
            DiagnosticEmailSettings {
                recipient,
                label: get("DIAGNOSTIC_EMAIL_LABEL")
                    .unwrap_or_else(|| "TypeTempo diagnostic".to_string()),
                link: get("DIAGNOSTIC_EMAIL_LINK")
                    .unwrap_or_else(|| "https://typetempo.dev".to_string()),
            }
        });

        Ok(Self {
            port,
            mode,
            diagnostic,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn from(pairs: &[(&str, &str)]) -> Result<Settings> {
        let vars = source(pairs);
        Settings::from_source(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let settings = from(&[]).unwrap();
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.mode, "dev");
        assert!(settings.diagnostic.is_none());
    }

    #[test]
    fn port_and_mode_are_read_from_the_environment() {
        let settings = from(&[("PORT", "8080"), ("MODE", "production")]).unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.mode, "production");
    }

    #[test]
    fn invalid_port_is_a_settings_error() {
        let err = from(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, BootError::Settings(_)));
    }

    #[test]
    fn diagnostic_trigger_requires_only_the_recipient() {
        let settings = from(&[("DIAGNOSTIC_EMAIL_RECIPIENT", "ops@example.com")]).unwrap();
        let diagnostic = settings.diagnostic.unwrap();
        assert_eq!(diagnostic.recipient, "ops@example.com");
        assert_eq!(diagnostic.label, "TypeTempo diagnostic");
    }

    #[test]
    fn diagnostic_label_and_link_are_configurable() {
        let settings = from(&[
            ("DIAGNOSTIC_EMAIL_RECIPIENT", "ops@example.com"),
            ("DIAGNOSTIC_EMAIL_LABEL", "staging check"),
            ("DIAGNOSTIC_EMAIL_LINK", "https://staging.typetempo.dev"),
        ])
        .unwrap();
        let diagnostic = settings.diagnostic.unwrap();
        assert_eq!(diagnostic.label, "staging check");
        assert_eq!(diagnostic.link, "https://staging.typetempo.dev");
    }
}
