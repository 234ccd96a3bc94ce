// ── Runtime connection configuration ──
//
// These types describe how to reach a Study Rooms server. They carry
// credential data and connection tuning, but never touch disk.
// The CLI builds a `ClientConfig` and hands it to `Portal::new`.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use studyrooms_api::{TlsMode, TransportConfig};

/// Username/password pair used to obtain a bearer token.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed development servers).
    DangerAcceptInvalid,
}

/// Configuration for talking to one Study Rooms server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., `https://rooms.example.edu`).
    pub url: Url,
    /// Credentials for an automatic login; `None` means only a stored
    /// session token can be used.
    pub credentials: Option<Credentials>,
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            credentials: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_mirrors_tls_choice() {
        let mut config = ClientConfig::new("https://rooms.example.edu".parse().expect("url"));
        assert!(matches!(config.transport().tls, TlsMode::System));

        config.tls = TlsVerification::CustomCa(PathBuf::from("/etc/ca.pem"));
        config.timeout = Duration::from_secs(5);
        let transport = config.transport();
        assert!(matches!(transport.tls, TlsMode::CustomCa(ref p) if p.ends_with("ca.pem")));
        assert_eq!(transport.timeout, Duration::from_secs(5));
    }
}
