//! Client configuration and host resolution.
//!
//! [`ClientConfig`] is the full configuration surface: base URI,
//! authorization token, TLS verification policy, and request timeout. It is
//! validated once, at client construction, and immutable afterwards.
//!
//! [`Host`] is the authority domain extracted from the base URI. Every
//! server-scoped parameter in the command catalog defaults to it (directly,
//! or via the derived `conference.<host>` and `ejabberd@<host>` forms).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::ClientError;

/// Per-request timeout applied when [`ClientConfig::timeout`] is not set.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Connection settings for one admin API endpoint.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URI of the server, e.g. `https://chat.example.com:5443`.
    pub base_uri: String,
    /// Value of the `Authorization` header sent with every request.
    pub authorization: String,
    /// Whether TLS certificates are verified. Defaults to `false`, matching
    /// the self-signed certificates most ejabberd deployments ship with.
    pub verify: bool,
    /// Upper bound on each request. Requests are never retried.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration with the default TLS policy and timeout.
    pub fn new(base_uri: impl Into<String>, authorization: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            authorization: authorization.into(),
            verify: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Enables or disables TLS certificate verification.
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Overrides the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// The validated, lower-cased authority domain of the configured base URI.
///
/// Resolved once per client; shared read-only by every dispatched command as
/// the default value for `host`-family parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Host(String);

impl Host {
    /// Extracts the domain from a base URI of the form
    /// `scheme://label(.label)+[:port][/]`, where scheme is `http` or
    /// `https` and each label is `[A-Za-z0-9][A-Za-z0-9_-]*`.
    ///
    /// The scheme and port are discarded; the domain is lower-cased. Anything
    /// that does not match the grammar fails with
    /// [`ClientError::InvalidConfiguration`].
    pub fn resolve(base_uri: &str) -> Result<Self, ClientError> {
        let invalid = || ClientError::InvalidConfiguration {
            message: format!("invalid base URI '{base_uri}'"),
        };

        let (scheme, rest) = base_uri.split_once("://").ok_or_else(invalid)?;
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }

        let authority = rest.strip_suffix('/').unwrap_or(rest);
        let domain = match authority.rsplit_once(':') {
            Some((domain, port)) => {
                if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                domain
            }
            None => authority,
        };

        let mut labels = 0;
        for label in domain.split('.') {
            let mut bytes = label.bytes();
            match bytes.next() {
                Some(b) if b.is_ascii_alphanumeric() => {}
                _ => return Err(invalid()),
            }
            if !bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-') {
                return Err(invalid());
            }
            labels += 1;
        }
        if labels < 2 {
            return Err(invalid());
        }

        Ok(Self(domain.to_ascii_lowercase()))
    }

    /// Returns the domain as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The MUC conference service of this host: `conference.<host>`.
    pub fn conference(&self) -> String {
        format!("conference.{}", self.0)
    }

    /// The Erlang node name of this host: `ejabberd@<host>`.
    pub fn node(&self) -> String {
        format!("ejabberd@{}", self.0)
    }
}

impl std::fmt::Display for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_domain_without_scheme_or_port() {
        let host = Host::resolve("https://chat.example.com").unwrap();
        assert_eq!(host.as_str(), "chat.example.com");
    }

    #[test]
    fn accepts_port_and_trailing_slash() {
        let host = Host::resolve("https://chat.example.com:5443/").unwrap();
        assert_eq!(host.as_str(), "chat.example.com");
    }

    #[test]
    fn accepts_plain_http() {
        let host = Host::resolve("http://xmpp.example.org").unwrap();
        assert_eq!(host.as_str(), "xmpp.example.org");
    }

    #[test]
    fn lower_cases_the_domain() {
        let host = Host::resolve("HTTPS://Chat.Example.COM").unwrap();
        assert_eq!(host.as_str(), "chat.example.com");
    }

    #[test]
    fn accepts_underscores_and_dashes_inside_labels() {
        let host = Host::resolve("https://my-node.ex_ample.com").unwrap();
        assert_eq!(host.as_str(), "my-node.ex_ample.com");
    }

    #[test]
    fn rejects_unknown_schemes_and_garbage() {
        for uri in [
            "ftp://chat.example.com",
            "chat.example.com",
            "not a uri",
            "",
            "https://",
        ] {
            assert!(
                matches!(
                    Host::resolve(uri),
                    Err(ClientError::InvalidConfiguration { .. })
                ),
                "expected {uri:?} to be rejected"
            );
        }
    }

    #[test]
    fn rejects_single_label_domains() {
        assert!(Host::resolve("https://localhost").is_err());
        assert!(Host::resolve("https://localhost:5280").is_err());
    }

    #[test]
    fn rejects_bad_labels_ports_and_paths() {
        assert!(Host::resolve("https://-bad.example.com").is_err());
        assert!(Host::resolve("https://chat..example.com").is_err());
        assert!(Host::resolve("https://chat.example.com:port").is_err());
        assert!(Host::resolve("https://chat.example.com:").is_err());
        assert!(Host::resolve("https://chat.example.com/admin").is_err());
    }

    #[test]
    fn derived_forms() {
        let host = Host::resolve("https://chat.example.com").unwrap();
        assert_eq!(host.conference(), "conference.chat.example.com");
        assert_eq!(host.node(), "ejabberd@chat.example.com");
    }

    #[test]
    fn config_defaults() {
        let config = ClientConfig::new("https://chat.example.com", "tok");
        assert!(!config.verify);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);

        let config = config.verify(true).timeout(Duration::from_secs(5));
        assert!(config.verify);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
