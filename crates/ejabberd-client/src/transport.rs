//! reqwest-backed implementation of the [`Transport`] port.

use async_trait::async_trait;
use ejabberd_api::{ClientConfig, ClientError, RawResult, Transport};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// HTTP transport for the admin API.
///
/// The underlying client is built once from the configuration: the
/// authorization token and the `X-Admin: true` marker ride as default
/// headers on every request, the configured timeout bounds each call, and
/// TLS certificate verification follows [`ClientConfig::verify`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_uri: String,
    http: reqwest::Client,
}

impl HttpTransport {
    /// Builds the transport.
    ///
    /// Fails with [`ClientError::InvalidConfiguration`] when the
    /// authorization value cannot be carried in a header, and with
    /// [`ClientError::Http`] when the underlying client cannot be
    /// constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut authorization = HeaderValue::from_str(&config.authorization).map_err(|err| {
            ClientError::InvalidConfiguration {
                message: format!("authorization value is not a valid header: {err}"),
            }
        })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert("X-Admin", HeaderValue::from_static("true"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(!config.verify)
            .timeout(config.timeout)
            .build()
            .map_err(|err| ClientError::Http {
                message: err.to_string(),
            })?;

        Ok(Self {
            base_uri: config.base_uri.trim_end_matches('/').to_owned(),
            http,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        path: &str,
        payload: &Map<String, Value>,
    ) -> Result<RawResult, ClientError> {
        let url = format!("{}{}", self.base_uri, path);
        debug!(%url, "posting admin command");

        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|err| ClientError::Http {
                message: err.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| ClientError::Http {
            message: err.to_string(),
        })?;

        if status.is_server_error() {
            return Err(ClientError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        let client_error = status.is_client_error();
        if client_error {
            warn!(status = status.as_u16(), %url, "server rejected admin command");
        }

        Ok(RawResult { client_error, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_authorization_values_that_cannot_be_headers() {
        let config = ClientConfig::new("https://chat.example.com", "bad\nvalue");
        let err = HttpTransport::new(&config).unwrap_err();
        assert!(matches!(err, ClientError::InvalidConfiguration { .. }));
    }

    #[test]
    fn trailing_slashes_do_not_double_up_in_urls() {
        let config = ClientConfig::new("https://chat.example.com/", "tok");
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.base_uri, "https://chat.example.com");
    }
}
