//! The admin client: command lookup, payload resolution, and dispatch.

use ejabberd_api::{catalog, ClientConfig, ClientError, Host, Normalization, Response, Transport};
use serde_json::{Map, Value};
use tracing::debug;

use crate::transport::HttpTransport;

/// A handle to one server's admin API.
///
/// Construction validates the configured base URI and derives the default
/// [`Host`] once; afterwards the client holds no mutable state and can be
/// shared by reference across concurrent callers. Each [`dispatch`] call is
/// an independent request/response transaction — nothing is cached, nothing
/// is retried.
///
/// [`dispatch`]: AdminClient::dispatch
#[derive(Debug, Clone)]
pub struct AdminClient<T = HttpTransport> {
    host: Host,
    normalization: Normalization,
    transport: T,
}

impl AdminClient<HttpTransport> {
    /// Builds a client over the reqwest transport.
    ///
    /// Fails with [`ClientError::InvalidConfiguration`] when the base URI
    /// does not name a `http(s)://domain[:port]` authority. A client is
    /// never constructed from an invalid configuration.
    pub fn new(config: ClientConfig, normalization: Normalization) -> Result<Self, ClientError> {
        let host = Host::resolve(&config.base_uri)?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self {
            host,
            normalization,
            transport,
        })
    }
}

impl<T: Transport> AdminClient<T> {
    /// Builds a client over a custom transport implementation.
    pub fn with_transport(host: Host, transport: T, normalization: Normalization) -> Self {
        Self {
            host,
            normalization,
            transport,
        }
    }

    /// The host domain derived from the configured base URI.
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Dispatches one admin command.
    ///
    /// `args` is merged with the command's declared parameter defaults into
    /// the request payload. Usage errors — an unknown command, a missing
    /// required parameter, an undeclared parameter — fail before any network
    /// I/O. The raw response is shaped by the [`Normalization`] policy the
    /// client was built with.
    pub async fn dispatch(
        &self,
        command: &str,
        args: Map<String, Value>,
    ) -> Result<Response, ClientError> {
        let definition = catalog::lookup(command).ok_or_else(|| ClientError::UnknownCommand {
            name: command.to_owned(),
        })?;
        let payload = definition.build_payload(args, &self.host)?;

        debug!(command, params = payload.len(), "dispatching admin command");
        let raw = self.transport.post(&definition.endpoint(), &payload).await?;

        Ok(self.normalization.apply(raw))
    }
}
