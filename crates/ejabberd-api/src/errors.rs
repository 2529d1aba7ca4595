//! The error type shared by every part of the client.
//!
//! Configuration and usage errors ([`ClientError::InvalidConfiguration`],
//! [`ClientError::UnknownCommand`], [`ClientError::MissingParameter`],
//! [`ClientError::UnexpectedParameter`]) are raised locally, before any
//! network I/O. Transport errors ([`ClientError::Http`],
//! [`ClientError::ServerError`]) are fatal to the call and never retried.
//!
//! A 4xx answer from the server is deliberately *not* an error: its body is
//! captured into [`crate::response::RawResult`] and shaped by the configured
//! [`crate::response::Normalization`], so "server says no" and "server says
//! yes" travel through the same return channel.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while configuring the client or dispatching a command.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum ClientError {
    /// The configured base URI does not name a `http(s)://domain[:port]`
    /// authority, or another configuration value is unusable.
    ///
    /// Raised at client construction; a client is never built from an
    /// invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Description of the configuration problem.
        message: String,
    },

    /// Dispatch was requested for a command name absent from the catalog.
    #[error("Unknown admin command '{name}'")]
    UnknownCommand {
        /// The command name as requested by the caller.
        name: String,
    },

    /// A required parameter has neither a caller-supplied value nor a
    /// defaulting rule.
    #[error("Command '{command}' requires parameter '{key}'")]
    MissingParameter {
        /// The command being dispatched.
        command: String,
        /// The parameter that was left unset.
        key: String,
    },

    /// The caller supplied a parameter the command does not declare.
    #[error("Command '{command}' does not take parameter '{key}'")]
    UnexpectedParameter {
        /// The command being dispatched.
        command: String,
        /// The undeclared parameter key.
        key: String,
    },

    /// The request never produced an HTTP response: connection failure, TLS
    /// failure, or timeout.
    #[error("HTTP transport failure: {message}")]
    Http {
        /// Description of the underlying transport failure.
        message: String,
    },

    /// The server answered with a 5xx status.
    #[error("Server error {status}")]
    ServerError {
        /// The HTTP status code.
        status: u16,
        /// The response body, as received.
        body: String,
    },
}
