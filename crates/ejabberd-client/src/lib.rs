//! ejabberd admin HTTP API client.
//!
//! Implements the [`ejabberd_api::Transport`] port over reqwest and provides
//! [`AdminClient`], the dispatcher that drives the command catalog: look the
//! command up, resolve its parameter defaults against the configured host,
//! post the JSON payload, and shape the response with the configured
//! [`Normalization`](ejabberd_api::Normalization) policy.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** All HTTP details — default headers, TLS verification
//! policy, timeouts, status handling — live here. The `ejabberd-api` crate
//! never sees them.
//!
//! ```no_run
//! use ejabberd_api::{ClientConfig, Normalization};
//! use ejabberd_client::AdminClient;
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), ejabberd_api::ClientError> {
//! let config = ClientConfig::new("https://chat.example.com", "Bearer secret");
//! let client = AdminClient::new(config, Normalization::StatusEnvelope)?;
//!
//! let args = json!({"user": "alice", "password": "pw"});
//! let response = client
//!     .dispatch("register", args.as_object().cloned().unwrap_or_default())
//!     .await?;
//! # let _ = response;
//! # Ok(())
//! # }
//! ```

mod client;
mod transport;

pub use client::AdminClient;
pub use transport::HttpTransport;
