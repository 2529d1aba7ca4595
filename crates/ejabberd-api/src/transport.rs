//! The transport port: how resolved payloads reach the server.
//!
//! Defined here so the dispatcher depends only on this trait; the reqwest
//! implementation lives in the `ejabberd-client` crate, and tests substitute
//! in-memory doubles.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::ClientError;
use crate::response::RawResult;

/// One authenticated POST of a JSON payload to an endpoint path.
///
/// Implementations must capture 4xx answers into the returned [`RawResult`]
/// rather than failing, and surface network failures, timeouts, and 5xx
/// answers as [`ClientError`]s. Requests are never retried.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Posts `payload` as a JSON body to `path` under the configured base
    /// URI.
    async fn post(&self, path: &str, payload: &Map<String, Value>)
        -> Result<RawResult, ClientError>;
}
