//! Response model and normalization policies.
//!
//! The transport hands back a [`RawResult`]: the body text plus a flag for
//! 4xx answers, which are captured rather than raised. A [`Normalization`]
//! policy — chosen once per client instance, not per command — shapes that
//! raw result into the caller-visible [`Response`] variant.
//!
//! The three policies reproduce the three historical client behaviours as a
//! single strategy axis: hand back the literal body, wrap decoded values in
//! a `{status, result}` envelope, or decode unconditionally.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Raw transport output
// ---------------------------------------------------------------------------

/// What the transport produced: the response body, plus whether the server
/// answered with a 4xx status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResult {
    /// `true` when the server answered 4xx; the body is still captured.
    pub client_error: bool,
    /// The response body, byte-for-byte.
    pub body: String,
}

// ---------------------------------------------------------------------------
// Caller-visible result
// ---------------------------------------------------------------------------

/// The result of one dispatched command.
///
/// Which variant is produced depends on the configured [`Normalization`],
/// not on the command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Response {
    /// The literal response body, untouched.
    RawBody(String),
    /// The decoded (and possibly enveloped) JSON response.
    Decoded(Value),
    /// The server reported an error envelope.
    Error {
        /// The server's `message` field, empty when absent.
        message: String,
        /// The error envelope as received.
        original: Value,
    },
}

// ---------------------------------------------------------------------------
// Normalization policies
// ---------------------------------------------------------------------------

/// How a raw response body becomes a [`Response`]. Selected once per client
/// instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// No decoding: every body is returned as [`Response::RawBody`]. For
    /// callers that want the literal server text (e.g. status strings).
    RawBody,
    /// Decode the body; a JSON object carrying `"status": "error"` becomes
    /// [`Response::Error`], anything else is wrapped as
    /// `{"status": "success", "result": <decoded, or the raw body when the
    /// body is not JSON>}`.
    StatusEnvelope,
    /// Decode the body unconditionally; an undecodable body yields
    /// `Decoded(Null)` rather than an error.
    Passthrough,
}

impl Normalization {
    /// Shapes a transport result into the caller-visible response.
    ///
    /// Never fails: undecodable bodies degrade per policy instead of
    /// raising.
    pub fn apply(self, raw: RawResult) -> Response {
        match self {
            Normalization::RawBody => Response::RawBody(raw.body),
            Normalization::StatusEnvelope => match serde_json::from_str::<Value>(&raw.body) {
                Ok(Value::Object(envelope))
                    if envelope.get("status").and_then(Value::as_str) == Some("error") =>
                {
                    let message = envelope
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_owned();
                    Response::Error {
                        message,
                        original: Value::Object(envelope),
                    }
                }
                Ok(decoded) => Response::Decoded(json!({
                    "status": "success",
                    "result": decoded,
                })),
                Err(_) => Response::Decoded(json!({
                    "status": "success",
                    "result": raw.body,
                })),
            },
            Normalization::Passthrough => {
                Response::Decoded(serde_json::from_str(&raw.body).unwrap_or(Value::Null))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(body: &str) -> RawResult {
        RawResult {
            client_error: false,
            body: body.to_owned(),
        }
    }

    #[test]
    fn raw_body_is_returned_byte_for_byte() {
        let body = "The node ejabberd@localhost is started\n";
        assert_eq!(
            Normalization::RawBody.apply(raw(body)),
            Response::RawBody(body.to_owned())
        );
    }

    #[test]
    fn status_envelope_surfaces_server_errors() {
        let response =
            Normalization::StatusEnvelope.apply(raw(r#"{"status":"error","message":"nope"}"#));
        let Response::Error { message, original } = response else {
            panic!("expected an error response, got {response:?}");
        };
        assert_eq!(message, "nope");
        assert_eq!(
            original,
            serde_json::json!({"status": "error", "message": "nope"})
        );
    }

    #[test]
    fn status_envelope_wraps_success() {
        assert_eq!(
            Normalization::StatusEnvelope.apply(raw(r#"{"ok":true}"#)),
            Response::Decoded(json!({"status": "success", "result": {"ok": true}}))
        );
    }

    #[test]
    fn status_envelope_keeps_non_json_bodies_as_result() {
        assert_eq!(
            Normalization::StatusEnvelope.apply(raw("Success")),
            Response::Decoded(json!({"status": "success", "result": "Success"}))
        );
    }

    #[test]
    fn status_envelope_ignores_error_status_on_non_objects() {
        // A bare string "error" is data, not an envelope.
        assert_eq!(
            Normalization::StatusEnvelope.apply(raw(r#""error""#)),
            Response::Decoded(json!({"status": "success", "result": "error"}))
        );
    }

    #[test]
    fn passthrough_decodes_or_degrades_to_null() {
        assert_eq!(
            Normalization::Passthrough.apply(raw("[1,2,3]")),
            Response::Decoded(json!([1, 2, 3]))
        );
        assert_eq!(
            Normalization::Passthrough.apply(raw("not json")),
            Response::Decoded(Value::Null)
        );
    }

    #[test]
    fn captured_client_errors_flow_through_the_policies() {
        let rejected = RawResult {
            client_error: true,
            body: r#"{"status":"error","message":"not allowed"}"#.to_owned(),
        };
        let response = Normalization::StatusEnvelope.apply(rejected.clone());
        assert!(matches!(response, Response::Error { ref message, .. } if message == "not allowed"));

        // RawBody hands the rejection body back untouched as well.
        assert_eq!(
            Normalization::RawBody.apply(rejected.clone()),
            Response::RawBody(rejected.body)
        );
    }
}
