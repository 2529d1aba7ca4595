//! Command schema: parameter specifications, defaulting rules, and payload
//! resolution.
//!
//! A [`CommandDefinition`] is one row of the catalog: the wire name of a
//! command, its endpoint path, and the ordered parameters it takes. Each
//! [`ParamSpec`] either requires a caller value or derives one — from a
//! literal, from the configured [`Host`], or from one of its conference /
//! node forms — and may rewrite the chosen value with a [`Transform`].
//!
//! [`CommandDefinition::build_payload`] is the whole of the per-call logic:
//! merge caller arguments with the declared defaults, apply transforms, and
//! reject anything that does not exactly match the declared parameter set.
//! It never performs I/O.

use serde_json::{Map, Value};

use crate::config::Host;
use crate::errors::ClientError;

// ---------------------------------------------------------------------------
// Defaulting and transforms
// ---------------------------------------------------------------------------

/// How a parameter obtains its value when the caller does not supply one.
#[derive(Debug, Clone)]
pub enum DefaultRule {
    /// A fixed JSON value.
    Literal(Value),
    /// The configured host domain.
    Host,
    /// The MUC conference service of the configured host: `conference.<host>`.
    ConferenceHost,
    /// The Erlang node name of the configured host: `ejabberd@<host>`.
    NodeName,
}

impl DefaultRule {
    fn evaluate(&self, host: &Host) -> Value {
        match self {
            DefaultRule::Literal(value) => value.clone(),
            DefaultRule::Host => Value::String(host.as_str().to_owned()),
            DefaultRule::ConferenceHost => Value::String(host.conference()),
            DefaultRule::NodeName => Value::String(host.node()),
        }
    }
}

/// A rewrite applied to a parameter value after the caller value or default
/// has been chosen.
#[derive(Debug, Clone, Copy)]
pub enum Transform {
    /// Suffix a bare room name with `@conference.<host>`. Values that already
    /// name a conference service pass through unchanged, so callers may
    /// supply either `"room1"` or `"room1@conference.example.com"`.
    RoomJid,
}

impl Transform {
    fn apply(self, value: Value, host: &Host) -> Value {
        match self {
            Transform::RoomJid => match value {
                Value::String(room) if !room.contains("conference") => {
                    Value::String(format!("{room}@{}", host.conference()))
                }
                other => other,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// One declared parameter of a command.
///
/// A parameter without a defaulting rule is required; leaving it unset is a
/// usage error reported before any network I/O.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    key: &'static str,
    default: Option<DefaultRule>,
    transform: Option<Transform>,
}

impl ParamSpec {
    /// A parameter the caller must always supply.
    pub fn required(key: &'static str) -> Self {
        Self {
            key,
            default: None,
            transform: None,
        }
    }

    /// A parameter derived from `rule` when the caller leaves it unset.
    pub fn with_default(key: &'static str, rule: DefaultRule) -> Self {
        Self {
            key,
            default: Some(rule),
            transform: None,
        }
    }

    /// Attaches a value rewrite to this parameter.
    pub fn transformed(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// The payload key of this parameter.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Whether the caller must supply this parameter.
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

// ---------------------------------------------------------------------------
// Response-shape metadata
// ---------------------------------------------------------------------------

/// What the server is documented to answer for a command.
///
/// Advisory metadata for callers choosing a [`crate::response::Normalization`]
/// policy; dispatch never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Returns {
    /// An integer status code: 0 on success, 1 otherwise.
    Code,
    /// A raw text string, not JSON.
    Raw,
    /// A structured JSON value (object, array, or scalar).
    Json,
}

// ---------------------------------------------------------------------------
// Command definitions
// ---------------------------------------------------------------------------

/// One catalogued admin command: wire name, endpoint path, and parameters.
#[derive(Debug, Clone)]
pub struct CommandDefinition {
    name: &'static str,
    endpoint: Option<&'static str>,
    returns: Returns,
    params: Vec<ParamSpec>,
}

impl CommandDefinition {
    /// Declares a command posting to the conventional `/api/<name>` path.
    pub fn new(name: &'static str, returns: Returns, params: Vec<ParamSpec>) -> Self {
        Self {
            name,
            endpoint: None,
            returns,
            params,
        }
    }

    /// Overrides the endpoint path for commands whose path diverges from
    /// their name.
    pub fn with_endpoint(mut self, endpoint: &'static str) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// The wire name of the command.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The endpoint path this command posts to.
    pub fn endpoint(&self) -> String {
        match self.endpoint {
            Some(endpoint) => endpoint.to_owned(),
            None => format!("/api/{}", self.name),
        }
    }

    /// Documented response shape.
    pub fn returns(&self) -> Returns {
        self.returns
    }

    /// The declared parameters, in payload order.
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Merges caller arguments with the declared defaults into the request
    /// payload.
    ///
    /// Caller values win over defaults; transforms apply to whichever value
    /// was chosen. A required parameter left unset fails with
    /// [`ClientError::MissingParameter`], and a caller key the command does
    /// not declare fails with [`ClientError::UnexpectedParameter`] — both
    /// before any request is sent.
    pub fn build_payload(
        &self,
        mut args: Map<String, Value>,
        host: &Host,
    ) -> Result<Map<String, Value>, ClientError> {
        let mut payload = Map::new();
        for spec in &self.params {
            let value = match args.remove(spec.key) {
                Some(value) => value,
                None => match &spec.default {
                    Some(rule) => rule.evaluate(host),
                    None => {
                        return Err(ClientError::MissingParameter {
                            command: self.name.to_owned(),
                            key: spec.key.to_owned(),
                        })
                    }
                },
            };
            let value = match spec.transform {
                Some(transform) => transform.apply(value, host),
                None => value,
            };
            payload.insert(spec.key.to_owned(), value);
        }
        if let Some(extra) = args.keys().next() {
            return Err(ClientError::UnexpectedParameter {
                command: self.name.to_owned(),
                key: extra.clone(),
            });
        }
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn host() -> Host {
        Host::resolve("https://chat.example.com").unwrap()
    }

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn definition() -> CommandDefinition {
        CommandDefinition::new(
            "register",
            Returns::Code,
            vec![
                ParamSpec::required("user"),
                ParamSpec::required("password"),
                ParamSpec::with_default("host", DefaultRule::Host),
            ],
        )
    }

    #[test]
    fn host_defaults_fill_in_and_callers_override() {
        let payload = definition()
            .build_payload(args(json!({"user": "alice", "password": "pw"})), &host())
            .unwrap();
        assert_eq!(
            Value::Object(payload),
            json!({"user": "alice", "password": "pw", "host": "chat.example.com"})
        );

        let payload = definition()
            .build_payload(
                args(json!({"user": "alice", "password": "pw", "host": "other.example.net"})),
                &host(),
            )
            .unwrap();
        assert_eq!(payload["host"], json!("other.example.net"));
    }

    #[test]
    fn literal_and_derived_defaults_evaluate() {
        let definition = CommandDefinition::new(
            "probe",
            Returns::Json,
            vec![
                ParamSpec::with_default("days", DefaultRule::Literal(json!(31))),
                ParamSpec::with_default("service", DefaultRule::ConferenceHost),
                ParamSpec::with_default("node", DefaultRule::NodeName),
            ],
        );
        let payload = definition.build_payload(Map::new(), &host()).unwrap();
        assert_eq!(
            Value::Object(payload),
            json!({
                "days": 31,
                "service": "conference.chat.example.com",
                "node": "ejabberd@chat.example.com",
            })
        );
    }

    #[test]
    fn room_jid_transform_suffixes_bare_names_only() {
        let definition = CommandDefinition::new(
            "join",
            Returns::Code,
            vec![ParamSpec::required("room").transformed(Transform::RoomJid)],
        );

        let payload = definition
            .build_payload(args(json!({"room": "room1"})), &host())
            .unwrap();
        assert_eq!(payload["room"], json!("room1@conference.chat.example.com"));

        let payload = definition
            .build_payload(
                args(json!({"room": "room1@conference.chat.example.com"})),
                &host(),
            )
            .unwrap();
        assert_eq!(payload["room"], json!("room1@conference.chat.example.com"));
    }

    #[test]
    fn missing_required_parameter_fails_locally() {
        let err = definition()
            .build_payload(args(json!({"user": "alice"})), &host())
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::MissingParameter { ref command, ref key }
                if command == "register" && key == "password"
        ));
    }

    #[test]
    fn undeclared_parameter_fails_locally() {
        let err = definition()
            .build_payload(
                args(json!({"user": "alice", "password": "pw", "jid": "x@y"})),
                &host(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::UnexpectedParameter { ref key, .. } if key == "jid"
        ));
    }

    #[test]
    fn endpoint_defaults_to_api_name_and_can_diverge() {
        assert_eq!(definition().endpoint(), "/api/register");

        let definition = CommandDefinition::new("alias", Returns::Raw, Vec::new())
            .with_endpoint("/api/actual_command");
        assert_eq!(definition.endpoint(), "/api/actual_command");
    }
}
