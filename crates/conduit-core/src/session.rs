//! Session state and the `conduit.connect` handshake parameters.

use serde::{Deserialize, Serialize};

/// An authenticated Conduit session.
///
/// Deserializes from the `conduit.connect` result and serializes into the
/// `__conduit__` field of every authenticated call. Extra fields the server
/// returns alongside (`userPHID`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "sessionKey")]
    session_key: String,
    #[serde(rename = "connectionID")]
    connection_id: u64,
}

impl Session {
    /// A session as returned by `conduit.connect`.
    pub fn new(session_key: impl Into<String>, connection_id: u64) -> Self {
        Self {
            session_key: session_key.into(),
            connection_id,
        }
    }

    /// The opaque key sent back as `sessionKey`.
    pub fn session_key(&self) -> &str {
        &self.session_key
    }

    /// The server-assigned `connectionID`.
    pub fn connection_id(&self) -> u64 {
        self.connection_id
    }
}

/// Parameters of `conduit.connect`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectParams {
    pub client: String,
    pub client_version: String,
    pub client_description: String,
    pub host: String,
    pub user: String,
    pub auth_token: String,
    pub auth_signature: String,
}

/// Method parameters with the session attached as `__conduit__`.
///
/// `P` must serialize as a JSON object.
#[derive(Debug, Serialize)]
pub struct WithSession<'a, P> {
    #[serde(flatten)]
    pub params: &'a P,
    #[serde(rename = "__conduit__")]
    pub session: &'a Session,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_from_connect_result() {
        let session: Session = serde_json::from_value(json!({
            "sessionKey": "sk1",
            "connectionID": 42,
            "userPHID": "PHID-USER-1"
        }))
        .unwrap();
        assert_eq!(session, Session::new("sk1", 42));
    }

    #[test]
    fn session_is_embedded_as_conduit_field() {
        #[derive(Serialize)]
        struct Lookup {
            names: Vec<&'static str>,
        }

        let session = Session::new("sk1", 42);
        let params = Lookup { names: vec!["T1"] };
        let value = serde_json::to_value(WithSession {
            params: &params,
            session: &session,
        })
        .unwrap();
        assert_eq!(
            value,
            json!({
                "names": ["T1"],
                "__conduit__": {"sessionKey": "sk1", "connectionID": 42}
            })
        );
    }

    #[test]
    fn connect_params_use_wire_names() {
        let params = ConnectParams {
            client: "conduit-client".into(),
            client_version: "1".into(),
            client_description: String::new(),
            host: "https://example.test".into(),
            user: "alice".into(),
            auth_token: "1".into(),
            auth_signature: "ab".into(),
        };
        let value = serde_json::to_value(&params).unwrap();
        for key in [
            "client",
            "clientVersion",
            "clientDescription",
            "host",
            "user",
            "authToken",
            "authSignature",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}
