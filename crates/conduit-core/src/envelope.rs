//! Request form encoding and response envelope decoding.
//!
//! Every Conduit call is a form-encoded POST to `{host}/api/{method}`:
//!
//! - `output=json`, always;
//! - `params=<json>`, unless the call takes no parameters;
//! - `__conduit__=true`, on the `conduit.connect` handshake only.
//!
//! Every response is a JSON object carrying either `error_code`/`error_info`
//! or `result`. The body is parsed schema-free first so the error fields are
//! checked before anything tries to decode `result`, whose shape depends on
//! the method.

use crate::ConduitError;
use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Strip trailing slashes from a host URL.
pub fn normalize_host(host: &str) -> &str {
    host.trim_end_matches('/')
}

/// The endpoint URL for `method` on `host`.
pub fn endpoint_url(host: &str, method: &str) -> String {
    format!("{}/api/{method}", normalize_host(host))
}

/// Whether a call is the session handshake.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CallKind {
    #[default]
    Standard,
    /// `conduit.connect`; the server is told not to expect a session.
    Handshake,
}

/// An outgoing call, ready to be form-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    method: String,
    params: Option<String>,
    kind: CallKind,
}

impl CallRequest {
    /// A parameterless, non-handshake call to `method`.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: None,
            kind: CallKind::Standard,
        }
    }

    /// Serialize `params` as the call's JSON parameters.
    pub fn with_params<P: Serialize + ?Sized>(mut self, params: &P) -> serde_json::Result<Self> {
        self.params = Some(serde_json::to_string(params)?);
        Ok(self)
    }

    /// Mark the call as a handshake or a standard call.
    pub fn with_kind(mut self, kind: CallKind) -> Self {
        self.kind = kind;
        self
    }

    /// Remote method name, e.g. `phid.lookup`.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The serialized parameters, if any.
    pub fn params(&self) -> Option<&str> {
        self.params.as_deref()
    }

    /// Whether this is the handshake call.
    pub fn kind(&self) -> CallKind {
        self.kind
    }

    /// Form fields of the request body.
    pub fn form_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = Vec::with_capacity(3);
        if let Some(params) = &self.params {
            fields.push(("params", params.as_str()));
        }
        fields.push(("output", "json"));
        if self.kind == CallKind::Handshake {
            fields.push(("__conduit__", "true"));
        }
        fields
    }
}

/// A decoded response envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// The `result` member; `Null` when the server sent none.
    Result(Value),
    /// A non-empty `error_code`.
    Error(ConduitError),
}

impl Envelope {
    /// Parse a response body.
    ///
    /// Fails only if the body is not a JSON object. `result` is left as an
    /// untyped value; numbers in it keep their exact textual form.
    pub fn decode(body: &[u8]) -> serde_json::Result<Self> {
        let mut object: Map<String, Value> = serde_json::from_slice(body)?;

        let code = string_field(&object, "error_code");
        if !code.is_empty() {
            let info = string_field(&object, "error_info");
            return Ok(Envelope::Error(ConduitError::new(code, info)));
        }

        Ok(Envelope::Result(
            object.remove("result").unwrap_or(Value::Null),
        ))
    }

    pub fn into_result(self) -> Result<Value, ConduitError> {
        match self {
            Envelope::Result(value) => Ok(value),
            Envelope::Error(err) => Err(err),
        }
    }
}

/// A string member, or `""` when it is missing or not a string.
fn string_field<'a>(object: &'a Map<String, Value>, key: &str) -> &'a str {
    object.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// Decode a result keyed by name or PHID.
///
/// The server encodes an empty keyed result as `[]` rather than `{}`; both
/// (and `null`) decode to an empty map. Key order follows the response.
pub fn decode_keyed<T: DeserializeOwned>(value: Value) -> serde_json::Result<IndexMap<String, T>> {
    match value {
        Value::Null => Ok(IndexMap::new()),
        Value::Array(items) if items.is_empty() => Ok(IndexMap::new()),
        other => serde_json::from_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn endpoint_strips_trailing_slashes() {
        assert_eq!(
            endpoint_url("https://phab.example.test/", "conduit.connect"),
            "https://phab.example.test/api/conduit.connect"
        );
        assert_eq!(normalize_host("http://h//"), "http://h");
        assert_eq!(normalize_host("http://h"), "http://h");
    }

    #[test]
    fn parameterless_call_has_no_params_field() {
        let req = CallRequest::new("conduit.getcapabilities");
        assert_eq!(req.form_fields(), vec![("output", "json")]);
    }

    #[test]
    fn handshake_adds_marker() {
        let req = CallRequest::new("conduit.connect")
            .with_params(&json!({"user": "alice"}))
            .unwrap()
            .with_kind(CallKind::Handshake);
        assert_eq!(
            req.form_fields(),
            vec![
                ("params", r#"{"user":"alice"}"#),
                ("output", "json"),
                ("__conduit__", "true"),
            ]
        );
    }

    #[test]
    fn error_code_wins_over_result() {
        let body = br#"{"error_code":"ERR-FOO","error_info":"bad thing","result":{"unexpected":"garbage"}}"#;
        let envelope = Envelope::decode(body).unwrap();
        assert_eq!(
            envelope,
            Envelope::Error(ConduitError::new("ERR-FOO", "bad thing"))
        );
    }

    #[test]
    fn null_or_empty_error_code_is_success() {
        let body = br#"{"result":{"a":1},"error_code":null,"error_info":null}"#;
        assert_eq!(
            Envelope::decode(body).unwrap().into_result().unwrap(),
            json!({"a": 1})
        );

        let body = br#"{"result":true,"error_code":""}"#;
        assert_eq!(
            Envelope::decode(body).unwrap().into_result().unwrap(),
            json!(true)
        );
    }

    #[test]
    fn non_string_error_code_is_success() {
        let body = br#"{"result":1,"error_code":0}"#;
        assert_eq!(Envelope::decode(body).unwrap(), Envelope::Result(json!(1)));

        let body = br#"{"result":"ok","error_code":false,"error_info":42}"#;
        assert_eq!(
            Envelope::decode(body).unwrap(),
            Envelope::Result(json!("ok"))
        );
    }

    #[test]
    fn missing_error_info_is_empty() {
        let body = br#"{"error_code":"ERR-CONDUIT-CORE"}"#;
        let err = Envelope::decode(body).unwrap().into_result().unwrap_err();
        assert_eq!(err.code(), "ERR-CONDUIT-CORE");
        assert_eq!(err.info(), "");
    }

    #[test]
    fn missing_result_is_null() {
        assert_eq!(
            Envelope::decode(b"{}").unwrap(),
            Envelope::Result(Value::Null)
        );
    }

    #[test]
    fn non_object_body_fails() {
        assert!(Envelope::decode(b"<html>502</html>").is_err());
        assert!(Envelope::decode(b"[1,2]").is_err());
    }

    #[test]
    fn large_integers_survive() {
        let body = br#"{"result":{"id":9007199254740993}}"#;
        let value = Envelope::decode(body).unwrap().into_result().unwrap();

        #[derive(serde::Deserialize)]
        struct Item {
            id: u64,
        }
        let item: Item = serde_json::from_value(value).unwrap();
        assert_eq!(item.id, 9_007_199_254_740_993);
    }

    #[test]
    fn keyed_results() {
        let empty: IndexMap<String, u32> = decode_keyed(json!([])).unwrap();
        assert!(empty.is_empty());

        let map: IndexMap<String, u32> = decode_keyed(json!({"b": 2, "a": 1})).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["b", "a"]);
    }
}
