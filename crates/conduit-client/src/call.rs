//! The HTTP exchange behind every call.

use crate::{Error, Result};
use conduit_core::{CallKind, CallRequest, Envelope, endpoint_url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// POST `request` to `host` and return the envelope's `result`.
pub(crate) async fn send(
    http: &reqwest::Client,
    host: &str,
    request: &CallRequest,
) -> Result<Value> {
    let method = request.method();
    let url = endpoint_url(host, method);
    debug!(
        method,
        %url,
        handshake = request.kind() == CallKind::Handshake,
        has_params = request.params().is_some(),
        "conduit call"
    );

    let transport = |source: reqwest::Error| Error::Transport {
        method: method.to_owned(),
        source,
    };

    let response = http
        .post(&url)
        .form(&request.form_fields())
        .send()
        .await
        .map_err(transport)?;

    let status = response.status();
    let body = response.bytes().await.map_err(transport)?;
    if !status.is_success() {
        warn!(method, %status, len = body.len(), "conduit call returned non-success status");
    }

    match Envelope::decode(&body).map_err(|e| Error::decode(method, e))? {
        Envelope::Result(value) => Ok(value),
        Envelope::Error(err) => {
            debug!(
                method,
                code = err.code(),
                info = err.info(),
                "conduit error response"
            );
            Err(Error::Conduit(err))
        }
    }
}

/// Decode a `result` value into `T`.
pub(crate) fn decode<T: DeserializeOwned>(method: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::decode(method, e))
}
