//! An open Conduit connection.

use crate::call;
use crate::{Error, Result};
use conduit_core::{
    AuthSignature, CallKind, CallRequest, Capabilities, ConnectParams, Session, WithSession, method,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// How this client introduces itself in `conduit.connect`.
#[derive(Debug, Clone)]
pub(crate) struct ClientIdentity {
    pub name: String,
    pub version: String,
    pub description: String,
}

/// A connection whose capabilities have been checked, and which may hold a
/// session.
///
/// Calls take `&self` and may run concurrently. [`connect`](Self::connect)
/// takes `&mut self` and replaces the session with a new value; clones made
/// earlier keep the session they were cloned with.
#[derive(Debug, Clone)]
pub struct Conn {
    http: reqwest::Client,
    host: String,
    capabilities: Capabilities,
    identity: ClientIdentity,
    session: Option<Arc<Session>>,
}

impl Conn {
    pub(crate) fn new(
        http: reqwest::Client,
        host: String,
        capabilities: Capabilities,
        identity: ClientIdentity,
    ) -> Self {
        Self {
            http,
            host,
            capabilities,
            identity,
            session: None,
        }
    }

    /// The server URL, without trailing slash.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Capabilities reported by the server during discovery.
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// The current session, if [`connect`](Self::connect) has succeeded.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_deref()
    }

    /// `true` once a handshake has succeeded.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Authenticate as `user` with their Conduit certificate.
    ///
    /// On success the returned session is attached to every later call made
    /// through this connection.
    pub async fn connect(&mut self, user: &str, cert: &str) -> Result<Session> {
        let signature = AuthSignature::now(cert);
        let params = ConnectParams {
            client: self.identity.name.clone(),
            client_version: self.identity.version.clone(),
            client_description: self.identity.description.clone(),
            host: self.host.clone(),
            user: user.to_owned(),
            auth_token: signature.token().to_owned(),
            auth_signature: signature.signature().to_owned(),
        };

        let request = CallRequest::new(method::CONNECT)
            .with_params(&params)
            .map_err(|e| Error::encode(method::CONNECT, e))?
            .with_kind(CallKind::Handshake);
        let value = call::send(&self.http, &self.host, &request).await?;
        let session: Session = call::decode(method::CONNECT, value)?;

        info!(
            host = %self.host,
            user,
            connection_id = session.connection_id(),
            "conduit session established"
        );
        self.session = Some(Arc::new(session.clone()));
        Ok(session)
    }

    /// Call `method` and decode its result into `T`.
    ///
    /// With `Some(params)` the call is authenticated: the session is added to
    /// the parameters as `__conduit__`, and [`Error::NotAuthenticated`] is
    /// returned if there is none. With `None` the request carries no `params`
    /// field at all, and no session.
    ///
    /// A `null` or missing `result` only decodes into a type that accepts
    /// `null`; a plain struct gets [`Error::Decode`]. Use `Option<T>` for
    /// methods that may return nothing. To discard the result, decode into
    /// [`serde::de::IgnoredAny`].
    pub async fn invoke<P, T>(&self, method: &str, params: Option<&P>) -> Result<T>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let value = self.invoke_raw(method, params).await?;
        call::decode(method, value)
    }

    /// Like [`invoke`](Self::invoke), returning the undecoded `result`.
    pub async fn invoke_raw<P: Serialize>(
        &self,
        method: &str,
        params: Option<&P>,
    ) -> Result<Value> {
        let request = match params {
            Some(params) => self.authenticated_request(method, params)?,
            None => CallRequest::new(method),
        };
        call::send(&self.http, &self.host, &request).await
    }

    fn authenticated_request<P: Serialize>(&self, method: &str, params: &P) -> Result<CallRequest> {
        let session = self
            .session
            .as_deref()
            .ok_or_else(|| Error::NotAuthenticated {
                method: method.to_owned(),
            })?;
        CallRequest::new(method)
            .with_params(&WithSession { params, session })
            .map_err(|e| Error::encode(method, e))
    }
}
