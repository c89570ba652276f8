//! Connection setup: client options and capability discovery.

use crate::call;
use crate::conn::{ClientIdentity, Conn};
use crate::{Error, Result};
use conduit_core::{CallRequest, Capabilities, method, normalize_host};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Host, user and certificate for [`Dialer::dial_and_connect`].
#[derive(Clone)]
pub struct Credentials {
    pub host: String,
    pub user: String,
    pub cert: String,
}

impl Credentials {
    pub fn new(host: impl Into<String>, user: impl Into<String>, cert: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            cert: cert.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("cert", &"<redacted>")
            .finish()
    }
}

/// Options for opening a [`Conn`].
///
/// The client name, version and description are reported to the server
/// during the handshake. No request timeout is set unless one is given.
#[derive(Debug, Clone)]
pub struct Dialer {
    identity: ClientIdentity,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http: Option<reqwest::Client>,
}

impl Default for Dialer {
    fn default() -> Self {
        Self {
            identity: ClientIdentity {
                name: env!("CARGO_PKG_NAME").to_owned(),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                description: String::new(),
            },
            timeout: None,
            connect_timeout: None,
            http: None,
        }
    }
}

impl Dialer {
    /// A dialer with the default client identity and no timeouts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Client name sent in the handshake.
    pub fn client_name(mut self, name: impl Into<String>) -> Self {
        self.identity.name = name.into();
        self
    }

    /// Client version sent in the handshake.
    pub fn client_version(mut self, version: impl Into<String>) -> Self {
        self.identity.version = version.into();
        self
    }

    /// Client description sent in the handshake.
    pub fn client_description(mut self, description: impl Into<String>) -> Self {
        self.identity.description = description.into();
        self
    }

    /// Total time allowed for each request, body included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Time allowed to establish the TCP/TLS connection.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Use a preconfigured HTTP client. Timeouts set on the dialer are then
    /// ignored.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    fn build_http(&self) -> Result<reqwest::Client> {
        if let Some(client) = &self.http {
            return Ok(client.clone());
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        builder.build().map_err(Error::HttpClient)
    }

    /// Fetch the server's capabilities and check the modes this client
    /// requires.
    pub async fn discover(&self, host: &str) -> Result<Capabilities> {
        let host = validate_host(host)?;
        fetch_capabilities(&self.build_http()?, host).await
    }

    /// Discover capabilities and return an unauthenticated connection.
    pub async fn dial(&self, host: &str) -> Result<Conn> {
        let host = validate_host(host)?;
        let http = self.build_http()?;
        let capabilities = fetch_capabilities(&http, host).await?;
        Ok(Conn::new(
            http,
            host.to_owned(),
            capabilities,
            self.identity.clone(),
        ))
    }

    /// [`dial`](Self::dial), then [`Conn::connect`].
    pub async fn dial_and_connect(&self, credentials: &Credentials) -> Result<Conn> {
        let mut conn = self.dial(&credentials.host).await?;
        conn.connect(&credentials.user, &credentials.cert).await?;
        Ok(conn)
    }
}

fn validate_host(host: &str) -> Result<&str> {
    let host = normalize_host(host);
    reqwest::Url::parse(host).map_err(|e| Error::InvalidHost {
        host: host.to_owned(),
        reason: e.to_string(),
    })?;
    Ok(host)
}

async fn fetch_capabilities(http: &reqwest::Client, host: &str) -> Result<Capabilities> {
    let request = CallRequest::new(method::GET_CAPABILITIES);
    let value = call::send(http, host, &request).await?;
    let capabilities: Capabilities = call::decode(method::GET_CAPABILITIES, value)?;
    debug!(
        host,
        authentication = ?capabilities.authentication,
        input = ?capabilities.input,
        output = ?capabilities.output,
        "conduit capabilities"
    );
    capabilities.check_required()?;
    Ok(capabilities)
}

/// Discover capabilities of `host` with default options.
pub async fn discover_capabilities(host: &str) -> Result<Capabilities> {
    Dialer::new().discover(host).await
}

/// Open an unauthenticated connection to `host` with default options.
pub async fn dial(host: &str) -> Result<Conn> {
    Dialer::new().dial(host).await
}

/// Open a connection to `host` and authenticate as `user`.
pub async fn connect(host: &str, user: &str, cert: &str) -> Result<Conn> {
    Dialer::new()
        .dial_and_connect(&Credentials::new(host, user, cert))
        .await
}
