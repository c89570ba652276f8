//! Client error type.

use conduit_core::{ConduitError, UnsupportedCapability};

/// Everything a Conduit call can fail with.
///
/// [`Error::Conduit`] is the server's own answer; every other variant is a
/// local or transport failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid host {host:?}: {reason}")]
    InvalidHost { host: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("{method}: failed to encode params: {source}")]
    Encode {
        method: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{method}: request failed: {source}")]
    Transport {
        method: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method}: failed to decode response: {source}")]
    Decode {
        method: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Conduit(#[from] ConduitError),
    #[error(transparent)]
    Unsupported(#[from] UnsupportedCapability),
    #[error("{method}: not authenticated, connect first")]
    NotAuthenticated { method: String },
}

impl Error {
    /// Whether the server answered with an `error_code`.
    pub fn is_conduit_error(&self) -> bool {
        matches!(self, Error::Conduit(_))
    }

    /// The server's error, if this is one.
    pub fn as_conduit_error(&self) -> Option<&ConduitError> {
        match self {
            Error::Conduit(err) => Some(err),
            _ => None,
        }
    }

    pub(crate) fn encode(method: &str, source: serde_json::Error) -> Self {
        Error::Encode {
            method: method.to_owned(),
            source,
        }
    }

    pub(crate) fn decode(method: &str, source: serde_json::Error) -> Self {
        Error::Decode {
            method: method.to_owned(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
