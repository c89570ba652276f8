//! Handshake token and signature.
//!
//! `conduit.connect` authenticates with a token (the current Unix time) and
//! the hex SHA-1 of the token followed by the user's certificate. SHA-1 is
//! what the server checks against; it is not a choice made here.

use sha1::{Digest, Sha1};
use std::time::{SystemTime, UNIX_EPOCH};

/// A token/signature pair for one handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSignature {
    token: String,
    signature: String,
}

impl AuthSignature {
    /// Sign with the current time as the token.
    pub fn now(cert: &str) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self::at(timestamp, cert)
    }

    /// Sign with an explicit Unix timestamp as the token.
    pub fn at(timestamp: u64, cert: &str) -> Self {
        let token = timestamp.to_string();
        let signature = sign(&token, cert);
        Self { token, signature }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }
}

/// Lowercase hex SHA-1 of `token` followed by `cert`.
pub fn sign(token: &str, cert: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(token.as_bytes());
    hasher.update(cert.as_bytes());
    hex::encode(hasher.finalize())
}
