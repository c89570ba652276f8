//! Capability discovery results (`conduit.getcapabilities`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// What a server declares it supports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub authentication: BTreeSet<String>,
    pub signatures: BTreeSet<String>,
    pub input: BTreeSet<String>,
    pub output: BTreeSet<String>,
}

impl Capabilities {
    /// Whether the server advertises the mode `capability` needs.
    pub fn supports(&self, capability: Capability) -> bool {
        let modes = match capability {
            Capability::SessionAuth => &self.authentication,
            Capability::UrlEncodedInput => &self.input,
            Capability::JsonOutput => &self.output,
        };
        modes.contains(capability.mode())
    }

    /// Check the modes this client relies on, in [`Capability::REQUIRED`]
    /// order, and report the first one missing.
    pub fn check_required(&self) -> Result<(), UnsupportedCapability> {
        for capability in Capability::REQUIRED {
            if !self.supports(capability) {
                return Err(UnsupportedCapability(capability));
            }
        }
        Ok(())
    }
}

/// A protocol mode the client needs from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `session` in the authentication list; used by `conduit.connect`.
    SessionAuth,
    /// `urlencoded` in the input list.
    UrlEncodedInput,
    /// `json` in the output list.
    JsonOutput,
}

impl Capability {
    pub const REQUIRED: [Capability; 3] = [
        Capability::SessionAuth,
        Capability::UrlEncodedInput,
        Capability::JsonOutput,
    ];

    /// The mode string as it appears in the capabilities response.
    pub fn mode(self) -> &'static str {
        match self {
            Capability::SessionAuth => "session",
            Capability::UrlEncodedInput => "urlencoded",
            Capability::JsonOutput => "json",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Capability::SessionAuth => "session authentication",
            Capability::UrlEncodedInput => "urlencoded input",
            Capability::JsonOutput => "json output",
        })
    }
}

/// The server lacks a mode this client requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0} not supported")]
pub struct UnsupportedCapability(pub Capability);
