//! Errors reported by the Conduit server itself.

use std::fmt;

/// An error response returned by Conduit (`error_code` / `error_info`).
///
/// The code is the server's own taxonomy (`ERR-CONDUIT-CORE`,
/// `ERR-INVALID-SESSION`, ...) and is kept verbatim so callers can branch on
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConduitError {
    code: String,
    info: String,
}

impl ConduitError {
    pub fn new(code: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            info: info.into(),
        }
    }

    /// The `error_code` of the response.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The `error_info` of the response, empty if the server sent none.
    pub fn info(&self) -> &str {
        &self.info
    }
}

impl fmt::Display for ConduitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.info)
    }
}

impl std::error::Error for ConduitError {}
