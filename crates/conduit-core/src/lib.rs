//! Core types for the Conduit API.
//!
//! This crate holds everything that does not touch the network: the session
//! and capability types, the handshake signature, request form encoding and
//! response envelope decoding. The HTTP exchange lives in `conduit-client`.

mod capability;
mod envelope;
mod error;
mod session;
mod signature;

pub mod paste;
pub mod phid;

pub use capability::{Capabilities, Capability, UnsupportedCapability};
pub use envelope::{CallKind, CallRequest, Envelope, decode_keyed, endpoint_url, normalize_host};
pub use error::ConduitError;
pub use session::{ConnectParams, Session, WithSession};
pub use signature::{AuthSignature, sign};

/// Names of the remote methods this workspace knows about.
pub mod method {
    pub const GET_CAPABILITIES: &str = "conduit.getcapabilities";
    pub const CONNECT: &str = "conduit.connect";
    pub const PHID_LOOKUP: &str = "phid.lookup";
    pub const PHID_QUERY: &str = "phid.query";
    pub const PASTE_CREATE: &str = "paste.create";
    pub const PASTE_QUERY: &str = "paste.query";
}
