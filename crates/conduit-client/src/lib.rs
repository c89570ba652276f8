//! Client for the Conduit API.
//!
//! A connection goes through two steps:
//!
//! 1. [`Dialer::dial`] asks the server for its capabilities and checks it
//!    speaks the modes this client needs (session authentication, urlencoded
//!    input, JSON output).
//! 2. [`Conn::connect`] performs the `conduit.connect` handshake and keeps the
//!    resulting [`Session`] for every later call.
//!
//! [`connect`] does both. Each call is one form-encoded POST; there is no
//! retry, batching or pooling beyond what `reqwest` does on its own.
//!
//! ```no_run
//! # async fn run() -> conduit_client::Result<()> {
//! let conn = conduit_client::connect("https://phab.example.com", "alice", "api-cert").await?;
//! let task = conn.phid_lookup_single("T1").await?;
//! println!("{task:?}");
//! # Ok(())
//! # }
//! ```

mod call;
mod conn;
mod dialer;
mod error;
mod paste;
mod phid;

pub use conduit_core::paste::{
    CreateParams as PasteCreateParams, PasteItem, QueryParams as PasteQueryParams,
};
pub use conduit_core::phid::PhidResult;
pub use conduit_core::{
    Capabilities, Capability, ConduitError, Session, UnsupportedCapability, method,
};
pub use conn::Conn;
pub use dialer::{Credentials, Dialer, connect, dial, discover_capabilities};
pub use error::{Error, Result};
pub use indexmap::IndexMap;
