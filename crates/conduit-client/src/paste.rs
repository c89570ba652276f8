//! `paste.create` and `paste.query`.

use crate::{Conn, Error, Result};
use conduit_core::paste::{CreateParams, PasteItem, QueryParams};
use conduit_core::{decode_keyed, method};

impl Conn {
    /// Create a paste and return it as stored.
    pub async fn paste_create(&self, params: &CreateParams) -> Result<PasteItem> {
        self.invoke(method::PASTE_CREATE, Some(params)).await
    }

    /// Query pastes. Results come back in the order the server lists them.
    pub async fn paste_query(&self, params: &QueryParams) -> Result<Vec<PasteItem>> {
        let value = self.invoke_raw(method::PASTE_QUERY, Some(params)).await?;
        decode_keyed::<PasteItem>(value)
            .map(|items| items.into_values().collect())
            .map_err(|e| Error::decode(method::PASTE_QUERY, e))
    }
}
