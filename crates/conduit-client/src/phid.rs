//! `phid.lookup` and `phid.query`.

use crate::{Conn, Error, Result};
use conduit_core::phid::{LookupParams, PhidResult, QueryParams};
use conduit_core::{decode_keyed, method};
use indexmap::IndexMap;

impl Conn {
    /// Resolve object names (`T1`, `D42`, `@alice`) to PHIDs.
    ///
    /// Names the server cannot resolve are absent from the map.
    pub async fn phid_lookup<I, S>(&self, names: I) -> Result<IndexMap<String, PhidResult>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let params = LookupParams {
            names: names.into_iter().map(Into::into).collect(),
        };
        let value = self.invoke_raw(method::PHID_LOOKUP, Some(&params)).await?;
        decode_keyed(value).map_err(|e| Error::decode(method::PHID_LOOKUP, e))
    }

    /// Look up a single name; `None` if the server does not know it.
    pub async fn phid_lookup_single(&self, name: &str) -> Result<Option<PhidResult>> {
        let mut results = self.phid_lookup([name]).await?;
        Ok(results.swap_remove(name))
    }

    /// Describe objects by PHID.
    pub async fn phid_query<I, S>(&self, phids: I) -> Result<IndexMap<String, PhidResult>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let params = QueryParams {
            phids: phids.into_iter().map(Into::into).collect(),
        };
        let value = self.invoke_raw(method::PHID_QUERY, Some(&params)).await?;
        decode_keyed(value).map_err(|e| Error::decode(method::PHID_QUERY, e))
    }

    /// Describe a single PHID; `None` if the server does not know it.
    pub async fn phid_query_single(&self, phid: &str) -> Result<Option<PhidResult>> {
        let mut results = self.phid_query([phid]).await?;
        Ok(results.swap_remove(phid))
    }
}
