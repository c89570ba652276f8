//! `phid.lookup` and `phid.query` types.

use serde::{Deserialize, Serialize};

/// Parameters of `phid.lookup`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LookupParams {
    pub names: Vec<String>,
}

/// Parameters of `phid.query`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryParams {
    pub phids: Vec<String>,
}

/// One object resolved by a PHID method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhidResult {
    pub phid: String,
    pub uri: String,
    #[serde(rename = "typeName")]
    pub type_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub status: String,
}
