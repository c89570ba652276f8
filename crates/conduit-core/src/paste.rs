//! `paste.create` and `paste.query` types.

use serde::{Deserialize, Serialize};

/// Parameters of `paste.create`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateParams {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl CreateParams {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Parameters of `paste.query`. Empty filters are not sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryParams {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub phids: Vec<String>,
    #[serde(rename = "authorPHIDs", skip_serializing_if = "Vec::is_empty")]
    pub author_phids: Vec<String>,
    /// Number of results to skip.
    #[serde(rename = "after", skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

/// A paste as returned by `paste.create` and `paste.query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteItem {
    pub id: u64,
    #[serde(rename = "objectName")]
    pub object_name: String,
    pub phid: String,
    #[serde(rename = "authorPHID")]
    pub author_phid: String,
    #[serde(rename = "filePHID")]
    pub file_phid: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Unix seconds.
    #[serde(rename = "dateCreated", default)]
    pub date_created: Option<u64>,
    #[serde(default)]
    pub language: Option<String>,
    pub uri: String,
    #[serde(rename = "parentPHID", default)]
    pub parent_phid: Option<String>,
    #[serde(default)]
    pub content: String,
}
