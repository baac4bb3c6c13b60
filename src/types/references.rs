use serde::{Deserialize, Serialize};

/// Branch, tag or detached commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// `BRANCH`, `TAG` or `DETACHED`.
    #[serde(rename = "type")]
    pub ref_type: String,
    pub name: String,
    #[serde(default)]
    pub hash: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencesResponse {
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub token: Option<String>,
}

/// Server configuration as reported by `GET /config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NessieConfiguration {
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub min_supported_api_version: Option<u32>,
    #[serde(default)]
    pub max_supported_api_version: Option<u32>,
    #[serde(default)]
    pub spec_version: Option<String>,
}
