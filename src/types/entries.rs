use serde::{Deserialize, Serialize};

use crate::config::ApiVersion;

/// Parameters of a `getEntries` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEntriesRequest {
    /// Branch or tag name.
    pub ref_name: String,
    pub hash_on_ref: Option<String>,
    pub max_records: Option<u32>,
    pub page_token: Option<String>,
    /// CEL filter expression.
    pub filter: Option<String>,
    /// Only honoured by the v1 API.
    pub namespace_depth: Option<u32>,
}

impl GetEntriesRequest {
    pub fn new(ref_name: impl Into<String>) -> Self {
        Self {
            ref_name: ref_name.into(),
            ..Default::default()
        }
    }

    pub fn with_hash_on_ref(mut self, hash: impl Into<String>) -> Self {
        self.hash_on_ref = Some(hash.into());
        self
    }

    pub fn with_max_records(mut self, max: u32) -> Self {
        self.max_records = Some(max);
        self
    }

    pub fn with_page_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_namespace_depth(mut self, depth: u32) -> Self {
        self.namespace_depth = Some(depth);
        self
    }

    /// Reference path segment: `name` for v1, `name@hash` for v2 when a hash is pinned.
    pub fn ref_segment(&self, version: ApiVersion) -> String {
        match (version, &self.hash_on_ref) {
            (ApiVersion::V2, Some(hash)) => format!("{}@{}", self.ref_name, hash),
            _ => self.ref_name.clone(),
        }
    }

    pub fn query_params(&self, version: ApiVersion) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if version == ApiVersion::V1 {
            if let Some(hash) = &self.hash_on_ref {
                params.push(("hashOnRef", hash.clone()));
            }
        }
        if let Some(max) = self.max_records {
            params.push(("maxRecords", max.to_string()));
        }
        if let Some(token) = &self.page_token {
            params.push(("pageToken", token.clone()));
        }
        if let Some(filter) = &self.filter {
            params.push(("filter", filter.clone()));
        }
        if version == ApiVersion::V1 {
            if let Some(depth) = self.namespace_depth {
                params.push(("namespaceDepth", depth.to_string()));
            }
        }
        params
    }
}

/// Multi-element content key, e.g. `["db", "schema", "table"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentKey {
    #[serde(default)]
    pub elements: Vec<String>,
}

impl ContentKey {
    pub fn new<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
        }
    }
}

impl std::fmt::Display for ContentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.elements.join("."))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Content type, e.g. `ICEBERG_TABLE`, `NAMESPACE`.
    #[serde(rename = "type")]
    pub content_type: String,
    pub name: ContentKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntriesResponse {
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub token: Option<String>,
}
