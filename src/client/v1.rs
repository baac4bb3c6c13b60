use crate::config::{ApiVersion, ClientConfig};
use crate::transport::HttpTransport;
use crate::types::{
    EntriesResponse, GetEntriesRequest, NessieConfiguration, Reference, ReferencesResponse,
};
use crate::Result;

/// Client for the v1 tree API.
#[derive(Debug)]
pub struct TreeApi {
    transport: HttpTransport,
}

impl TreeApi {
    pub fn new(config: ClientConfig) -> Result<Self> {
        super::ensure_version(&config, ApiVersion::V1)?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self { transport })
    }

    pub fn base_path(&self) -> &str {
        self.transport.base_path()
    }

    /// `GET /trees/tree/{ref}/entries`
    pub async fn get_entries(&self, request: &GetEntriesRequest) -> Result<EntriesResponse> {
        let reference = request.ref_segment(ApiVersion::V1);
        self.transport
            .get_json(
                &["trees", "tree", reference.as_str(), "entries"],
                &request.query_params(ApiVersion::V1),
            )
            .await
    }

    /// `GET /trees`
    pub async fn get_all_references(&self) -> Result<ReferencesResponse> {
        self.transport.get_json(&["trees"], &[]).await
    }

    /// `GET /trees/tree`
    pub async fn get_default_branch(&self) -> Result<Reference> {
        self.transport.get_json(&["trees", "tree"], &[]).await
    }

    /// `GET /config`
    pub async fn get_config(&self) -> Result<NessieConfiguration> {
        self.transport.get_json(&["config"], &[]).await
    }
}
