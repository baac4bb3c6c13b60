use crate::config::{ApiVersion, ClientConfig};
use crate::transport::HttpTransport;
use crate::types::{EntriesResponse, GetEntriesRequest, NessieConfiguration, ReferencesResponse};
use crate::Result;

/// Client for the v2 tree API.
#[derive(Debug)]
pub struct TreeApiV2 {
    transport: HttpTransport,
}

impl TreeApiV2 {
    pub fn new(config: ClientConfig) -> Result<Self> {
        super::ensure_version(&config, ApiVersion::V2)?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self { transport })
    }

    pub fn base_path(&self) -> &str {
        self.transport.base_path()
    }

    /// `GET /trees/{ref}/entries`, where `ref` is `name` or `name@hash`.
    pub async fn get_entries(&self, request: &GetEntriesRequest) -> Result<EntriesResponse> {
        let reference = request.ref_segment(ApiVersion::V2);
        self.transport
            .get_json(
                &["trees", reference.as_str(), "entries"],
                &request.query_params(ApiVersion::V2),
            )
            .await
    }

    /// `GET /trees`
    pub async fn get_all_references(&self) -> Result<ReferencesResponse> {
        self.transport.get_json(&["trees"], &[]).await
    }

    /// `GET /config`
    pub async fn get_config(&self) -> Result<NessieConfiguration> {
        self.transport.get_json(&["config"], &[]).await
    }
}
