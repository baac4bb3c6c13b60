//! The process-wide default v1 client.
//!
//! Built once, on first access, from the baseline settings with no endpoint
//! override. It is independent of the keyed caches in [`crate::registry`]: the
//! default client and `get_tree_api(None)` are distinct instances.

use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::info;

use super::TreeApi;
use crate::config::{global_settings, resolve_v1, ApiSettings};
use crate::types::{EntriesResponse, GetEntriesRequest};
use crate::Result;

static DEFAULT_TREE_API: OnceCell<Arc<TreeApi>> = OnceCell::new();

/// Build a v1 client against the baseline endpoint of `settings`.
pub fn build_default_tree_api(settings: &ApiSettings) -> Result<TreeApi> {
    TreeApi::new(resolve_v1(settings, None)?)
}

/// The shared default client. A failed build is not remembered; the next call
/// tries again.
pub fn default_tree_api() -> Result<Arc<TreeApi>> {
    DEFAULT_TREE_API
        .get_or_try_init(|| -> Result<Arc<TreeApi>> {
            let api = build_default_tree_api(global_settings())?;
            info!(base_path = api.base_path(), "initialized default tree API client");
            Ok(Arc::new(api))
        })
        .cloned()
}

/// Forward to [`TreeApi::get_entries`] on the default client.
pub async fn get_entries(request: &GetEntriesRequest) -> Result<EntriesResponse> {
    let api = default_tree_api()?;
    api.get_entries(request).await
}
