//! Per-family client caches.
//!
//! A [`TreeApiRegistry`] owns one [`KeyedFactoryCache`] per API family. Each
//! cache closes over its own resolver/constructor pair and has its own lock,
//! so activity in one family never touches the other.

use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::cache::{CacheStats, EndpointKey, KeyedFactoryCache};
use crate::client::{TreeApi, TreeApiV2};
use crate::config::{global_settings, resolve_v1, resolve_v2, ApiSettings};
use crate::Result;

/// Maximum number of cached v1 clients.
pub const TREE_API_CAPACITY: usize = 10;
/// Maximum number of cached v2 clients.
pub const API_V2_CAPACITY: usize = 50;

/// Counters for both client families.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub tree_api: CacheStats,
    pub api_v2: CacheStats,
}

/// The v1 and v2 client caches, sharing one set of baseline settings.
pub struct TreeApiRegistry {
    settings: Arc<ApiSettings>,
    tree_api: KeyedFactoryCache<EndpointKey, Arc<TreeApi>>,
    api_v2: KeyedFactoryCache<EndpointKey, Arc<TreeApiV2>>,
}

impl TreeApiRegistry {
    pub fn new(settings: ApiSettings) -> Result<Self> {
        Self::with_capacities(settings, TREE_API_CAPACITY, API_V2_CAPACITY)
    }

    pub fn with_capacities(
        settings: ApiSettings,
        tree_api_capacity: usize,
        api_v2_capacity: usize,
    ) -> Result<Self> {
        let settings = Arc::new(settings);

        let v1_settings = settings.clone();
        let tree_api = KeyedFactoryCache::new(
            "tree_api",
            tree_api_capacity,
            move |key: &EndpointKey| -> Result<Arc<TreeApi>> {
                let config = resolve_v1(&v1_settings, key.endpoint())?;
                Ok(Arc::new(TreeApi::new(config)?))
            },
        )?;

        let v2_settings = settings.clone();
        let api_v2 = KeyedFactoryCache::new(
            "api_v2",
            api_v2_capacity,
            move |key: &EndpointKey| -> Result<Arc<TreeApiV2>> {
                let config = resolve_v2(&v2_settings, key.endpoint())?;
                Ok(Arc::new(TreeApiV2::new(config)?))
            },
        )?;

        Ok(Self {
            settings,
            tree_api,
            api_v2,
        })
    }

    /// v1 client for `endpoint`; `None` or `""` selects the baseline endpoint.
    pub fn tree_api(&self, endpoint: Option<&str>) -> Result<Arc<TreeApi>> {
        self.tree_api.get(endpoint)
    }

    /// v2 client for `endpoint`; `None` or `""` selects the baseline endpoint.
    pub fn api_v2(&self, endpoint: Option<&str>) -> Result<Arc<TreeApiV2>> {
        self.api_v2.get(endpoint)
    }

    pub fn tree_api_cache(&self) -> &KeyedFactoryCache<EndpointKey, Arc<TreeApi>> {
        &self.tree_api
    }

    pub fn api_v2_cache(&self) -> &KeyedFactoryCache<EndpointKey, Arc<TreeApiV2>> {
        &self.api_v2
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            tree_api: self.tree_api.stats(),
            api_v2: self.api_v2.stats(),
        }
    }
}

static GLOBAL_REGISTRY: OnceCell<TreeApiRegistry> = OnceCell::new();

/// Process-wide registry built from [`global_settings`] on first use.
pub fn global_registry() -> Result<&'static TreeApiRegistry> {
    GLOBAL_REGISTRY.get_or_try_init(|| TreeApiRegistry::new(global_settings().clone()))
}

/// Cached v1 client for `endpoint` from the process-wide registry.
pub fn get_tree_api(endpoint: Option<&str>) -> Result<Arc<TreeApi>> {
    global_registry()?.tree_api(endpoint)
}

/// Cached v2 client for `endpoint` from the process-wide registry.
pub fn get_api_v2(endpoint: Option<&str>) -> Result<Arc<TreeApiV2>> {
    global_registry()?.api_v2(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn registry() -> TreeApiRegistry {
        TreeApiRegistry::new(ApiSettings::default().with_root_url("http://catalog.local/api"))
            .unwrap()
    }

    #[test]
    fn test_capacities() {
        let r = registry();
        assert_eq!(r.tree_api_cache().capacity(), TREE_API_CAPACITY);
        assert_eq!(r.api_v2_cache().capacity(), API_V2_CAPACITY);
    }

    #[test]
    fn test_default_slot_shared() {
        let r = registry();
        let a = r.tree_api(None).unwrap();
        let b = r.tree_api(Some("")).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.base_path(), "http://catalog.local/api/v1");
        assert_eq!(r.stats().tree_api.misses, 1);
    }

    #[test]
    fn test_malformed_endpoint_not_cached() {
        let r = registry();
        assert!(matches!(r.api_v2(Some("::nope")), Err(Error::Configuration { .. })));
        assert!(matches!(r.api_v2(Some("::nope")), Err(Error::Configuration { .. })));
        let stats = r.stats().api_v2;
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.failures, 2);
        assert_eq!(r.api_v2_cache().len(), 0);
    }

    #[test]
    fn test_zero_capacity() {
        let result = TreeApiRegistry::with_capacities(ApiSettings::default(), 0, 1);
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }
}
