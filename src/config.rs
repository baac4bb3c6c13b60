//! Endpoint resolution and transport settings.
//!
//! [`ApiSettings`] is the process-level baseline (root URL, credentials, HTTP
//! knobs) read from the environment. [`resolve`] turns an optional endpoint into
//! the [`ClientConfig`] a client is constructed from. Resolution is pure: it
//! only parses and rewrites strings.

use keyring::Entry;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;
use url::Url;

use crate::{Error, ErrorContext, Result};

const KEYRING_SERVICE: &str = "nessie-tree-client";
const KEYRING_USER: &str = "default";

/// Legacy v1 deployments mount the v1 tree API under `/nessieV1/` while
/// endpoints are still advertised under `/nessie/`.
const LEGACY_V1_SEGMENT: &str = "/nessie/";
const V1_SEGMENT: &str = "/nessieV1/";

/// Tree API family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    V1,
    V2,
}

impl ApiVersion {
    pub fn path_segment(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Baseline settings shared by every client this process builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    /// Root under which `/v1` and `/v2` live when no endpoint is given.
    pub root_url: String,
    pub auth_token: Option<String>,
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub proxy_url: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            root_url: Self::DEFAULT_ROOT_URL.to_string(),
            auth_token: None,
            timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 8,
            proxy_url: None,
        }
    }
}

impl ApiSettings {
    pub const DEFAULT_ROOT_URL: &'static str = "http://localhost:19120/api";

    /// Read settings from the environment (defaults for anything unset).
    ///
    /// - `NESSIE_API_ROOT`
    /// - `NESSIE_AUTH_TOKEN` (the OS keyring is tried first when `NESSIE_USE_KEYRING=1`)
    /// - `NESSIE_HTTP_TIMEOUT_SECS` (default 30)
    /// - `NESSIE_HTTP_POOL_MAX_IDLE_PER_HOST` (default 8)
    /// - `NESSIE_PROXY_URL`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let timeout_secs = env::var("NESSIE_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(defaults.timeout.as_secs());

        Self {
            root_url: env::var("NESSIE_API_ROOT")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.root_url),
            auth_token: Self::lookup_auth_token(),
            timeout: Duration::from_secs(timeout_secs),
            pool_max_idle_per_host: env::var("NESSIE_HTTP_POOL_MAX_IDLE_PER_HOST")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(defaults.pool_max_idle_per_host),
            proxy_url: env::var("NESSIE_PROXY_URL").ok().filter(|s| !s.is_empty()),
        }
    }

    fn lookup_auth_token() -> Option<String> {
        // 1. Keyring, opt-in only
        if env::var("NESSIE_USE_KEYRING").ok().as_deref() == Some("1") {
            if let Some(token) = Entry::new(KEYRING_SERVICE, KEYRING_USER)
                .ok()
                .and_then(|entry| entry.get_password().ok())
            {
                return Some(token);
            }
        }

        // 2. Environment
        env::var("NESSIE_AUTH_TOKEN").ok().filter(|s| !s.is_empty())
    }

    pub fn with_root_url(mut self, root_url: impl Into<String>) -> Self {
        self.root_url = root_url.into();
        self
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_proxy_url(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }
}

static GLOBAL_SETTINGS: Lazy<ApiSettings> = Lazy::new(ApiSettings::from_env);

/// Process-wide settings, read from the environment on first access.
pub fn global_settings() -> &'static ApiSettings {
    &GLOBAL_SETTINGS
}

/// Everything needed to construct one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub version: ApiVersion,
    /// Normalized base path, no trailing slash.
    pub base_path: String,
    pub auth_token: Option<String>,
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub proxy_url: Option<String>,
}

/// Resolve `endpoint` for the given API family.
///
/// `None` and `""` select `{root_url}/{version}`. A v1 endpoint has its first
/// legacy `/nessie/` segment rewritten to `/nessieV1/`; v2 endpoints are used
/// as given.
pub fn resolve(
    settings: &ApiSettings,
    version: ApiVersion,
    endpoint: Option<&str>,
) -> Result<ClientConfig> {
    let raw = match endpoint.filter(|e| !e.is_empty()) {
        None => format!(
            "{}/{}",
            settings.root_url.trim_end_matches('/'),
            version.path_segment()
        ),
        Some(e) => match version {
            ApiVersion::V1 => e.replacen(LEGACY_V1_SEGMENT, V1_SEGMENT, 1),
            ApiVersion::V2 => e.to_string(),
        },
    };

    let url = Url::parse(&raw).map_err(|e| {
        Error::configuration_with_context(
            format!("invalid {} endpoint: {}", version, e),
            ErrorContext::new()
                .with_field_path("endpoint")
                .with_details(raw.clone())
                .with_source("config_resolver"),
        )
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::configuration_with_context(
            format!("unsupported scheme '{}'", url.scheme()),
            ErrorContext::new()
                .with_field_path("endpoint")
                .with_details(raw)
                .with_source("config_resolver"),
        ));
    }

    Ok(ClientConfig {
        version,
        base_path: url.as_str().trim_end_matches('/').to_string(),
        auth_token: settings.auth_token.clone(),
        timeout: settings.timeout,
        pool_max_idle_per_host: settings.pool_max_idle_per_host,
        proxy_url: settings.proxy_url.clone(),
    })
}

pub fn resolve_v1(settings: &ApiSettings, endpoint: Option<&str>) -> Result<ClientConfig> {
    resolve(settings, ApiVersion::V1, endpoint)
}

pub fn resolve_v2(settings: &ApiSettings, endpoint: Option<&str>) -> Result<ClientConfig> {
    resolve(settings, ApiVersion::V2, endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ApiSettings {
        ApiSettings::default().with_root_url("http://catalog.local:9047/api/")
    }

    #[test]
    fn test_default_endpoint_uses_root() {
        let v1 = resolve_v1(&settings(), None).unwrap();
        assert_eq!(v1.base_path, "http://catalog.local:9047/api/v1");
        assert_eq!(v1.version, ApiVersion::V1);

        let v2 = resolve_v2(&settings(), Some("")).unwrap();
        assert_eq!(v2.base_path, "http://catalog.local:9047/api/v2");
    }

    #[test]
    fn test_v1_rewrites_legacy_segment() {
        let cfg = resolve_v1(
            &settings(),
            Some("https://dremio.example.com/nessie/proj-1/api/v1"),
        )
        .unwrap();
        assert_eq!(
            cfg.base_path,
            "https://dremio.example.com/nessieV1/proj-1/api/v1"
        );
    }

    #[test]
    fn test_v1_rewrites_only_first_legacy_segment() {
        let cfg = resolve_v1(
            &settings(),
            Some("https://h.example.com/nessie/proj/nessie/api/v1"),
        )
        .unwrap();
        assert_eq!(cfg.base_path, "https://h.example.com/nessieV1/proj/nessie/api/v1");
    }

    #[test]
    fn test_v2_keeps_endpoint() {
        let cfg = resolve_v2(
            &settings(),
            Some("https://dremio.example.com/nessie/proj-1/api/v2/"),
        )
        .unwrap();
        assert_eq!(
            cfg.base_path,
            "https://dremio.example.com/nessie/proj-1/api/v2"
        );
    }

    #[test]
    fn test_malformed_endpoint() {
        let err = resolve_v1(&settings(), Some("not a url")).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("endpoint")
        );
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = resolve_v2(&settings(), Some("ftp://files.example.com/api")).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_settings_flow_into_config() {
        let s = settings()
            .with_auth_token("tok")
            .with_timeout(Duration::from_secs(5));
        let cfg = resolve_v2(&s, None).unwrap();
        assert_eq!(cfg.auth_token.as_deref(), Some("tok"));
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }
}
