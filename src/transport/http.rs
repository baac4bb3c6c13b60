use crate::config::ClientConfig;
use crate::{Error, ErrorContext, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Proxy;
use serde::de::DeserializeOwned;
use url::Url;

/// HTTP plumbing for one resolved base path.
///
/// Building a transport only assembles a `reqwest::Client`; no connection is
/// opened until the first request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.auth_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                Error::construction_with_context(
                    "auth token is not a valid header value",
                    ErrorContext::new()
                        .with_field_path("auth_token")
                        .with_source("http_transport"),
                )
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host);

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::construction_with_context(
                    format!("invalid proxy: {}", e),
                    ErrorContext::new()
                        .with_field_path("proxy_url")
                        .with_details(proxy_url.clone())
                        .with_source("http_transport"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| {
            Error::construction_with_context(
                e.to_string(),
                ErrorContext::new().with_source("http_transport"),
            )
        })?;

        let base_url = Url::parse(&config.base_path).map_err(|e| {
            Error::construction_with_context(
                format!("invalid base path: {}", e),
                ErrorContext::new()
                    .with_field_path("base_path")
                    .with_details(config.base_path.clone())
                    .with_source("http_transport"),
            )
        })?;

        Ok(Self { client, base_url })
    }

    pub fn base_path(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Base path joined with `segments`, each percent-encoded as one path segment.
    pub fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `GET` the given path below the base path and decode the JSON body.
    ///
    /// Non-success statuses become [`Error::Remote`] carrying the response body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url_for(segments);
        tracing::debug!(url = %url, "GET");
        let mut request = self.client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        if !status.is_success() {
            return Err(Error::Remote {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
