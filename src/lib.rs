//! # nessie-tree-client
//!
//! Nessie 树 API 客户端：按端点缓存并复用客户端实例。
//!
//! Nessie tree API clients, memoized per endpoint in bounded LRU caches so that
//! repeated requests against the same endpoint reuse one client instead of
//! rebuilding its configuration and HTTP state.
//!
//! ## Overview
//!
//! Two API families are served, each from its own cache:
//!
//! - **v1** ([`TreeApi`]): [`get_tree_api`], up to 10 cached clients. Endpoints
//!   advertised under the legacy `/nessie/` segment are rewritten to `/nessieV1/`.
//! - **v2** ([`TreeApiV2`]): [`get_api_v2`], up to 50 cached clients.
//!
//! A missing or empty endpoint selects the baseline endpoint (`NESSIE_API_ROOT`
//! plus `/v1` or `/v2`). A separate default v1 client, [`default_tree_api`], is
//! built once on first access for callers that never switch endpoints.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nessie_tree_client::{get_tree_api, GetEntriesRequest};
//!
//! #[tokio::main]
//! async fn main() -> nessie_tree_client::Result<()> {
//!     let api = get_tree_api(Some("https://dremio.example.com/nessie/proj/api/v1"))?;
//!     let entries = api
//!         .get_entries(&GetEntriesRequest::new("main").with_max_records(100))
//!         .await?;
//!     for entry in entries.entries {
//!         println!("{} {}", entry.content_type, entry.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Generic keyed factory cache with LRU eviction |
//! | [`registry`] | The two per-family cache instances and global accessors |
//! | [`client`] | v1/v2 tree API clients and the default client |
//! | [`config`] | Settings from the environment and endpoint resolution |
//! | [`transport`] | HTTP transport built on `reqwest` |
//! | [`types`] | Request and response payloads |

pub mod cache;
pub mod client;
pub mod config;
pub mod registry;
pub mod transport;
pub mod types;

pub use cache::{CacheStats, EndpointKey, KeyedFactoryCache};
pub use client::{default_tree_api, get_entries, TreeApi, TreeApiV2};
pub use config::{ApiSettings, ApiVersion, ClientConfig};
pub use registry::{get_api_v2, get_tree_api, TreeApiRegistry};
pub use types::{EntriesResponse, GetEntriesRequest};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
