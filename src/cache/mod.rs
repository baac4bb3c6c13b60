//! # Client Caching Module
//!
//! Bounded memoization of API clients keyed by endpoint, so repeated requests
//! against the same endpoint reuse one client instead of rebuilding its
//! configuration and HTTP state.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`KeyedFactoryCache`] | Generic LRU-bounded cache around a construction function |
//! | [`EndpointKey`] | Normalized endpoint key (absent and empty collapse to one slot) |
//! | [`CacheStats`] | Hit/miss/eviction/failure counters |
//!
//! ## Example
//!
//! ```rust
//! use nessie_tree_client::cache::{EndpointKey, KeyedFactoryCache};
//! use std::sync::Arc;
//!
//! let cache: KeyedFactoryCache<EndpointKey, Arc<String>> =
//!     KeyedFactoryCache::new("names", 2, |key: &EndpointKey| Ok(Arc::new(key.to_string())))
//!         .unwrap();
//!
//! let first = cache.get("http://localhost:19120/api/v1").unwrap();
//! let again = cache.get("http://localhost:19120/api/v1").unwrap();
//! assert!(Arc::ptr_eq(&first, &again));
//! assert_eq!(cache.stats().hits, 1);
//! ```
//!
//! Entries only leave the cache through LRU eviction. There is no expiry and no
//! explicit removal, and a failed construction never occupies a slot.

mod factory;
mod key;

pub use factory::{CacheStats, Factory, KeyedFactoryCache};
pub use key::EndpointKey;
