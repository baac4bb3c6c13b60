//! Bounded memoizing factory cache.

use lru::LruCache;
use std::fmt::Debug;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use crate::{Error, ErrorContext, Result};

/// Factory invoked on a cache miss.
pub type Factory<K, V, E> = Box<dyn Fn(&K) -> std::result::Result<V, E> + Send + Sync>;

/// Snapshot of a cache's lookup counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub failures: u64,
}

impl CacheStats {
    /// Hits over total lookups, `0.0` before the first lookup.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct AtomicStats {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    failures: AtomicU64,
}

impl AtomicStats {
    fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }
    fn to_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// Memoizes `factory(key)` per key, holding at most `capacity` values and
/// evicting the least-recently-used entry when a miss pushes it over.
///
/// The whole lookup/construct/insert/evict sequence of [`get`](Self::get) runs
/// under one mutex, so concurrent callers asking for the same absent key cause
/// exactly one factory invocation. Failed constructions leave no entry behind.
/// A factory that panics leaves the map untouched, so the lock is recovered
/// rather than treated as fatal.
pub struct KeyedFactoryCache<K, V, E = Error> {
    name: &'static str,
    capacity: NonZeroUsize,
    entries: Mutex<LruCache<K, V>>,
    factory: Factory<K, V, E>,
    stats: AtomicStats,
}

impl<K, V, E> KeyedFactoryCache<K, V, E>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
{
    /// Create a cache named `name` (used in logs) holding at most `capacity` entries.
    pub fn new<F>(name: &'static str, capacity: usize, factory: F) -> Result<Self>
    where
        F: Fn(&K) -> std::result::Result<V, E> + Send + Sync + 'static,
    {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            Error::configuration_with_context(
                "cache capacity must be positive",
                ErrorContext::new()
                    .with_field_path("capacity")
                    .with_source(name),
            )
        })?;
        Ok(Self {
            name,
            capacity,
            entries: Mutex::new(LruCache::new(capacity)),
            factory: Box::new(factory),
            stats: AtomicStats::new(),
        })
    }

    /// Return the value for `key`, constructing it on a miss.
    pub fn get<Q: Into<K>>(&self, key: Q) -> std::result::Result<V, E> {
        let key = key.into();
        let mut entries = self.lock();

        if let Some(value) = entries.get(&key) {
            self.stats.hits.fetch_add(1, Ordering::Relaxed);
            debug!(cache = self.name, key = ?key, "cache hit");
            return Ok(value.clone());
        }

        self.stats.misses.fetch_add(1, Ordering::Relaxed);
        debug!(cache = self.name, key = ?key, "cache miss, constructing");

        let value = match (self.factory)(&key) {
            Ok(value) => value,
            Err(e) => {
                self.stats.failures.fetch_add(1, Ordering::Relaxed);
                warn!(cache = self.name, key = ?key, "construction failed, nothing cached");
                return Err(e);
            }
        };

        // The key is absent here, so anything push hands back was evicted.
        if let Some((evicted, _)) = entries.push(key, value.clone()) {
            self.stats.evictions.fetch_add(1, Ordering::Relaxed);
            info!(cache = self.name, evicted = ?evicted, "evicted least-recently-used entry");
        }
        Ok(value)
    }

    /// Whether `key` is currently cached. Does not touch recency.
    pub fn contains<Q: Into<K>>(&self, key: Q) -> bool {
        let key = key.into();
        self.lock().contains(&key)
    }

    /// Cached keys, most-recently-used first.
    pub fn keys(&self) -> Vec<K> {
        self.lock().iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.to_stats()
    }

    // The factory runs before `push`, so a panic inside it never leaves a
    // half-inserted entry behind.
    fn lock(&self) -> MutexGuard<'_, LruCache<K, V>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
