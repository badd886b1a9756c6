//! Cache registry - central management for named caches.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use super::{CacheConfig, TypedCache};

/// Registry of named, typed caches.
///
/// Stores built in different places (city store, activity log) can share one
/// cache by asking for the same name.
#[derive(Clone, Default)]
pub struct CacheRegistry {
    caches: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

/// Type-erased cache handle.
struct CacheEntry {
    cache: Box<dyn Any + Send + Sync>,
    type_id: TypeId,
    type_name: &'static str,
}

impl CacheRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an existing cache or create and register a new one.
    ///
    /// A name already registered with different key/value types is not
    /// shared: a private cache is returned instead and a warning is logged.
    pub fn get_or_create<K, V>(&self, name: &str, config: CacheConfig) -> TypedCache<K, V>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        let expected = TypeId::of::<TypedCache<K, V>>();
        let mut caches = self.caches.write();

        if let Some(existing) = caches.get(name) {
            if existing.type_id == expected {
                if let Some(cache) = existing.cache.downcast_ref::<TypedCache<K, V>>() {
                    return cache.clone();
                }
            }
            warn!(
                "Cache '{}' already registered as {}, using a private {}",
                name,
                existing.type_name,
                std::any::type_name::<TypedCache<K, V>>()
            );
            return TypedCache::new(name, config);
        }

        debug!("Creating cache: {}", name);
        let cache = TypedCache::new(name, config);
        caches.insert(
            name.to_string(),
            CacheEntry {
                cache: Box::new(cache.clone()),
                type_id: expected,
                type_name: std::any::type_name::<TypedCache<K, V>>(),
            },
        );
        cache
    }
}

impl std::fmt::Debug for CacheRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let caches = self.caches.read();
        f.debug_struct("CacheRegistry")
            .field("cache_count", &caches.len())
            .field("cache_names", &caches.keys().collect::<Vec<_>>())
            .finish()
    }
}
