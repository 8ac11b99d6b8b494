//! JSON object cache on top of the namespaced string commands

use crate::{Namespace, NamespacedStore, StoreResult};
use anyhow::Result;
use redis_utils::{RedisConfig, RedisPool};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

/// Stores serializable values as JSON strings under namespaced keys.
#[derive(Clone)]
pub struct JsonCache {
    store: NamespacedStore,
}

impl JsonCache {
    pub fn new(store: NamespacedStore) -> Self {
        Self { store }
    }

    /// Connect to the cache database configured by `cache_database`
    /// (`REDIS_CACHE_DATABASE`), scoped to the configured namespace.
    pub async fn connect(config: &RedisConfig) -> Result<Self> {
        let pool = RedisPool::connect_cache(config).await?;
        let namespace = Namespace::new(config.namespace.clone());
        Ok(Self::new(NamespacedStore::from_pool(&pool, namespace)))
    }

    pub fn store(&self) -> &NamespacedStore {
        &self.store
    }

    /// Cached value, or `None` on a miss.
    ///
    /// Entries that no longer decode as `T` are deleted and reported as a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(data) = self.store.get(key).await? else {
            debug!(key = %key, "Cache miss");
            return Ok(None);
        };

        match serde_json::from_str::<T>(&data) {
            Ok(value) => {
                debug!(key = %key, "Cache hit");
                Ok(Some(value))
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Cache deserialization failed");
                let _ = self.store.del(key).await;
                Ok(None)
            }
        }
    }

    /// Store `value`; `ttl_secs <= 0` keeps it without an expiry
    pub async fn put<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: i64,
    ) -> StoreResult<()> {
        let data = serde_json::to_string(value)?;
        self.store.set(key, data, ttl_secs).await
    }

    pub async fn remove(&self, key: &str) -> StoreResult<bool> {
        self.store.del(key).await
    }

    pub async fn contains(&self, key: &str) -> StoreResult<bool> {
        self.store.exists(key).await
    }
}
