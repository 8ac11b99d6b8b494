//! Namespaced Redis command facade
//!
//! Wraps the string, key, hash, list, set and sorted-set command families
//! behind one key convention: every key argument is sent to Redis as
//! `{namespace}:{key}` and every key that comes back inside a result is
//! stripped of that prefix again. Callers only ever handle logical keys.
//!
//! Each operation maps to exactly one Redis command and returns
//! [`StoreResult`]; transport and server errors are never folded into
//! `false` or empty values.
//!
//! # Example
//!
//! ```no_run
//! use namespaced_store::NamespacedStore;
//! use redis_utils::RedisConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RedisConfig {
//!         namespace: "shop".to_string(),
//!         ..Default::default()
//!     };
//!     let store = NamespacedStore::connect(&config).await?;
//!
//!     // Sent as SET shop:cart:42 ...
//!     store.set("cart:42", "3 items", 600).await?;
//!     assert_eq!(store.get("cart:42").await?, Some("3 items".to_string()));
//!     Ok(())
//! }
//! ```

mod cache;
mod error;
mod hashes;
mod keys;
mod lists;
mod namespace;
mod sets;
mod sorted_sets;
mod strings;
mod types;

pub use cache::JsonCache;
pub use error::{StoreError, StoreResult};
pub use namespace::Namespace;
pub use types::{InsertPosition, KeyType, RangeBy, ScoredMember, Ttl};

use redis::aio::ConnectionManager;
use redis::{Client, Cmd, FromRedisValue};
use redis_utils::{RedisConfig, RedisPool};
use tracing::{debug, info, warn};

/// Facade over a connected Redis client with an immutable key namespace.
///
/// Cloning is cheap: the multiplexed connection and the namespace are
/// shared, so one instance can be handed to every task that needs it.
#[derive(Clone)]
pub struct NamespacedStore {
    client: Client,
    manager: ConnectionManager,
    namespace: Namespace,
}

impl NamespacedStore {
    pub fn new(client: Client, manager: ConnectionManager, namespace: Namespace) -> Self {
        Self {
            client,
            manager,
            namespace,
        }
    }

    pub fn from_pool(pool: &RedisPool, namespace: Namespace) -> Self {
        Self::new(pool.client(), pool.manager(), namespace)
    }

    /// Connect using `config` and its configured namespace
    pub async fn connect(config: &RedisConfig) -> anyhow::Result<Self> {
        let pool = RedisPool::connect(config).await?;
        let namespace = Namespace::new(config.namespace.clone());

        info!(namespace = %namespace, "Namespaced store ready");

        Ok(Self::from_pool(&pool, namespace))
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub(crate) fn key(&self, key: &str) -> String {
        self.namespace.to_physical(key)
    }

    pub(crate) fn keys_of<S: AsRef<str>>(&self, keys: &[S]) -> Vec<String> {
        self.namespace.to_physical_all(keys)
    }

    /// Run one command on the shared multiplexed connection
    pub(crate) async fn query<T: FromRedisValue>(&self, cmd: &Cmd) -> StoreResult<T> {
        let mut conn = self.manager.clone();
        cmd.query_async::<_, T>(&mut conn).await.map_err(|e| {
            warn!(error = %e, namespace = %self.namespace, "Redis command failed");
            StoreError::Redis(e)
        })
    }

    /// Run a blocking command (BLPOP and friends) on its own connection.
    ///
    /// The server holds the reply until the timeout expires, so it must not
    /// share the multiplexed connection with unrelated callers.
    pub(crate) async fn query_blocking<T: FromRedisValue>(&self, cmd: &Cmd) -> StoreResult<T> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to open dedicated connection for blocking command");
                StoreError::Redis(e)
            })?;

        debug!(namespace = %self.namespace, "Issuing blocking command");

        cmd.query_async::<_, T>(&mut conn).await.map_err(|e| {
            warn!(error = %e, namespace = %self.namespace, "Blocking Redis command failed");
            StoreError::Redis(e)
        })
    }
}

pub(crate) fn require_keys<S>(command: &str, keys: &[S]) -> StoreResult<()> {
    if keys.is_empty() {
        return Err(StoreError::InvalidArgument(format!(
            "{} requires at least one key",
            command
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_keys() {
        let empty: [&str; 0] = [];
        let err = require_keys("SDIFF", &empty).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: SDIFF requires at least one key"
        );
        assert!(require_keys("SDIFF", &["a"]).is_ok());
    }
}
