//! String commands: GET/SET, counters, bulk get/set

use crate::{NamespacedStore, StoreResult};
use redis::ToRedisArgs;
use std::collections::HashMap;
use tracing::debug;

impl NamespacedStore {
    /// GET; `None` when the key does not exist
    pub async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.query(redis::cmd("GET").arg(self.key(key))).await
    }

    /// SET with an optional expiry; `ttl_secs <= 0` stores the value without one
    pub async fn set<V>(&self, key: &str, value: V, ttl_secs: i64) -> StoreResult<()>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut cmd = redis::cmd("SET");
        cmd.arg(self.key(key)).arg(value);
        if ttl_secs > 0 {
            cmd.arg("EX").arg(ttl_secs);
        }
        self.query::<()>(&cmd).await?;

        debug!(key = %key, ttl = ttl_secs, "SET");
        Ok(())
    }

    /// SET ... NX; returns whether the value was stored
    pub async fn set_nx<V>(&self, key: &str, value: V, ttl_secs: i64) -> StoreResult<bool>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut cmd = redis::cmd("SET");
        cmd.arg(self.key(key)).arg(value).arg("NX");
        if ttl_secs > 0 {
            cmd.arg("EX").arg(ttl_secs);
        }
        let reply: Option<String> = self.query(&cmd).await?;
        Ok(reply.is_some())
    }

    /// INCR; a missing key counts from 0
    pub async fn incr(&self, key: &str) -> StoreResult<i64> {
        self.query(redis::cmd("INCR").arg(self.key(key))).await
    }

    /// INCRBY; returns the new value
    pub async fn incr_by(&self, key: &str, increment: i64) -> StoreResult<i64> {
        self.query(redis::cmd("INCRBY").arg(self.key(key)).arg(increment))
            .await
    }

    /// DECR; returns the new value
    pub async fn decr(&self, key: &str) -> StoreResult<i64> {
        self.query(redis::cmd("DECR").arg(self.key(key))).await
    }

    /// DECRBY; returns the new value
    pub async fn decr_by(&self, key: &str, decrement: i64) -> StoreResult<i64> {
        self.query(redis::cmd("DECRBY").arg(self.key(key)).arg(decrement))
            .await
    }

    /// Length of the stored string, 0 for a missing key
    pub async fn strlen(&self, key: &str) -> StoreResult<u64> {
        self.query(redis::cmd("STRLEN").arg(self.key(key))).await
    }

    /// MSET; an empty map is a no-op
    pub async fn mset<V>(&self, values: &HashMap<String, V>) -> StoreResult<()>
    where
        V: ToRedisArgs + Send + Sync,
    {
        if values.is_empty() {
            return Ok(());
        }

        let mut cmd = redis::cmd("MSET");
        for (key, value) in values {
            cmd.arg(self.key(key)).arg(value);
        }
        self.query::<()>(&cmd).await?;

        debug!(count = values.len(), "MSET");
        Ok(())
    }

    /// MSETNX; true only if none of the keys existed and all were set
    pub async fn mset_nx<V>(&self, values: &HashMap<String, V>) -> StoreResult<bool>
    where
        V: ToRedisArgs + Send + Sync,
    {
        if values.is_empty() {
            return Ok(true);
        }

        let mut cmd = redis::cmd("MSETNX");
        for (key, value) in values {
            cmd.arg(self.key(key)).arg(value);
        }
        self.query(&cmd).await
    }

    /// MGET keyed by logical key; absent keys map to `None`
    pub async fn mget<S: AsRef<str>>(
        &self,
        keys: &[S],
    ) -> StoreResult<HashMap<String, Option<String>>> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let physical = self.keys_of(keys);
        let values: Vec<Option<String>> = self.query(redis::cmd("MGET").arg(&physical)).await?;

        Ok(physical
            .iter()
            .map(|key| self.namespace.to_logical(key))
            .zip(values)
            .collect())
    }

    /// MGET keyed by logical key with absent keys mapped to `""`.
    ///
    /// An absent key and a key holding the empty string look the same here;
    /// use [`NamespacedStore::mget`] when the difference matters.
    pub async fn mget_map<S: AsRef<str>>(&self, keys: &[S]) -> StoreResult<HashMap<String, String>> {
        Ok(self
            .mget(keys)
            .await?
            .into_iter()
            .map(|(key, value)| (key, value.unwrap_or_default()))
            .collect())
    }
}
