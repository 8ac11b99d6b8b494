//! List commands, including the blocking pop family.
//!
//! Blocking commands take a timeout in whole seconds; `0` waits forever.
//! They run on a dedicated connection (see `query_blocking`).

use crate::{InsertPosition, NamespacedStore, StoreResult};
use redis::ToRedisArgs;
use tracing::debug;

impl NamespacedStore {
    /// LPUSH; `value` may be a single item or a slice of items. Returns the new length.
    pub async fn lpush<V>(&self, key: &str, value: V) -> StoreResult<u64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        self.query(redis::cmd("LPUSH").arg(self.key(key)).arg(value))
            .await
    }

    /// LPUSHX; only pushes onto an existing list, 0 otherwise
    pub async fn lpush_x<V>(&self, key: &str, value: V) -> StoreResult<u64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        self.query(redis::cmd("LPUSHX").arg(self.key(key)).arg(value))
            .await
    }

    /// RPUSH; returns the new length
    pub async fn rpush<V>(&self, key: &str, value: V) -> StoreResult<u64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        self.query(redis::cmd("RPUSH").arg(self.key(key)).arg(value))
            .await
    }

    /// RPUSHX; only pushes onto an existing list
    pub async fn rpush_x<V>(&self, key: &str, value: V) -> StoreResult<u64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        self.query(redis::cmd("RPUSHX").arg(self.key(key)).arg(value))
            .await
    }

    /// LPOP; `None` on an empty list
    pub async fn lpop(&self, key: &str) -> StoreResult<Option<String>> {
        self.query(redis::cmd("LPOP").arg(self.key(key))).await
    }

    /// RPOP; `None` on an empty list
    pub async fn rpop(&self, key: &str) -> StoreResult<Option<String>> {
        self.query(redis::cmd("RPOP").arg(self.key(key))).await
    }

    /// BLPOP on one list; `(logical key, value)` or `None` on timeout
    pub async fn blpop(
        &self,
        key: &str,
        timeout_secs: u64,
    ) -> StoreResult<Option<(String, String)>> {
        self.blocking_pop("BLPOP", key, timeout_secs).await
    }

    /// BRPOP on one list; `(logical key, value)` or `None` on timeout
    pub async fn brpop(
        &self,
        key: &str,
        timeout_secs: u64,
    ) -> StoreResult<Option<(String, String)>> {
        self.blocking_pop("BRPOP", key, timeout_secs).await
    }

    async fn blocking_pop(
        &self,
        command: &str,
        key: &str,
        timeout_secs: u64,
    ) -> StoreResult<Option<(String, String)>> {
        let popped: Option<(String, String)> = self
            .query_blocking(redis::cmd(command).arg(self.key(key)).arg(timeout_secs))
            .await?;

        if popped.is_none() {
            debug!(command, key = %key, timeout_secs, "Blocking pop timed out");
        }

        Ok(popped.map(|(physical, value)| (self.namespace.to_logical(&physical), value)))
    }

    /// RPOPLPUSH without waiting: `None` immediately when `source` is empty
    pub async fn rpoplpush(&self, source: &str, destination: &str) -> StoreResult<Option<String>> {
        self.query(
            redis::cmd("RPOPLPUSH")
                .arg(self.key(source))
                .arg(self.key(destination)),
        )
        .await
    }

    /// BRPOPLPUSH; waits up to `timeout_secs` for `source` to receive an element
    pub async fn brpoplpush(
        &self,
        source: &str,
        destination: &str,
        timeout_secs: u64,
    ) -> StoreResult<Option<String>> {
        self.query_blocking(
            redis::cmd("BRPOPLPUSH")
                .arg(self.key(source))
                .arg(self.key(destination))
                .arg(timeout_secs),
        )
        .await
    }

    /// Element at `index`, `None` when out of range
    pub async fn lindex(&self, key: &str, index: i64) -> StoreResult<Option<String>> {
        self.query(redis::cmd("LINDEX").arg(self.key(key)).arg(index))
            .await
    }

    /// LINSERT; new length, `-1` if `pivot` was not found, `0` if the list is missing
    pub async fn linsert<V>(
        &self,
        key: &str,
        position: InsertPosition,
        pivot: &str,
        value: V,
    ) -> StoreResult<i64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        self.query(
            redis::cmd("LINSERT")
                .arg(self.key(key))
                .arg(position.as_str())
                .arg(pivot)
                .arg(value),
        )
        .await
    }

    /// List length, 0 for a missing key
    pub async fn llen(&self, key: &str) -> StoreResult<u64> {
        self.query(redis::cmd("LLEN").arg(self.key(key))).await
    }

    /// LRANGE; negative indices count from the end (`-1` is the last element)
    pub async fn lrange(&self, key: &str, start: i64, stop: i64) -> StoreResult<Vec<String>> {
        self.query(
            redis::cmd("LRANGE")
                .arg(self.key(key))
                .arg(start)
                .arg(stop),
        )
        .await
    }

    /// LREM; returns how many elements were removed
    pub async fn lrem<V>(&self, key: &str, count: i64, value: V) -> StoreResult<u64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        self.query(
            redis::cmd("LREM")
                .arg(self.key(key))
                .arg(count)
                .arg(value),
        )
        .await
    }

    /// LSET; errors when `index` is out of range
    pub async fn lset<V>(&self, key: &str, index: i64, value: V) -> StoreResult<()>
    where
        V: ToRedisArgs + Send + Sync,
    {
        self.query::<()>(
            redis::cmd("LSET")
                .arg(self.key(key))
                .arg(index)
                .arg(value),
        )
        .await
    }
}
