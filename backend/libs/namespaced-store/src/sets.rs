//! Set commands. Every source and destination key is namespaced; members
//! are passed through unchanged.

use crate::{require_keys, NamespacedStore, StoreResult};
use redis::ToRedisArgs;

impl NamespacedStore {
    /// SADD; returns how many members were newly added
    pub async fn sadd<M>(&self, key: &str, members: &[M]) -> StoreResult<u64>
    where
        M: ToRedisArgs + Send + Sync,
    {
        if members.is_empty() {
            return Ok(0);
        }
        self.query(redis::cmd("SADD").arg(self.key(key)).arg(members))
            .await
    }

    /// Set cardinality, 0 for a missing key
    pub async fn scard(&self, key: &str) -> StoreResult<u64> {
        self.query(redis::cmd("SCARD").arg(self.key(key))).await
    }

    /// Members of the first set absent from the others
    pub async fn sdiff<S: AsRef<str>>(&self, keys: &[S]) -> StoreResult<Vec<String>> {
        require_keys("SDIFF", keys)?;
        self.query(redis::cmd("SDIFF").arg(self.keys_of(keys))).await
    }

    /// SDIFFSTORE; returns the size of the resulting set
    pub async fn sdiff_store<S: AsRef<str>>(
        &self,
        destination: &str,
        keys: &[S],
    ) -> StoreResult<u64> {
        require_keys("SDIFFSTORE", keys)?;
        self.query(
            redis::cmd("SDIFFSTORE")
                .arg(self.key(destination))
                .arg(self.keys_of(keys)),
        )
        .await
    }

    /// Members present in every set
    pub async fn sinter<S: AsRef<str>>(&self, keys: &[S]) -> StoreResult<Vec<String>> {
        require_keys("SINTER", keys)?;
        self.query(redis::cmd("SINTER").arg(self.keys_of(keys))).await
    }

    /// SINTERSTORE; returns the size of the resulting set
    pub async fn sinter_store<S: AsRef<str>>(
        &self,
        destination: &str,
        keys: &[S],
    ) -> StoreResult<u64> {
        require_keys("SINTERSTORE", keys)?;
        self.query(
            redis::cmd("SINTERSTORE")
                .arg(self.key(destination))
                .arg(self.keys_of(keys)),
        )
        .await
    }

    /// Members present in any of the sets
    pub async fn sunion<S: AsRef<str>>(&self, keys: &[S]) -> StoreResult<Vec<String>> {
        require_keys("SUNION", keys)?;
        self.query(redis::cmd("SUNION").arg(self.keys_of(keys))).await
    }

    /// SUNIONSTORE; returns the size of the resulting set
    pub async fn sunion_store<S: AsRef<str>>(
        &self,
        destination: &str,
        keys: &[S],
    ) -> StoreResult<u64> {
        require_keys("SUNIONSTORE", keys)?;
        self.query(
            redis::cmd("SUNIONSTORE")
                .arg(self.key(destination))
                .arg(self.keys_of(keys)),
        )
        .await
    }

    /// Whether `member` belongs to the set
    pub async fn sismember<M>(&self, key: &str, member: M) -> StoreResult<bool>
    where
        M: ToRedisArgs + Send + Sync,
    {
        self.query(redis::cmd("SISMEMBER").arg(self.key(key)).arg(member))
            .await
    }

    /// All members of the set
    pub async fn smembers(&self, key: &str) -> StoreResult<Vec<String>> {
        self.query(redis::cmd("SMEMBERS").arg(self.key(key))).await
    }

    /// SMOVE; false if `member` was not in `source`
    pub async fn smove<M>(&self, source: &str, destination: &str, member: M) -> StoreResult<bool>
    where
        M: ToRedisArgs + Send + Sync,
    {
        self.query(
            redis::cmd("SMOVE")
                .arg(self.key(source))
                .arg(self.key(destination))
                .arg(member),
        )
        .await
    }

    /// SREM; returns how many members were removed
    pub async fn srem<M>(&self, key: &str, members: &[M]) -> StoreResult<u64>
    where
        M: ToRedisArgs + Send + Sync,
    {
        if members.is_empty() {
            return Ok(0);
        }
        self.query(redis::cmd("SREM").arg(self.key(key)).arg(members))
            .await
    }
}
