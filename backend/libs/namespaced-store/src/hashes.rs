//! Hash commands. Only the top-level key is namespaced; field names are
//! passed through as given.

use crate::{NamespacedStore, StoreResult};
use redis::ToRedisArgs;
use std::collections::HashMap;

impl NamespacedStore {
    /// HSET of one field; true if the field was newly created
    pub async fn hset<V>(&self, key: &str, field: &str, value: V) -> StoreResult<bool>
    where
        V: ToRedisArgs + Send + Sync,
    {
        self.query(
            redis::cmd("HSET")
                .arg(self.key(key))
                .arg(field)
                .arg(value),
        )
        .await
    }

    /// HGET; `None` when the key or field is missing
    pub async fn hget(&self, key: &str, field: &str) -> StoreResult<Option<String>> {
        self.query(redis::cmd("HGET").arg(self.key(key)).arg(field))
            .await
    }

    /// All fields and values of the hash
    pub async fn hget_all(&self, key: &str) -> StoreResult<HashMap<String, String>> {
        self.query(redis::cmd("HGETALL").arg(self.key(key))).await
    }

    /// Set several fields at once
    pub async fn hmset<V>(&self, key: &str, fields: &HashMap<String, V>) -> StoreResult<()>
    where
        V: ToRedisArgs + Send + Sync,
    {
        if fields.is_empty() {
            return Ok(());
        }

        let mut cmd = redis::cmd("HSET");
        cmd.arg(self.key(key));
        for (field, value) in fields {
            cmd.arg(field).arg(value);
        }
        self.query::<()>(&cmd).await
    }

    /// HMGET keyed by field name; missing fields map to `None`
    pub async fn hmget<S: AsRef<str>>(
        &self,
        key: &str,
        fields: &[S],
    ) -> StoreResult<HashMap<String, Option<String>>> {
        if fields.is_empty() {
            return Ok(HashMap::new());
        }

        let names: Vec<&str> = fields.iter().map(|f| f.as_ref()).collect();
        let values: Vec<Option<String>> = self
            .query(redis::cmd("HMGET").arg(self.key(key)).arg(&names))
            .await?;

        Ok(names
            .into_iter()
            .map(str::to_string)
            .zip(values)
            .collect())
    }

    /// Whether `field` is present in the hash
    pub async fn hexists(&self, key: &str, field: &str) -> StoreResult<bool> {
        self.query(redis::cmd("HEXISTS").arg(self.key(key)).arg(field))
            .await
    }

    /// HDEL; returns how many fields were removed
    pub async fn hdel<S: AsRef<str>>(&self, key: &str, fields: &[S]) -> StoreResult<u64> {
        if fields.is_empty() {
            return Ok(0);
        }

        let names: Vec<&str> = fields.iter().map(|f| f.as_ref()).collect();
        self.query(redis::cmd("HDEL").arg(self.key(key)).arg(&names))
            .await
    }

    /// HINCRBY; returns the field's new value
    pub async fn hincr_by(&self, key: &str, field: &str, increment: i64) -> StoreResult<i64> {
        self.query(
            redis::cmd("HINCRBY")
                .arg(self.key(key))
                .arg(field)
                .arg(increment),
        )
        .await
    }

    /// Field names of the hash
    pub async fn hkeys(&self, key: &str) -> StoreResult<Vec<String>> {
        self.query(redis::cmd("HKEYS").arg(self.key(key))).await
    }

    /// Number of fields in the hash
    pub async fn hlen(&self, key: &str) -> StoreResult<u64> {
        self.query(redis::cmd("HLEN").arg(self.key(key))).await
    }
}
