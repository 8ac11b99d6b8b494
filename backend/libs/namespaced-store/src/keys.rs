//! Key lifecycle commands: existence, deletion, expiry, renaming, DUMP/RESTORE

use crate::{KeyType, NamespacedStore, StoreError, StoreResult, Ttl};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::debug;

impl NamespacedStore {
    /// Whether the key exists
    pub async fn exists(&self, key: &str) -> StoreResult<bool> {
        self.query(redis::cmd("EXISTS").arg(self.key(key))).await
    }

    /// DEL; true if the key existed and was removed
    pub async fn del(&self, key: &str) -> StoreResult<bool> {
        let removed: u64 = self.query(redis::cmd("DEL").arg(self.key(key))).await?;

        debug!(key = %key, removed, "DEL");
        Ok(removed == 1)
    }

    /// DEL over several keys; returns how many were removed
    pub async fn del_many<S: AsRef<str>>(&self, keys: &[S]) -> StoreResult<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let removed: u64 = self
            .query(redis::cmd("DEL").arg(self.keys_of(keys)))
            .await?;

        debug!(count = keys.len(), removed, "DEL (many)");
        Ok(removed)
    }

    /// EXPIRE in seconds; false if the key is missing
    pub async fn expire(&self, key: &str, seconds: i64) -> StoreResult<bool> {
        self.query(redis::cmd("EXPIRE").arg(self.key(key)).arg(seconds))
            .await
    }

    /// EXPIREAT a UTC instant (second precision)
    pub async fn expire_at(&self, key: &str, at: DateTime<Utc>) -> StoreResult<bool> {
        self.query(
            redis::cmd("EXPIREAT")
                .arg(self.key(key))
                .arg(at.timestamp()),
        )
        .await
    }

    /// PEXPIRE; a non-zero timeout under 1ms is rounded up to 1ms
    pub async fn pexpire(&self, key: &str, timeout: Duration) -> StoreResult<bool> {
        let millis = expiry_millis(timeout)?;
        self.query(redis::cmd("PEXPIRE").arg(self.key(key)).arg(millis))
            .await
    }

    /// PEXPIREAT a UTC instant (millisecond precision)
    pub async fn pexpire_at(&self, key: &str, at: DateTime<Utc>) -> StoreResult<bool> {
        self.query(
            redis::cmd("PEXPIREAT")
                .arg(self.key(key))
                .arg(at.timestamp_millis()),
        )
        .await
    }

    /// Remove the expiry; false if the key is missing or already persistent
    pub async fn persist(&self, key: &str) -> StoreResult<bool> {
        self.query(redis::cmd("PERSIST").arg(self.key(key))).await
    }

    /// Remaining time to live in seconds
    pub async fn ttl(&self, key: &str) -> StoreResult<Ttl> {
        let raw: i64 = self.query(redis::cmd("TTL").arg(self.key(key))).await?;
        Ok(Ttl::from_seconds(raw))
    }

    /// Remaining time to live in milliseconds
    pub async fn pttl(&self, key: &str) -> StoreResult<Ttl> {
        let raw: i64 = self.query(redis::cmd("PTTL").arg(self.key(key))).await?;
        Ok(Ttl::from_millis(raw))
    }

    /// RENAME; errors when `key` does not exist
    pub async fn rename(&self, key: &str, new_key: &str) -> StoreResult<()> {
        self.query::<()>(
            redis::cmd("RENAME")
                .arg(self.key(key))
                .arg(self.key(new_key)),
        )
        .await?;

        debug!(from = %key, to = %new_key, "RENAME");
        Ok(())
    }

    /// RENAMENX; false when `new_key` already exists
    pub async fn rename_nx(&self, key: &str, new_key: &str) -> StoreResult<bool> {
        self.query(
            redis::cmd("RENAMENX")
                .arg(self.key(key))
                .arg(self.key(new_key)),
        )
        .await
    }

    /// TYPE of the value stored at `key`
    pub async fn key_type(&self, key: &str) -> StoreResult<KeyType> {
        let raw: String = self.query(redis::cmd("TYPE").arg(self.key(key))).await?;
        Ok(KeyType::from(raw.as_str()))
    }

    /// KEYS scoped to the namespace; returns logical keys
    pub async fn keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let physical: Vec<String> = self
            .query(redis::cmd("KEYS").arg(self.namespace.pattern(pattern)))
            .await?;
        Ok(self.namespace.to_logical_all(physical))
    }

    /// Serialized value for RESTORE; `None` when the key does not exist
    pub async fn dump(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.query(redis::cmd("DUMP").arg(self.key(key))).await
    }

    /// RESTORE a DUMP payload; `ttl_secs == 0` restores without an expiry
    pub async fn restore(&self, key: &str, ttl_secs: u64, payload: &[u8]) -> StoreResult<()> {
        self.query::<()>(
            redis::cmd("RESTORE")
                .arg(self.key(key))
                .arg(ttl_secs.saturating_mul(1000))
                .arg(payload),
        )
        .await
    }

    /// MOVE to another database index; the key keeps its namespaced name
    pub async fn move_to_db(&self, key: &str, db: i64) -> StoreResult<bool> {
        self.query(redis::cmd("MOVE").arg(self.key(key)).arg(db))
            .await
    }
}

fn expiry_millis(timeout: Duration) -> StoreResult<u64> {
    let millis = u64::try_from(timeout.as_millis()).map_err(|_| {
        StoreError::InvalidArgument(format!("expiry of {:?} is out of range", timeout))
    })?;
    if millis == 0 && !timeout.is_zero() {
        return Ok(1);
    }
    Ok(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_millis_whole_milliseconds() {
        assert_eq!(expiry_millis(Duration::from_secs(2)).unwrap(), 2000);
        assert_eq!(expiry_millis(Duration::from_micros(1500)).unwrap(), 1);
        assert_eq!(expiry_millis(Duration::ZERO).unwrap(), 0);
    }

    #[test]
    fn test_expiry_millis_rounds_sub_millisecond_up() {
        assert_eq!(expiry_millis(Duration::from_micros(10)).unwrap(), 1);
        assert_eq!(expiry_millis(Duration::from_nanos(1)).unwrap(), 1);
    }

    #[test]
    fn test_expiry_millis_rejects_overflow() {
        let err = expiry_millis(Duration::MAX).unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument(_)));
    }
}
