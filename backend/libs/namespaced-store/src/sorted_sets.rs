//! Sorted-set commands

use crate::{NamespacedStore, RangeBy, ScoredMember, StoreResult};
use redis::ToRedisArgs;

impl NamespacedStore {
    /// ZADD `(member, score)` pairs; returns how many members were newly added
    pub async fn zadd<M>(&self, key: &str, members: &[(M, f64)]) -> StoreResult<u64>
    where
        M: ToRedisArgs + Send + Sync,
    {
        if members.is_empty() {
            return Ok(0);
        }

        let mut cmd = redis::cmd("ZADD");
        cmd.arg(self.key(key));
        for (member, score) in members {
            cmd.arg(*score).arg(member);
        }
        self.query(&cmd).await
    }

    /// Number of members, 0 for a missing key
    pub async fn zcard(&self, key: &str) -> StoreResult<u64> {
        self.query(redis::cmd("ZCARD").arg(self.key(key))).await
    }

    /// ZCOUNT over a score interval in Redis syntax (`-inf`, `(1`, ...)
    pub async fn zcount(&self, key: &str, min: &str, max: &str) -> StoreResult<u64> {
        self.query(
            redis::cmd("ZCOUNT")
                .arg(self.key(key))
                .arg(min)
                .arg(max),
        )
        .await
    }

    /// ZINCRBY; returns the member's new score
    pub async fn zincr_by(&self, key: &str, increment: f64, member: &str) -> StoreResult<f64> {
        self.query(
            redis::cmd("ZINCRBY")
                .arg(self.key(key))
                .arg(increment)
                .arg(member),
        )
        .await
    }

    /// Members by rank, ascending score with lexicographic tie-break
    pub async fn zrange(&self, key: &str, start: i64, stop: i64) -> StoreResult<Vec<String>> {
        self.query(
            redis::cmd("ZRANGE")
                .arg(self.key(key))
                .arg(start)
                .arg(stop),
        )
        .await
    }

    /// Members by rank, descending score
    pub async fn zrevrange(&self, key: &str, start: i64, stop: i64) -> StoreResult<Vec<String>> {
        self.query(
            redis::cmd("ZREVRANGE")
                .arg(self.key(key))
                .arg(start)
                .arg(stop),
        )
        .await
    }

    /// Members by rank, descending, with their scores
    pub async fn zrevrange_with_scores(
        &self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> StoreResult<Vec<ScoredMember>> {
        let pairs: Vec<(String, f64)> = self
            .query(
                redis::cmd("ZREVRANGE")
                    .arg(self.key(key))
                    .arg(start)
                    .arg(stop)
                    .arg("WITHSCORES"),
            )
            .await?;
        Ok(pairs.into_iter().map(ScoredMember::from).collect())
    }

    /// ZRANGEBYSCORE over `range`
    pub async fn zrange_by_score(&self, key: &str, range: &RangeBy) -> StoreResult<Vec<String>> {
        let mut cmd = redis::cmd("ZRANGEBYSCORE");
        cmd.arg(self.key(key));
        range.append_to(&mut cmd, false, false);
        self.query(&cmd).await
    }

    /// ZREVRANGEBYSCORE; `range.max` comes first on the wire
    pub async fn zrevrange_by_score(&self, key: &str, range: &RangeBy) -> StoreResult<Vec<String>> {
        let mut cmd = redis::cmd("ZREVRANGEBYSCORE");
        cmd.arg(self.key(key));
        range.append_to(&mut cmd, true, false);
        self.query(&cmd).await
    }

    /// ZREVRANGEBYSCORE with scores
    pub async fn zrevrange_by_score_with_scores(
        &self,
        key: &str,
        range: &RangeBy,
    ) -> StoreResult<Vec<ScoredMember>> {
        let mut cmd = redis::cmd("ZREVRANGEBYSCORE");
        cmd.arg(self.key(key));
        range.append_to(&mut cmd, true, true);
        let pairs: Vec<(String, f64)> = self.query(&cmd).await?;
        Ok(pairs.into_iter().map(ScoredMember::from).collect())
    }

    /// ZREVRANGEBYLEX; meaningful when all members share one score
    pub async fn zrevrange_by_lex(&self, key: &str, range: &RangeBy) -> StoreResult<Vec<String>> {
        let mut cmd = redis::cmd("ZREVRANGEBYLEX");
        cmd.arg(self.key(key));
        range.append_to(&mut cmd, true, false);
        self.query(&cmd).await
    }

    /// Ascending rank of `member`, `None` if absent
    pub async fn zrank(&self, key: &str, member: &str) -> StoreResult<Option<u64>> {
        self.query(redis::cmd("ZRANK").arg(self.key(key)).arg(member))
            .await
    }

    /// Descending rank of `member`, `None` if absent
    pub async fn zrevrank(&self, key: &str, member: &str) -> StoreResult<Option<u64>> {
        self.query(redis::cmd("ZREVRANK").arg(self.key(key)).arg(member))
            .await
    }

    /// Score of `member`, `None` if absent
    pub async fn zscore(&self, key: &str, member: &str) -> StoreResult<Option<f64>> {
        self.query(redis::cmd("ZSCORE").arg(self.key(key)).arg(member))
            .await
    }

    /// ZREM; returns how many members were removed
    pub async fn zrem<M>(&self, key: &str, members: &[M]) -> StoreResult<u64>
    where
        M: ToRedisArgs + Send + Sync,
    {
        if members.is_empty() {
            return Ok(0);
        }
        self.query(redis::cmd("ZREM").arg(self.key(key)).arg(members))
            .await
    }

    /// Remove members ranked `start..=stop`; returns how many went
    pub async fn zrem_range_by_rank(&self, key: &str, start: i64, stop: i64) -> StoreResult<u64> {
        self.query(
            redis::cmd("ZREMRANGEBYRANK")
                .arg(self.key(key))
                .arg(start)
                .arg(stop),
        )
        .await
    }

    /// Remove members scored within `min..=max`
    pub async fn zrem_range_by_score(&self, key: &str, min: &str, max: &str) -> StoreResult<u64> {
        self.query(
            redis::cmd("ZREMRANGEBYSCORE")
                .arg(self.key(key))
                .arg(min)
                .arg(max),
        )
        .await
    }
}
