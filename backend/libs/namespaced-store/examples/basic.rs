//! Minimal walkthrough of the namespaced store
//!
//! Reads connection settings from REDIS_* environment variables:
//!
//! ```text
//! REDIS_NAMESPACE=demo RUST_LOG=debug cargo run -p namespaced-store --example basic
//! ```

use namespaced_store::{NamespacedStore, RangeBy};
use redis_utils::RedisConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = RedisConfig::from_env();
    info!(config = ?config, "Connecting");

    let store = NamespacedStore::connect(&config).await?;

    store.set("greeting", "hello", 60).await?;
    let greeting = store.get("greeting").await?;
    info!(greeting = ?greeting, ttl = ?store.ttl("greeting").await?, "String round trip");

    let visits = store.incr("visits").await?;
    info!(visits, "Counter bumped");

    store
        .zadd("leaderboard", &[("alice", 30.0), ("bob", 12.0), ("carol", 45.0)])
        .await?;
    let podium = store
        .zrevrange_by_score_with_scores("leaderboard", &RangeBy::all_scores().limit(0, 3))
        .await?;
    for (rank, entry) in podium.iter().enumerate() {
        info!(rank = rank + 1, member = %entry.member, score = entry.score, "Leaderboard");
    }

    let keys = store.keys("*").await?;
    info!(namespace = %store.namespace(), keys = ?keys, "Keys in namespace");

    store.del_many(&["greeting", "visits", "leaderboard"]).await?;
    Ok(())
}
