//! Redis connection bootstrap shared by the store crates
//!
//! Parses [`RedisConfig`], opens a `redis::Client` plus a multiplexed
//! [`ConnectionManager`], and verifies the server with a PING before the
//! process starts serving.

mod config;
pub mod env_utils;

pub use config::{describe_endpoint, RedisConfig};

use anyhow::{anyhow, Context, Result};
use redis::aio::ConnectionManager;
use redis::{Client, ConnectionInfo};
use tokio::time::{timeout, Duration};
use tracing::{info, warn};

/// Connected Redis handles built from a [`RedisConfig`].
///
/// `ConnectionManager` is cheap to clone and multiplexes requests from many
/// tasks over one socket; the raw `Client` stays available for callers that
/// need a dedicated connection (blocking commands).
#[derive(Clone)]
pub struct RedisPool {
    client: Client,
    manager: ConnectionManager,
}

impl RedisPool {
    /// Connect to the command database
    pub async fn connect(config: &RedisConfig) -> Result<Self> {
        Self::open(config, config.connection_info()?).await
    }

    /// Connect to the object cache database (`cache_database`, falling back
    /// to the command database)
    pub async fn connect_cache(config: &RedisConfig) -> Result<Self> {
        Self::open(config, config.cache_connection_info()?).await
    }

    async fn open(config: &RedisConfig, info: ConnectionInfo) -> Result<Self> {
        let label = describe_endpoint(&info);
        let connect_timeout = Duration::from_secs(config.connect_timeout_secs.max(1));

        let client = Client::open(info).context("failed to construct Redis client")?;

        let mut manager = timeout(connect_timeout, ConnectionManager::new(client.clone()))
            .await
            .map_err(|_| anyhow!("timed out connecting to Redis at {}", label))?
            .context("failed to initialize Redis connection manager")?;

        let pong: String = timeout(
            connect_timeout,
            redis::cmd("PING").query_async::<_, String>(&mut manager),
        )
        .await
        .map_err(|_| anyhow!("timed out waiting for Redis PING at {}", label))?
        .context("failed to ping Redis during startup")?;

        if pong != "PONG" {
            warn!(endpoint = %label, reply = %pong, "Unexpected PING reply from Redis");
        }

        info!(endpoint = %label, "Redis connection established");

        Ok(Self { client, manager })
    }

    /// Shared multiplexed connection
    pub fn manager(&self) -> ConnectionManager {
        self.manager.clone()
    }

    pub fn client(&self) -> Client {
        self.client.clone()
    }
}
