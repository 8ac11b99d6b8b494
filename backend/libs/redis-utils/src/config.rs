//! Redis connection configuration
//!
//! Loads connection parameters and the key namespace from environment
//! variables. A full `REDIS_URL` takes precedence over the individual
//! address/port/database/password variables. The object cache may live on
//! its own database index (`REDIS_CACHE_DATABASE`).

use crate::env_utils::{parse_env_optional, parse_env_with_default};
use anyhow::{Context, Result};
use redis::{ConnectionAddr, ConnectionInfo, IntoConnectionInfo, RedisConnectionInfo};
use std::fmt;

/// Connection parameters supplied once at process startup
#[derive(Clone)]
pub struct RedisConfig {
    /// Full connection URL; overrides address/port/database/password when set
    pub url: Option<String>,
    /// Redis host name or IP
    pub address: String,
    /// Redis TCP port
    pub port: u16,
    /// Logical database index
    pub database: i64,
    /// AUTH password
    pub password: Option<String>,
    /// Database index for the object cache; defaults to the command database
    pub cache_database: Option<i64>,
    /// Key namespace; empty means keys are sent unprefixed
    pub namespace: String,
    /// Timeout for the initial connection and PING
    pub connect_timeout_secs: u64,
}

impl fmt::Debug for RedisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisConfig")
            .field("url", &self.url.as_ref().map(|_| "[REDACTED]"))
            .field("address", &self.address)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("cache_database", &self.cache_database)
            .field("namespace", &self.namespace)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: None,
            address: String::from("127.0.0.1"),
            port: 6379,
            database: 0,
            password: None,
            cache_database: None,
            namespace: String::new(),
            connect_timeout_secs: 5,
        }
    }
}

impl RedisConfig {
    /// Load configuration from environment variables
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `REDIS_URL` | unset |
    /// | `REDIS_ADDRESS` | `127.0.0.1` |
    /// | `REDIS_PORT` | `6379` |
    /// | `REDIS_DATABASE` | `0` |
    /// | `REDIS_PASSWORD` | unset |
    /// | `REDIS_CACHE_DATABASE` | unset (same as the command database) |
    /// | `REDIS_NAMESPACE` | empty |
    /// | `REDIS_CONNECT_TIMEOUT_SECS` | `5` |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            url: parse_env_optional("REDIS_URL"),
            address: parse_env_with_default("REDIS_ADDRESS", defaults.address),
            port: parse_env_with_default("REDIS_PORT", defaults.port),
            database: parse_env_with_default("REDIS_DATABASE", defaults.database),
            password: parse_env_optional("REDIS_PASSWORD"),
            cache_database: parse_env_optional("REDIS_CACHE_DATABASE"),
            namespace: parse_env_with_default("REDIS_NAMESPACE", defaults.namespace),
            connect_timeout_secs: parse_env_with_default(
                "REDIS_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            ),
        }
    }

    /// Build the connection info handed to `redis::Client::open`
    pub fn connection_info(&self) -> Result<ConnectionInfo> {
        if let Some(url) = &self.url {
            return url
                .as_str()
                .into_connection_info()
                .context("failed to parse REDIS_URL connection string");
        }

        Ok(ConnectionInfo {
            addr: ConnectionAddr::Tcp(self.address.clone(), self.port),
            redis: RedisConnectionInfo {
                db: self.database,
                password: self.password.clone(),
                ..Default::default()
            },
        })
    }

    /// Connection info for the object cache database
    pub fn cache_connection_info(&self) -> Result<ConnectionInfo> {
        let mut info = self.connection_info()?;
        if let Some(db) = self.cache_database {
            info.redis.db = db;
        }
        Ok(info)
    }

    /// Connection URL in `redis://[:password@]host:port/db` form.
    ///
    /// Returns `REDIS_URL` verbatim when set. The password is percent-encoded.
    pub fn connection_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        let auth = match &self.password {
            Some(password) => format!(":{}@", urlencoding::encode(password)),
            None => String::new(),
        };
        format!(
            "redis://{}{}:{}/{}",
            auth, self.address, self.port, self.database
        )
    }

    /// Host/port/db label safe to log (never includes credentials)
    pub fn endpoint_label(&self) -> String {
        match self.connection_info() {
            Ok(info) => describe_endpoint(&info),
            Err(_) => String::from("<invalid REDIS_URL>"),
        }
    }
}

/// `host:port/db` label for `info`, without credentials
pub fn describe_endpoint(info: &ConnectionInfo) -> String {
    let addr = match &info.addr {
        ConnectionAddr::Tcp(host, port) => format!("{}:{}", host, port),
        ConnectionAddr::TcpTls { host, port, .. } => format!("{}:{} (tls)", host, port),
        ConnectionAddr::Unix(path) => path.display().to_string(),
    };
    format!("{}/{}", addr, info.redis.db)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_env() {
        for key in [
            "REDIS_URL",
            "REDIS_ADDRESS",
            "REDIS_PORT",
            "REDIS_DATABASE",
            "REDIS_PASSWORD",
            "REDIS_CACHE_DATABASE",
            "REDIS_NAMESPACE",
            "REDIS_CONNECT_TIMEOUT_SECS",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_defaults() {
        clear_env();

        let config = RedisConfig::from_env();
        assert_eq!(config.url, None);
        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.port, 6379);
        assert_eq!(config.database, 0);
        assert_eq!(config.password, None);
        assert_eq!(config.namespace, "");
        assert_eq!(config.cache_database, None);
        assert_eq!(config.connect_timeout_secs, 5);
        assert_eq!(config.connection_url(), "redis://127.0.0.1:6379/0");
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("REDIS_ADDRESS", "cache.internal");
        std::env::set_var("REDIS_PORT", "6380");
        std::env::set_var("REDIS_DATABASE", "4");
        std::env::set_var("REDIS_PASSWORD", "s3cret");
        std::env::set_var("REDIS_NAMESPACE", "shop");
        std::env::set_var("REDIS_CACHE_DATABASE", "5");

        let config = RedisConfig::from_env();
        assert_eq!(config.address, "cache.internal");
        assert_eq!(config.port, 6380);
        assert_eq!(config.database, 4);
        assert_eq!(config.password.as_deref(), Some("s3cret"));
        assert_eq!(config.namespace, "shop");

        let info = config.connection_info().unwrap();
        assert_eq!(info.redis.db, 4);
        assert_eq!(info.redis.password.as_deref(), Some("s3cret"));
        assert_eq!(config.endpoint_label(), "cache.internal:6380/4");

        assert_eq!(config.cache_database, Some(5));
        let cache_info = config.cache_connection_info().unwrap();
        assert_eq!(cache_info.redis.db, 5);
        assert_eq!(describe_endpoint(&cache_info), "cache.internal:6380/5");

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_url_takes_precedence() {
        clear_env();
        std::env::set_var("REDIS_URL", "redis://10.0.0.7:7000/2");
        std::env::set_var("REDIS_ADDRESS", "ignored.host");

        let config = RedisConfig::from_env();
        let info = config.connection_info().unwrap();
        assert_eq!(info.redis.db, 2);
        assert_eq!(config.endpoint_label(), "10.0.0.7:7000/2");
        assert_eq!(config.connection_url(), "redis://10.0.0.7:7000/2");

        clear_env();
    }

    #[test]
    fn test_invalid_url_is_an_error() {
        let config = RedisConfig {
            url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(config.connection_info().is_err());
        assert_eq!(config.endpoint_label(), "<invalid REDIS_URL>");
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let config = RedisConfig {
            url: Some("redis://:hunter2@localhost:6379/0".to_string()),
            password: Some("hunter2".to_string()),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_connection_url_encodes_password() {
        let config = RedisConfig {
            address: "cache.internal".to_string(),
            port: 6380,
            database: 3,
            password: Some("p@ss:word/1".to_string()),
            ..Default::default()
        };
        let url = config.connection_url();
        assert_eq!(url, "redis://:p%40ss%3Aword%2F1@cache.internal:6380/3");

        let info = url.as_str().into_connection_info().unwrap();
        assert_eq!(info.redis.db, 3);
        assert_eq!(info.redis.password.as_deref(), Some("p@ss:word/1"));
    }

    #[test]
    fn test_cache_database_defaults_to_command_database() {
        let config = RedisConfig {
            database: 2,
            ..Default::default()
        };
        assert_eq!(config.cache_connection_info().unwrap().redis.db, 2);
    }
}
