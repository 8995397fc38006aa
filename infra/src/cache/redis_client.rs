//! Redis client wrapper
//!
//! Holds a multiplexed, auto-reconnecting connection and retries commands
//! that fail on transient connection errors.

use std::time::Duration;

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisError, RedisResult, Script};
use tracing::{debug, info, warn};

use crate::cache::CacheConfig;
use crate::InfrastructureError;

/// Attempts per command, including the first
const MAX_ATTEMPTS: u32 = 3;

/// Delay before the first retry; doubled on each further retry
const RETRY_BASE_DELAY_MS: u64 = 50;

/// Deletes KEYS[1] only if it holds ARGV[1]; returns the number of keys removed
const COMPARE_AND_DELETE_LUA: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    return redis.call('DEL', KEYS[1])
end
return 0
"#;

/// Redis client with connection management and retries
#[derive(Clone)]
pub struct RedisClient {
    connection: ConnectionManager,
    config: CacheConfig,
    compare_and_delete: Script,
}

impl RedisClient {
    /// Connect to Redis
    ///
    /// # Errors
    ///
    /// Returns `InfrastructureError::Cache` if the URL is invalid or the
    /// server cannot be reached.
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        info!(url = %mask_url(&config.url), "Connected to Redis");

        Ok(Self {
            connection,
            config,
            compare_and_delete: Script::new(COMPARE_AND_DELETE_LUA),
        })
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Set a value that expires after `seconds`
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        seconds: u64,
    ) -> Result<(), InfrastructureError> {
        self.with_retry("SET", |mut conn| async move {
            redis::cmd("SET")
                .arg(key)
                .arg(value)
                .arg("EX")
                .arg(seconds)
                .query_async::<_, ()>(&mut conn)
                .await
        })
        .await
    }

    /// Get a value
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        self.with_retry("GET", |mut conn| async move { conn.get(key).await })
            .await
    }

    /// Delete a key; returns whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let removed: i64 = self
            .with_retry("DEL", |mut conn| async move { conn.del(key).await })
            .await?;
        Ok(removed > 0)
    }

    /// Atomically delete a key if it holds `expected`
    ///
    /// Not idempotent: a lost reply may hide a successful delete, so only
    /// errors raised before the script reached the server are retried.
    pub async fn delete_if_eq(&self, key: &str, expected: &str) -> Result<bool, InfrastructureError> {
        let script = &self.compare_and_delete;
        let removed: i64 = self
            .with_retry_when(
                "EVALSHA",
                |mut conn| async move {
                    script.key(key).arg(expected).invoke_async(&mut conn).await
                },
                is_unsent_error,
            )
            .await?;
        Ok(removed == 1)
    }

    async fn with_retry<T, F, Fut>(&self, command: &str, operation: F) -> Result<T, InfrastructureError>
    where
        F: Fn(ConnectionManager) -> Fut,
        Fut: std::future::Future<Output = RedisResult<T>>,
    {
        self.with_retry_when(command, operation, is_retriable_error)
            .await
    }

    async fn with_retry_when<T, F, Fut>(
        &self,
        command: &str,
        operation: F,
        retriable: fn(&RedisError) -> bool,
    ) -> Result<T, InfrastructureError>
    where
        F: Fn(ConnectionManager) -> Fut,
        Fut: std::future::Future<Output = RedisResult<T>>,
    {
        let mut attempt = 1;
        let mut delay = Duration::from_millis(RETRY_BASE_DELAY_MS);

        loop {
            match operation(self.connection.clone()).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < MAX_ATTEMPTS && retriable(&e) => {
                    warn!(
                        command = command,
                        attempt = attempt,
                        error = %e,
                        "Redis command failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
                Err(e) => {
                    debug!(command = command, error = %e, "Redis command failed");
                    return Err(e.into());
                }
            }
        }
    }
}

/// Whether an error is worth retrying on a fresh attempt
pub fn is_retriable_error(err: &RedisError) -> bool {
    err.is_io_error() || err.is_connection_dropped() || err.is_connection_refusal() || err.is_timeout()
}

/// Whether a command failed before reaching the server
pub fn is_unsent_error(err: &RedisError) -> bool {
    err.is_connection_refusal()
}

/// Hide credentials in a Redis URL
pub fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://****{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}
