//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Redis configuration for the attempt-note store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Lifetime of an attempt note in seconds; stands in for the
    /// authentication session expiry
    #[serde(default = "default_note_ttl")]
    pub note_ttl: u64,

    /// Optional prefix for all cache keys
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            note_ttl: default_note_ttl(),
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            url: lookup("REDIS_URL").unwrap_or(defaults.url),
            note_ttl: lookup("AUTH_NOTE_TTL_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.note_ttl),
            key_prefix: lookup("REDIS_KEY_PREFIX").filter(|p| !p.is_empty()),
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn default_note_ttl() -> u64 {
    1800 // 30 minutes, a typical login session lifespan
}
