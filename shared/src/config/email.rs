//! Email dispatcher configuration

use serde::{Deserialize, Serialize};

/// Email dispatcher settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Dispatcher provider ("http", "mock")
    pub provider: String,

    /// Base URL of the transactional email API
    #[serde(default)]
    pub api_url: String,

    /// Server token sent with every API request
    #[serde(default)]
    pub api_token: String,

    /// Sender address
    #[serde(default = "default_sender")]
    pub sender: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            api_url: String::new(),
            api_token: String::new(),
            sender: default_sender(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl EmailConfig {
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
            provider: lookup("EMAIL_PROVIDER").unwrap_or(defaults.provider),
            api_url: lookup("EMAIL_API_URL").unwrap_or(defaults.api_url),
            api_token: lookup("EMAIL_API_TOKEN").unwrap_or(defaults.api_token),
            sender: lookup("EMAIL_SENDER").unwrap_or(defaults.sender),
            timeout_seconds: lookup("EMAIL_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_seconds),
        }
    }
}

fn default_sender() -> String {
    String::from("no-reply@localhost")
}

fn default_timeout() -> u64 {
    10
}
