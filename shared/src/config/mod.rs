//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Redis configuration for the attempt-note store
//! - `email` - Email dispatcher provider settings
//! - `environment` - Environment detection and logging configuration
//! - `verification` - Verification code length and alphabet

pub mod cache;
pub mod email;
pub mod environment;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::CacheConfig;
pub use email::EmailConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Verification code configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Attempt-note cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Email dispatcher configuration
    #[serde(default)]
    pub email: EmailConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_lookup(&lookup);
        Self {
            environment,
            logging: LoggingConfig::from_lookup(environment, &lookup),
            verification: VerificationConfig::from_lookup(&lookup),
            cache: CacheConfig::from_lookup(&lookup),
            email: EmailConfig::from_lookup(&lookup),
        }
    }
}
