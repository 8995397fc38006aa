//! Shared utilities and common types for the verify-email-by-code workspace
//!
//! This crate provides functionality used by both the core and infra crates:
//! - Configuration types loaded from the environment
//! - Tracing subscriber initialisation
//! - Utility functions (email masking, blank checks)

pub mod config;
pub mod telemetry;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, EmailConfig, Environment, LogFormat, LoggingConfig,
    VerificationConfig,
};
pub use utils::{email, validation};
