//! Error types for configuration and email delivery

use thiserror::Error;

/// Rejected verification code configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid code length: {length} (must be greater than zero)")]
    InvalidCodeLength { length: usize },

    #[error("Code alphabet must contain at least one symbol")]
    EmptyAlphabet,
}

/// Failure reported by an email dispatcher.
///
/// Always recovered by the verification flow: the challenge is still
/// rendered and the failure is surfaced as an `email_send_failed` event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailDeliveryError {
    #[error("Email transport failure: {0}")]
    Transport(String),

    #[error("Email rejected by provider (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),
}
