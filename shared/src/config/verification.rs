//! Verification code configuration
//!
//! Read once at startup and handed to the verification flow, which
//! validates it. Keys mirror the provider configuration names
//! `code-length` and `code-symbols`.

use serde::{Deserialize, Serialize};

/// Configuration key for the code length
pub const CONFIG_CODE_LENGTH: &str = "code-length";

/// Configuration key for the code alphabet
pub const CONFIG_CODE_SYMBOLS: &str = "code-symbols";

/// Default number of characters in a generated code
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Full alphanumeric alphabet used when no symbols are configured
pub const DEFAULT_CODE_SYMBOLS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Raw verification code settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Number of characters in each generated code
    #[serde(rename = "code-length", default = "default_code_length")]
    pub code_length: usize,

    /// Characters codes are drawn from
    #[serde(rename = "code-symbols", default = "default_code_symbols")]
    pub code_symbols: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            code_symbols: default_code_symbols(),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup.
    ///
    /// `VERIFY_EMAIL_CODE_LENGTH` and `VERIFY_EMAIL_CODE_SYMBOLS` override the
    /// defaults independently. An unparsable length falls back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let code_length = lookup("VERIFY_EMAIL_CODE_LENGTH")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.code_length);
        let code_symbols = lookup("VERIFY_EMAIL_CODE_SYMBOLS").unwrap_or(defaults.code_symbols);

        Self {
            code_length,
            code_symbols,
        }
    }

    /// Override the code length
    pub fn with_code_length(mut self, code_length: usize) -> Self {
        self.code_length = code_length;
        self
    }

    /// Override the code alphabet
    pub fn with_code_symbols(mut self, code_symbols: impl Into<String>) -> Self {
        self.code_symbols = code_symbols.into();
        self
    }
}

fn default_code_length() -> usize {
    DEFAULT_CODE_LENGTH
}

fn default_code_symbols() -> String {
    DEFAULT_CODE_SYMBOLS.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VerificationConfig::default();
        assert_eq!(config.code_length, 8);
        assert!(config.code_symbols.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(config.code_symbols.len(), 62);
    }

    #[test]
    fn test_overrides_are_independent() {
        let only_length = VerificationConfig::from_lookup(|key| match key {
            "VERIFY_EMAIL_CODE_LENGTH" => Some("6".to_string()),
            _ => None,
        });
        assert_eq!(only_length.code_length, 6);
        assert_eq!(only_length.code_symbols, DEFAULT_CODE_SYMBOLS);

        let only_symbols = VerificationConfig::from_lookup(|key| match key {
            "VERIFY_EMAIL_CODE_SYMBOLS" => Some("0123456789".to_string()),
            _ => None,
        });
        assert_eq!(only_symbols.code_length, DEFAULT_CODE_LENGTH);
        assert_eq!(only_symbols.code_symbols, "0123456789");
    }

    #[test]
    fn test_unparsable_length_falls_back() {
        let config = VerificationConfig::from_lookup(|key| match key {
            "VERIFY_EMAIL_CODE_LENGTH" => Some("eight".to_string()),
            _ => None,
        });
        assert_eq!(config.code_length, DEFAULT_CODE_LENGTH);
    }
}
