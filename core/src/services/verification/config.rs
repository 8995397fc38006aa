//! Validated configuration for the verification flow

use emailcode_shared::config::verification::{DEFAULT_CODE_LENGTH, DEFAULT_CODE_SYMBOLS};
use emailcode_shared::VerificationConfig;

use crate::errors::ConfigError;

/// Code length and alphabet, checked once at startup.
///
/// Immutable after construction; the alphabet is kept both as configured
/// and split into symbols for generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCodeConfig {
    code_length: usize,
    code_symbols: String,
    alphabet: Vec<char>,
}

impl VerificationCodeConfig {
    /// Create a configuration
    ///
    /// # Errors
    ///
    /// * `ConfigError::InvalidCodeLength` - if `code_length` is zero
    /// * `ConfigError::EmptyAlphabet` - if `code_symbols` is empty
    pub fn new(code_length: usize, code_symbols: impl Into<String>) -> Result<Self, ConfigError> {
        let code_symbols = code_symbols.into();
        if code_length == 0 {
            return Err(ConfigError::InvalidCodeLength {
                length: code_length,
            });
        }
        if code_symbols.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }

        let alphabet = code_symbols.chars().collect();
        Ok(Self {
            code_length,
            code_symbols,
            alphabet,
        })
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// The alphabet exactly as configured
    pub fn code_symbols(&self) -> &str {
        &self.code_symbols
    }

    /// Symbols codes are drawn from; repeated symbols weigh the draw
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }
}

impl Default for VerificationCodeConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            code_symbols: DEFAULT_CODE_SYMBOLS.to_string(),
            alphabet: DEFAULT_CODE_SYMBOLS.chars().collect(),
        }
    }
}

impl TryFrom<&VerificationConfig> for VerificationCodeConfig {
    type Error = ConfigError;

    fn try_from(config: &VerificationConfig) -> Result<Self, Self::Error> {
        Self::new(config.code_length, config.code_symbols.clone())
    }
}

impl TryFrom<VerificationConfig> for VerificationCodeConfig {
    type Error = ConfigError;

    fn try_from(config: VerificationConfig) -> Result<Self, Self::Error> {
        Self::new(config.code_length, config.code_symbols)
    }
}
