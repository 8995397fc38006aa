//! Verification code entity for email-based identity confirmation.

use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};

/// Name of the required action, and the attempt-note key holding the
/// outstanding code
pub const VERIFY_EMAIL_CODE: &str = "VERIFY_EMAIL_CODE";

/// Form field carrying the code submitted by the user
pub const EMAIL_CODE_FIELD: &str = "email_code";

/// A single-use verification code.
///
/// The `Debug` output never includes the code itself.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Generate a code from the operating system CSPRNG
    ///
    /// # Arguments
    ///
    /// * `length` - Number of characters to draw
    /// * `alphabet` - Symbols to draw from, uniformly and with replacement
    ///
    /// # Panics
    ///
    /// Panics if `alphabet` is empty and `length` is not zero. A validated
    /// `VerificationCodeConfig` never carries an empty alphabet.
    pub fn generate(length: usize, alphabet: &[char]) -> Self {
        Self::generate_with(&mut OsRng, length, alphabet)
    }

    /// Generate a code from the given cryptographically strong source
    ///
    /// # Panics
    ///
    /// Same precondition as [`VerificationCode::generate`].
    pub fn generate_with<R>(rng: &mut R, length: usize, alphabet: &[char]) -> Self
    where
        R: Rng + CryptoRng + ?Sized,
    {
        assert!(
            length == 0 || !alphabet.is_empty(),
            "cannot draw a verification code from an empty alphabet"
        );
        let code = (0..length)
            .filter_map(|_| alphabet.choose(rng))
            .collect::<String>();
        Self(code)
    }

    /// The code as sent to the user and stored in the attempt note
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters in the code
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact, case-sensitive comparison in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        codes_match(&self.0, submitted)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for VerificationCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl std::fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("VerificationCode").field(&"***").finish()
    }
}

/// Exact byte comparison that does not short-circuit on the first mismatch
pub fn codes_match(stored: &str, submitted: &str) -> bool {
    constant_time_eq(stored.as_bytes(), submitted.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ALPHANUM: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    #[test]
    fn test_generated_code_has_requested_length_and_alphabet() {
        let alphabet: Vec<char> = ALPHANUM.chars().collect();
        for length in [1, 6, 8, 32] {
            for _ in 0..50 {
                let code = VerificationCode::generate(length, &alphabet);
                assert_eq!(code.len(), length);
                assert!(code.as_str().chars().all(|c| alphabet.contains(&c)));
            }
        }
    }

    #[test]
    fn test_single_symbol_alphabet() {
        let code = VerificationCode::generate(5, &['7']);
        assert_eq!(code.as_str(), "77777");
    }

    #[test]
    #[should_panic(expected = "empty alphabet")]
    fn test_empty_alphabet_is_rejected() {
        VerificationCode::generate(8, &[]);
    }

    #[test]
    fn test_non_ascii_alphabet() {
        let alphabet = ['é', 'ß', 'ø'];
        let code = VerificationCode::generate(12, &alphabet);
        assert_eq!(code.len(), 12);
        assert!(code.as_str().chars().all(|c| alphabet.contains(&c)));
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let alphabet: Vec<char> = ALPHANUM.chars().collect();
        let a = VerificationCode::generate_with(&mut StdRng::seed_from_u64(7), 8, &alphabet);
        let b = VerificationCode::generate_with(&mut StdRng::seed_from_u64(7), 8, &alphabet);
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_symbol_is_reachable() {
        let alphabet = ['a', 'b', 'c', 'd'];
        let code = VerificationCode::generate(400, &alphabet);
        for symbol in alphabet {
            assert!(code.as_str().contains(symbol));
        }
    }

    #[test]
    fn test_matches_is_exact_and_case_sensitive() {
        let code = VerificationCode::from("ABC123".to_string());
        assert!(code.matches("ABC123"));
        assert!(!code.matches("abc123"));
        assert!(!code.matches("ABC1234"));
        assert!(!code.matches(" ABC123"));
        assert!(!code.matches(""));
    }

    #[test]
    fn test_debug_is_redacted() {
        let code = VerificationCode::from("SECRET99".to_string());
        assert!(!format!("{:?}", code).contains("SECRET99"));
    }
}
