//! Note store trait for string values scoped to one authentication attempt.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainError;

/// Per-attempt key/value notes held by the host's authentication session
///
/// Notes disappear with the session; expiring them is the implementation's
/// responsibility.
#[async_trait]
pub trait AuthNoteStore: Send + Sync {
    /// Read a note
    async fn get_note(&self, attempt_id: Uuid, key: &str) -> Result<Option<String>, DomainError>;

    /// Write a note, replacing any previous value
    async fn set_note(&self, attempt_id: Uuid, key: &str, value: &str) -> Result<(), DomainError>;

    /// Remove a note; removing a missing note is not an error
    async fn remove_note(&self, attempt_id: Uuid, key: &str) -> Result<(), DomainError>;

    /// Remove a note only if it currently holds `expected`.
    ///
    /// Returns whether the note was removed. Implementations shared between
    /// concurrent requests must override this with an atomic
    /// compare-and-clear; the default is a plain read followed by a remove.
    async fn remove_note_if_eq(
        &self,
        attempt_id: Uuid,
        key: &str,
        expected: &str,
    ) -> Result<bool, DomainError> {
        match self.get_note(attempt_id, key).await? {
            Some(current) if current == expected => {
                self.remove_note(attempt_id, key).await?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
