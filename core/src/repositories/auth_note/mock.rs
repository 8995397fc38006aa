//! Mock implementation of AuthNoteStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::DomainError;

use super::AuthNoteStore;

/// In-memory note store; compare-and-clear runs under one write lock
#[derive(Clone, Default)]
pub struct MockAuthNoteStore {
    notes: Arc<RwLock<HashMap<(Uuid, String), String>>>,
    writes: Arc<AtomicUsize>,
    should_fail: Arc<AtomicBool>,
}

impl MockAuthNoteStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a note
    pub async fn note(&self, attempt_id: Uuid, key: &str) -> Option<String> {
        self.notes
            .read()
            .await
            .get(&(attempt_id, key.to_string()))
            .cloned()
    }

    /// Number of `set_note` calls so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "Mock note store error".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AuthNoteStore for MockAuthNoteStore {
    async fn get_note(&self, attempt_id: Uuid, key: &str) -> Result<Option<String>, DomainError> {
        self.check_failure()?;
        Ok(self.note(attempt_id, key).await)
    }

    async fn set_note(&self, attempt_id: Uuid, key: &str, value: &str) -> Result<(), DomainError> {
        self.check_failure()?;
        self.notes
            .write()
            .await
            .insert((attempt_id, key.to_string()), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove_note(&self, attempt_id: Uuid, key: &str) -> Result<(), DomainError> {
        self.check_failure()?;
        self.notes.write().await.remove(&(attempt_id, key.to_string()));
        Ok(())
    }

    async fn remove_note_if_eq(
        &self,
        attempt_id: Uuid,
        key: &str,
        expected: &str,
    ) -> Result<bool, DomainError> {
        self.check_failure()?;
        let mut notes = self.notes.write().await;
        let slot = (attempt_id, key.to_string());
        if notes.get(&slot).map(String::as_str) == Some(expected) {
            notes.remove(&slot);
            return Ok(true);
        }
        Ok(false)
    }
}
