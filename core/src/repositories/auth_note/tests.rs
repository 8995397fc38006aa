//! Unit tests for the note store contract

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::errors::DomainError;
use crate::repositories::auth_note::{AuthNoteStore, MockAuthNoteStore};

#[tokio::test]
async fn test_set_overwrites_and_remove_clears() {
    let store = MockAuthNoteStore::new();
    let attempt = Uuid::new_v4();

    store.set_note(attempt, "VERIFY_EMAIL_CODE", "first").await.unwrap();
    store.set_note(attempt, "VERIFY_EMAIL_CODE", "second").await.unwrap();
    assert_eq!(
        store.get_note(attempt, "VERIFY_EMAIL_CODE").await.unwrap().as_deref(),
        Some("second")
    );

    store.remove_note(attempt, "VERIFY_EMAIL_CODE").await.unwrap();
    assert!(store.get_note(attempt, "VERIFY_EMAIL_CODE").await.unwrap().is_none());
    // Removing twice is fine
    store.remove_note(attempt, "VERIFY_EMAIL_CODE").await.unwrap();
}

#[tokio::test]
async fn test_notes_are_scoped_per_attempt() {
    let store = MockAuthNoteStore::new();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();

    store.set_note(a, "k", "for-a").await.unwrap();
    assert!(store.get_note(b, "k").await.unwrap().is_none());
}

#[tokio::test]
async fn test_remove_if_eq() {
    let store = MockAuthNoteStore::new();
    let attempt = Uuid::new_v4();
    store.set_note(attempt, "k", "ABC123").await.unwrap();

    assert!(!store.remove_note_if_eq(attempt, "k", "abc123").await.unwrap());
    assert!(store.note(attempt, "k").await.is_some());

    assert!(store.remove_note_if_eq(attempt, "k", "ABC123").await.unwrap());
    assert!(!store.remove_note_if_eq(attempt, "k", "ABC123").await.unwrap());
}

/// Store relying on the trait's default compare-and-clear
struct PlainStore {
    notes: Mutex<HashMap<(Uuid, String), String>>,
}

#[async_trait]
impl AuthNoteStore for PlainStore {
    async fn get_note(&self, attempt_id: Uuid, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.notes.lock().unwrap().get(&(attempt_id, key.to_string())).cloned())
    }

    async fn set_note(&self, attempt_id: Uuid, key: &str, value: &str) -> Result<(), DomainError> {
        self.notes
            .lock()
            .unwrap()
            .insert((attempt_id, key.to_string()), value.to_string());
        Ok(())
    }

    async fn remove_note(&self, attempt_id: Uuid, key: &str) -> Result<(), DomainError> {
        self.notes.lock().unwrap().remove(&(attempt_id, key.to_string()));
        Ok(())
    }
}

#[tokio::test]
async fn test_default_remove_if_eq() {
    let store = PlainStore {
        notes: Mutex::new(HashMap::new()),
    };
    let attempt = Uuid::new_v4();
    store.set_note(attempt, "k", "v").await.unwrap();

    assert!(!store.remove_note_if_eq(attempt, "k", "w").await.unwrap());
    assert!(store.remove_note_if_eq(attempt, "k", "v").await.unwrap());
    assert!(store.get_note(attempt, "k").await.unwrap().is_none());
}
