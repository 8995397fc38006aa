//! Expiring in-memory attempt-note store for single-process deployments

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use emailcode_core::errors::DomainError;
use emailcode_core::repositories::AuthNoteStore;

/// Longest note lifetime accepted; larger TTLs are clamped
const MAX_TTL_SECONDS: i64 = 60 * 60 * 24 * 365;

#[derive(Debug, Clone)]
struct Note {
    value: String,
    expires_at: DateTime<Utc>,
}

impl Note {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Attempt notes held in process memory
///
/// Expired notes read as absent. A read or consume that finds one removes
/// it, and every write sweeps the rest, so abandoned attempts do not pile up.
#[derive(Clone)]
pub struct InMemoryAuthNoteStore {
    notes: Arc<RwLock<HashMap<(Uuid, String), Note>>>,
    ttl: Duration,
}

impl InMemoryAuthNoteStore {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            notes: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::seconds(
                i64::try_from(ttl_seconds)
                    .unwrap_or(MAX_TTL_SECONDS)
                    .min(MAX_TTL_SECONDS),
            ),
        }
    }

    /// Drop expired notes; returns how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|_, note| note.is_live(now));
        before - notes.len()
    }

    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.notes.read().await.is_empty()
    }
}

#[async_trait]
impl AuthNoteStore for InMemoryAuthNoteStore {
    async fn get_note(&self, attempt_id: Uuid, key: &str) -> Result<Option<String>, DomainError> {
        let now = Utc::now();
        let slot = (attempt_id, key.to_string());

        match self.notes.read().await.get(&slot) {
            Some(note) if note.is_live(now) => return Ok(Some(note.value.clone())),
            Some(_) => {}
            None => return Ok(None),
        }

        let mut notes = self.notes.write().await;
        if notes.get(&slot).is_some_and(|note| !note.is_live(now)) {
            notes.remove(&slot);
        }
        Ok(None)
    }

    async fn set_note(&self, attempt_id: Uuid, key: &str, value: &str) -> Result<(), DomainError> {
        let now = Utc::now();
        let note = Note {
            value: value.to_string(),
            expires_at: now + self.ttl,
        };
        let mut notes = self.notes.write().await;
        notes.retain(|_, note| note.is_live(now));
        notes.insert((attempt_id, key.to_string()), note);
        Ok(())
    }

    async fn remove_note(&self, attempt_id: Uuid, key: &str) -> Result<(), DomainError> {
        self.notes.write().await.remove(&(attempt_id, key.to_string()));
        Ok(())
    }

    async fn remove_note_if_eq(
        &self,
        attempt_id: Uuid,
        key: &str,
        expected: &str,
    ) -> Result<bool, DomainError> {
        let now = Utc::now();
        let slot = (attempt_id, key.to_string());
        let mut notes = self.notes.write().await;

        let (live, matches) = match notes.get(&slot) {
            Some(note) => (note.is_live(now), note.value == expected),
            None => return Ok(false),
        };
        if !live || matches {
            notes.remove(&slot);
        }
        Ok(live && matches)
    }
}
