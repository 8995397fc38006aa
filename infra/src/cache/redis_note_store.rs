//! Redis-backed attempt-note store
//!
//! Notes are stored as plain strings under
//! `[{prefix}:]auth_note:{attempt_id}:{key}` and expire after the configured
//! note TTL, which stands in for the authentication session lifetime.

use async_trait::async_trait;
use uuid::Uuid;

use emailcode_core::errors::DomainError;
use emailcode_core::repositories::AuthNoteStore;

use crate::cache::RedisClient;

/// Attempt notes in Redis
#[derive(Clone)]
pub struct RedisAuthNoteStore {
    redis_client: RedisClient,
    ttl_seconds: u64,
}

impl RedisAuthNoteStore {
    pub fn new(redis_client: RedisClient, ttl_seconds: u64) -> Self {
        Self {
            redis_client,
            ttl_seconds,
        }
    }

    fn note_key(&self, attempt_id: Uuid, key: &str) -> String {
        self.redis_client
            .config()
            .make_key(&format_note_key(attempt_id, key))
    }
}

/// Unprefixed Redis key of a note
pub fn format_note_key(attempt_id: Uuid, key: &str) -> String {
    format!("auth_note:{}:{}", attempt_id, key)
}

#[async_trait]
impl AuthNoteStore for RedisAuthNoteStore {
    #[tracing::instrument(name = "Reading attempt note", skip(self))]
    async fn get_note(&self, attempt_id: Uuid, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.redis_client.get(&self.note_key(attempt_id, key)).await?)
    }

    #[tracing::instrument(name = "Writing attempt note", skip(self, value))]
    async fn set_note(&self, attempt_id: Uuid, key: &str, value: &str) -> Result<(), DomainError> {
        self.redis_client
            .set_with_expiry(&self.note_key(attempt_id, key), value, self.ttl_seconds)
            .await?;
        Ok(())
    }

    #[tracing::instrument(name = "Removing attempt note", skip(self))]
    async fn remove_note(&self, attempt_id: Uuid, key: &str) -> Result<(), DomainError> {
        self.redis_client
            .delete(&self.note_key(attempt_id, key))
            .await?;
        Ok(())
    }

    #[tracing::instrument(name = "Consuming attempt note", skip(self, expected))]
    async fn remove_note_if_eq(
        &self,
        attempt_id: Uuid,
        key: &str,
        expected: &str,
    ) -> Result<bool, DomainError> {
        Ok(self
            .redis_client
            .delete_if_eq(&self.note_key(attempt_id, key), expected)
            .await?)
    }
}
