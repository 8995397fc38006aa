//! Mock implementation of EventSink for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{VerificationEvent, VerificationEventType};
use crate::errors::DomainError;

use super::EventSink;

/// Records events in memory; with `should_fail` set it still records but
/// returns an error
#[derive(Clone, Default)]
pub struct MockEventSink {
    events: Arc<RwLock<Vec<VerificationEvent>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, oldest first
    pub async fn events(&self) -> Vec<VerificationEvent> {
        self.events.read().await.clone()
    }

    /// Recorded events of one type
    pub async fn events_of(&self, event_type: VerificationEventType) -> Vec<VerificationEvent> {
        self.events
            .read()
            .await
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect()
    }

    pub async fn clear(&self) {
        self.events.write().await.clear();
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl EventSink for MockEventSink {
    async fn record(&self, event: &VerificationEvent) -> Result<(), DomainError> {
        self.events.write().await.push(event.clone());
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "Mock event sink error".to_string(),
            });
        }
        Ok(())
    }
}
