use async_trait::async_trait;

use crate::domain::entities::VerificationEvent;
use crate::errors::DomainError;

use super::EventSink;

/// Sink that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn record(&self, _event: &VerificationEvent) -> Result<(), DomainError> {
        Ok(())
    }
}

#[async_trait]
impl EventSink for () {
    async fn record(&self, _event: &VerificationEvent) -> Result<(), DomainError> {
        Ok(())
    }
}
