//! Write-only sink for verification events

use async_trait::async_trait;

use crate::domain::entities::VerificationEvent;
use crate::errors::DomainError;

/// Receives the events emitted by the verification flow.
///
/// Callers log and drop errors from `record`; a failing sink never changes
/// the outcome of an attempt.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn record(&self, event: &VerificationEvent) -> Result<(), DomainError>;
}
