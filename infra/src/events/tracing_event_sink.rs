//! Event sink writing verification events to the tracing pipeline
//!
//! Events are emitted under the `emailcode::events` target so they can be
//! routed separately from application logs.

use async_trait::async_trait;

use emailcode_core::domain::entities::{EventOutcome, VerificationEvent, DETAIL_EMAIL};
use emailcode_core::errors::DomainError;
use emailcode_core::repositories::EventSink;
use emailcode_shared::email::mask_email;

/// Logs each event as a structured record
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl TracingEventSink {
    pub fn new() -> Self {
        Self
    }
}

/// Event details as JSON, with the email masked
pub(crate) fn masked_details(event: &VerificationEvent) -> String {
    let details: serde_json::Map<String, serde_json::Value> = event
        .details
        .iter()
        .map(|(key, value)| {
            let value = if key == DETAIL_EMAIL {
                mask_email(value)
            } else {
                value.clone()
            };
            (key.clone(), serde_json::Value::String(value))
        })
        .collect();
    serde_json::Value::Object(details).to_string()
}

#[async_trait]
impl EventSink for TracingEventSink {
    async fn record(&self, event: &VerificationEvent) -> Result<(), DomainError> {
        let details = masked_details(event);

        match &event.outcome {
            EventOutcome::Success => tracing::info!(
                target: "emailcode::events",
                event_id = %event.id,
                event_type = %event.event_type,
                user_id = %event.user_id,
                attempt_id = %event.attempt_id,
                realm = %event.realm,
                details = %details,
                "Verification event"
            ),
            EventOutcome::Error(code) => tracing::warn!(
                target: "emailcode::events",
                event_id = %event.id,
                event_type = %event.event_type,
                user_id = %event.user_id,
                attempt_id = %event.attempt_id,
                realm = %event.realm,
                error = %code,
                details = %details,
                "Verification event failed"
            ),
        }

        Ok(())
    }
}
