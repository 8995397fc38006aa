//! Mock email dispatcher for development
//!
//! Logs each verification email, code included, instead of sending it and
//! keeps an outbox for inspection.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use emailcode_core::errors::EmailDeliveryError;
use emailcode_core::services::verification::{EmailDispatcherTrait, VerificationEmail};
use emailcode_shared::email::mask_email;

/// Dispatcher that never leaves the process
#[derive(Clone, Default)]
pub struct MockEmailDispatcher {
    outbox: Arc<Mutex<Vec<VerificationEmail>>>,
}

impl MockEmailDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emails "sent" so far, oldest first
    pub fn outbox(&self) -> Vec<VerificationEmail> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_default()
    }

    /// Code carried by the most recent email
    pub fn last_code(&self) -> Option<String> {
        self.outbox()
            .last()
            .and_then(|email| email.code().map(str::to_string))
    }
}

#[async_trait]
impl EmailDispatcherTrait for MockEmailDispatcher {
    async fn send_verification_email(
        &self,
        email: &VerificationEmail,
    ) -> Result<String, EmailDeliveryError> {
        let message_id = format!("mock-{}", Uuid::new_v4());

        tracing::info!(
            recipient = %mask_email(&email.recipient),
            template = %email.template,
            code = email.code().unwrap_or_default(),
            message_id = %message_id,
            "[MOCK EMAIL] Verification email"
        );

        self.outbox
            .lock()
            .map_err(|_| EmailDeliveryError::Transport("mock outbox poisoned".to_string()))?
            .push(email.clone());

        Ok(message_id)
    }
}
