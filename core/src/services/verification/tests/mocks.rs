//! Mock implementations for testing the verification flow

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::value_objects::ChallengeForm;
use crate::errors::EmailDeliveryError;
use crate::services::verification::{ChallengeRenderer, EmailDispatcherTrait, VerificationEmail};

// Mock email dispatcher for testing
#[derive(Default)]
pub struct MockEmailDispatcher {
    pub sent: Arc<Mutex<Vec<VerificationEmail>>>,
    pub should_fail: AtomicBool,
}

impl MockEmailDispatcher {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail: AtomicBool::new(should_fail),
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_email(&self) -> Option<VerificationEmail> {
        self.sent.lock().unwrap().last().cloned()
    }

    pub fn last_code(&self) -> Option<String> {
        self.last_email().and_then(|e| e.code().map(str::to_string))
    }
}

#[async_trait]
impl EmailDispatcherTrait for MockEmailDispatcher {
    async fn send_verification_email(
        &self,
        email: &VerificationEmail,
    ) -> Result<String, EmailDeliveryError> {
        // Attempts are recorded even when they fail
        self.sent.lock().unwrap().push(email.clone());
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(EmailDeliveryError::Transport("SMTP connection refused".to_string()));
        }
        Ok(format!("mock-email-{}", uuid::Uuid::new_v4()))
    }
}

// Renderer handing the form back to the test
pub struct FormRenderer;

impl ChallengeRenderer for FormRenderer {
    type Response = ChallengeForm;

    fn render(&self, form: &ChallengeForm) -> ChallengeForm {
        form.clone()
    }
}
