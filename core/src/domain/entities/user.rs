//! User snapshot entity as seen by the verification flow.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emailcode_shared::utils::validation::is_blank;

/// Read-only view of the user being verified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    /// Unique identifier of the user
    pub id: Uuid,

    /// Email address, if the user has one
    pub email: Option<String>,

    /// Whether the email address has been verified
    pub email_verified: bool,

    /// Pending steps the user must complete before authentication finishes
    #[serde(default)]
    pub required_actions: Vec<String>,
}

impl UserSnapshot {
    /// Create an unverified user with the given email
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: Some(email.into()),
            email_verified: false,
            required_actions: Vec::new(),
        }
    }

    /// Create an unverified user without any email address
    pub fn without_email() -> Self {
        Self {
            id: Uuid::new_v4(),
            email: None,
            email_verified: false,
            required_actions: Vec::new(),
        }
    }

    /// Mark the snapshot as verified
    pub fn verified(mut self) -> Self {
        self.email_verified = true;
        self
    }

    /// The email address, unless absent or blank
    pub fn usable_email(&self) -> Option<&str> {
        let email = self.email.as_deref();
        if is_blank(email) {
            None
        } else {
            email
        }
    }

    /// Email for event details; empty when absent
    pub fn email_or_empty(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    /// Check whether a required action is pending
    pub fn has_required_action(&self, action: &str) -> bool {
        self.required_actions.iter().any(|a| a == action)
    }
}
