//! Verification event entity for the audit side channel.
//!
//! Events are write-only telemetry: the flow records them and never reads
//! them back, so nothing here influences control flow.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Detail key carrying the user's email address
pub const DETAIL_EMAIL: &str = "email";

/// Error codes attached to failed events
pub mod error_codes {
    /// The verification email could not be delivered
    pub const EMAIL_SEND_FAILED: &str = "email_send_failed";

    /// The submitted code did not match the stored one
    pub const INVALID_CODE: &str = "VerifyEmailInvalidCode";
}

/// Event types emitted by the verification flow
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationEventType {
    /// A verification email was (or failed to be) sent
    SendVerifyEmail,
    /// A submitted code was checked
    VerifyEmail,
}

impl VerificationEventType {
    /// Convert to string representation for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SendVerifyEmail => "SEND_VERIFY_EMAIL",
            Self::VerifyEmail => "VERIFY_EMAIL",
        }
    }
}

impl std::fmt::Display for VerificationEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a recorded event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", content = "error", rename_all = "lowercase")]
pub enum EventOutcome {
    Success,
    Error(String),
}

impl EventOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Error code, if the event failed
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Error(code) => Some(code),
        }
    }
}

/// A structured security event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerificationEvent {
    /// Unique identifier for the event
    pub id: Uuid,

    /// Type of verification event
    pub event_type: VerificationEventType,

    /// User the event concerns
    pub user_id: Uuid,

    /// Authentication attempt the event belongs to
    pub attempt_id: Uuid,

    /// Realm the attempt runs in
    pub realm: String,

    /// Additional key/value details (always includes `email`)
    pub details: BTreeMap<String, String>,

    /// Success or error code
    pub outcome: EventOutcome,

    /// Timestamp when the event occurred
    pub created_at: DateTime<Utc>,
}

impl VerificationEvent {
    /// Create a new event; the outcome defaults to success
    pub fn new(event_type: VerificationEventType, user_id: Uuid, attempt_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            user_id,
            attempt_id,
            realm: String::new(),
            details: BTreeMap::new(),
            outcome: EventOutcome::Success,
            created_at: Utc::now(),
        }
    }

    /// Add realm context
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }

    /// Add a detail entry
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Finish the event as successful
    pub fn success(mut self) -> Self {
        self.outcome = EventOutcome::Success;
        self
    }

    /// Finish the event with an error code
    pub fn error(mut self, code: impl Into<String>) -> Self {
        self.outcome = EventOutcome::Error(code.into());
        self
    }

    /// The email detail, if recorded
    pub fn email(&self) -> Option<&str> {
        self.details.get(DETAIL_EMAIL).map(String::as_str)
    }
}
