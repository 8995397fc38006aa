//! Challenge artifacts and flow outcomes.

use serde::{Deserialize, Serialize};

use crate::domain::entities::UserSnapshot;

/// Template rendered to prompt for the emailed code
pub const LOGIN_VERIFY_EMAIL_CODE_TEMPLATE: &str = "login-verify-email-code.ftl";

/// States of the verification lifecycle for one user and attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationState {
    /// The realm does not require verification or the user is verified
    NotRequired,
    /// The required action was added; no code issued yet
    PendingIssuance,
    /// A code is outstanding and the user is being prompted
    CodeIssued,
    /// The email is verified (terminal)
    Confirmed,
    /// The flow was bypassed because the user has no email (terminal)
    Ignored,
}

impl VerificationState {
    /// Whether no further transitions happen for this attempt
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Ignored)
    }
}

/// A validation error attached to a single form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Everything a renderer needs to produce the code-entry challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeForm {
    /// Template identifier
    pub template: String,

    /// User being verified
    pub user: UserSnapshot,

    /// Field-level validation errors
    #[serde(default)]
    pub field_errors: Vec<FieldError>,

    /// Non-fatal error shown above the form (e.g. `email_send_failed`)
    #[serde(default)]
    pub error: Option<String>,
}

impl ChallengeForm {
    pub fn new(user: UserSnapshot) -> Self {
        Self {
            template: LOGIN_VERIFY_EMAIL_CODE_TEMPLATE.to_string(),
            user,
            field_errors: Vec::new(),
            error: None,
        }
    }

    pub fn with_field_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.field_errors.push(FieldError::new(field, message));
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// First error reported for a field
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// Result of a challenge or submission, as signalled to the host flow engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome<R> {
    /// The email is verified; the host may continue authentication
    Success,
    /// The step does not apply and is skipped without error
    Ignored,
    /// The host must show the rendered challenge and wait for a submission
    Challenge(R),
}

impl<R> FlowOutcome<R> {
    /// Lifecycle state this outcome leaves the attempt in
    pub fn state(&self) -> VerificationState {
        match self {
            Self::Success => VerificationState::Confirmed,
            Self::Ignored => VerificationState::Ignored,
            Self::Challenge(_) => VerificationState::CodeIssued,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// The rendered challenge, if one was produced
    pub fn challenge(&self) -> Option<&R> {
        match self {
            Self::Challenge(response) => Some(response),
            _ => None,
        }
    }

    pub fn into_challenge(self) -> Option<R> {
        match self {
            Self::Challenge(response) => Some(response),
            _ => None,
        }
    }
}
