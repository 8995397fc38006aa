//! Pure decision functions of the verification lifecycle.
//!
//! The flow service performs the side effects; everything here depends only
//! on its arguments.

use crate::domain::entities::{codes_match, UserSnapshot};
use crate::domain::value_objects::VerificationState;

/// What a challenge request should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengePlan {
    /// Clear any stored code and report success
    AlreadyVerified,
    /// Skip the step; there is no address to send to
    MissingEmail,
    /// Issue a code and email it to `recipient`
    IssueCode { recipient: String },
}

/// Result of checking a submission against the stored code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionVerdict {
    /// Nothing is stored for the attempt; challenge again
    NoCodeIssued,
    /// The submitted value is absent or differs
    Mismatch,
    /// Exact match
    Match,
}

/// Decide whether the user must verify their email
pub fn evaluate_trigger(realm_requires: bool, user_verified: bool) -> VerificationState {
    if realm_requires && !user_verified {
        VerificationState::PendingIssuance
    } else {
        VerificationState::NotRequired
    }
}

/// Decide how to answer a challenge request for this user
pub fn plan_challenge(user: &UserSnapshot) -> ChallengePlan {
    if user.email_verified {
        return ChallengePlan::AlreadyVerified;
    }

    match user.usable_email() {
        Some(email) => ChallengePlan::IssueCode {
            recipient: email.to_string(),
        },
        None => ChallengePlan::MissingEmail,
    }
}

/// Compare a submitted code with the stored one
pub fn judge_submission(stored: Option<&str>, submitted: Option<&str>) -> SubmissionVerdict {
    match (stored, submitted) {
        (None, _) => SubmissionVerdict::NoCodeIssued,
        (Some(stored), Some(submitted)) if codes_match(stored, submitted) => {
            SubmissionVerdict::Match
        }
        (Some(_), _) => SubmissionVerdict::Mismatch,
    }
}
