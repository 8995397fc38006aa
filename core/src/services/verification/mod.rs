//! Email verification by code, run as a required action of an
//! authentication attempt
//!
//! This module provides the complete code lifecycle:
//! - Trigger evaluation against realm policy and user status
//! - Code generation, storage in the attempt notes and email delivery
//! - Submission checking with one-shot consumption of the stored code
//! - Operational info for the host's server-info page

mod config;
mod service;
mod traits;
pub mod transitions;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationCodeConfig;
pub use service::{VerificationCodeFlow, DISPLAY_TEXT};
pub use traits::{ChallengeRenderer, EmailDispatcherTrait, FormData};
pub use transitions::{ChallengePlan, SubmissionVerdict};
pub use types::{
    OperationalInfo, VerificationEmail, CODE_ATTRIBUTE, EMAIL_VERIFICATION_SUBJECT,
    EMAIL_VERIFICATION_TEMPLATE,
};
