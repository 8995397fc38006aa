//! Value objects exchanged between the flow and its host.

mod attempt;
mod challenge;

pub use attempt::{AttemptContext, RealmSettings};
pub use challenge::{
    ChallengeForm, FieldError, FlowOutcome, VerificationState, LOGIN_VERIFY_EMAIL_CODE_TEMPLATE,
};
