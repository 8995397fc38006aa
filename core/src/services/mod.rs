//! Business services containing domain logic and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    ChallengePlan, ChallengeRenderer, EmailDispatcherTrait, FormData, OperationalInfo,
    SubmissionVerdict, VerificationCodeConfig, VerificationCodeFlow, VerificationEmail,
};
