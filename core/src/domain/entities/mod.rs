//! Domain entities representing core business objects.

mod event;
mod user;
mod verification_code;

// Re-export commonly used types
pub use event::{error_codes, EventOutcome, VerificationEvent, VerificationEventType, DETAIL_EMAIL};
pub use user::UserSnapshot;
pub use verification_code::{codes_match, VerificationCode, EMAIL_CODE_FIELD, VERIFY_EMAIL_CODE};
