mod create_dispatcher_tests;
mod http_email_dispatcher_tests;

use uuid::Uuid;

use emailcode_core::domain::entities::VerificationCode;
use emailcode_core::domain::value_objects::{AttemptContext, RealmSettings};
use emailcode_core::services::verification::VerificationEmail;

/// Verification email carrying `code` for `recipient`
fn sample_email(recipient: &str, code: &str) -> VerificationEmail {
    let context = AttemptContext::new(Uuid::new_v4(), RealmSettings::new("acme", true));
    VerificationEmail::with_code(&context, recipient, &VerificationCode::from(code.to_string()))
}
