//! Types exchanged with the email dispatcher and the host

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::VerificationCode;
use crate::domain::value_objects::AttemptContext;

/// Message key of the email subject
pub const EMAIL_VERIFICATION_SUBJECT: &str = "emailVerificationSubject";

/// Email body template
pub const EMAIL_VERIFICATION_TEMPLATE: &str = "email-verification-with-code.ftl";

/// Template attribute carrying the code
pub const CODE_ATTRIBUTE: &str = "code";

/// Operational info entries, keyed `VERIFY_EMAIL_CODE.<config key>`
pub type OperationalInfo = BTreeMap<String, String>;

/// A verification email ready for a dispatcher
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationEmail {
    /// Message key of the subject line
    pub subject_key: String,
    /// Body template identifier
    pub template: String,
    /// Recipient address
    pub recipient: String,
    /// Realm the attempt runs in
    pub realm: String,
    /// User being verified
    pub user_id: Uuid,
    /// Attempt the code belongs to
    pub attempt_id: Uuid,
    /// Template attributes (`code`)
    pub attributes: BTreeMap<String, String>,
}

impl VerificationEmail {
    /// Build the email carrying a freshly issued code
    pub fn with_code(
        context: &AttemptContext,
        recipient: impl Into<String>,
        code: &VerificationCode,
    ) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert(CODE_ATTRIBUTE.to_string(), code.as_str().to_string());

        Self {
            subject_key: EMAIL_VERIFICATION_SUBJECT.to_string(),
            template: EMAIL_VERIFICATION_TEMPLATE.to_string(),
            recipient: recipient.into(),
            realm: context.realm.name.clone(),
            user_id: context.user_id,
            attempt_id: context.attempt_id,
            attributes,
        }
    }

    /// The code attribute
    pub fn code(&self) -> Option<&str> {
        self.attributes.get(CODE_ATTRIBUTE).map(String::as_str)
    }
}

// Keeps the code out of logs
impl std::fmt::Debug for VerificationEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationEmail")
            .field("subject_key", &self.subject_key)
            .field("template", &self.template)
            .field("recipient", &self.recipient)
            .field("realm", &self.realm)
            .field("user_id", &self.user_id)
            .field("attempt_id", &self.attempt_id)
            .field("attributes", &self.attributes.keys().collect::<Vec<_>>())
            .finish()
    }
}
