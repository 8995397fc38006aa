//! Authentication attempt context.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Realm-level settings the flow depends on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmSettings {
    /// Realm name, used for email and event context
    pub name: String,

    /// Whether the realm enforces email verification
    pub verify_email: bool,
}

impl RealmSettings {
    pub fn new(name: impl Into<String>, verify_email: bool) -> Self {
        Self {
            name: name.into(),
            verify_email,
        }
    }
}

/// Identifies one in-progress authentication attempt for one user.
///
/// The attempt id scopes the stored code: each attempt has its own slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptContext {
    /// Authentication session identifier
    pub attempt_id: Uuid,

    /// User being authenticated
    pub user_id: Uuid,

    /// Realm the attempt runs in
    pub realm: RealmSettings,
}

impl AttemptContext {
    /// Create a context for a fresh attempt
    pub fn new(user_id: Uuid, realm: RealmSettings) -> Self {
        Self {
            attempt_id: Uuid::new_v4(),
            user_id,
            realm,
        }
    }

    /// Create a context for an existing attempt
    pub fn for_attempt(attempt_id: Uuid, user_id: Uuid, realm: RealmSettings) -> Self {
        Self {
            attempt_id,
            user_id,
            realm,
        }
    }
}
