//! User repository trait defining the identity-store operations the
//! verification flow needs.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::UserSnapshot;
use crate::errors::DomainError;

/// Repository trait for the user identity store
///
/// Implementations adapt the host platform's user model. Mutations are
/// addressed by user id; the flow never holds on to a user entity.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id
    ///
    /// # Returns
    /// * `Ok(Some(UserSnapshot))` - User found
    /// * `Ok(None)` - No user with this id
    /// * `Err(DomainError)` - Store failure
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserSnapshot>, DomainError>;

    /// Set the email-verified flag
    async fn set_email_verified(&self, id: Uuid, verified: bool) -> Result<(), DomainError>;

    /// Add a named pending action; adding an already pending action is a no-op
    async fn add_required_action(&self, id: Uuid, action: &str) -> Result<(), DomainError>;
}
