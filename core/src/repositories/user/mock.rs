//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::UserSnapshot;
use crate::errors::DomainError;

use super::UserRepository;

/// Mock user repository backed by a map
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, UserSnapshot>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the given user
    pub async fn with_user(user: UserSnapshot) -> Self {
        let repo = Self::new();
        repo.insert(user).await;
        repo
    }

    /// Insert or replace a user
    pub async fn insert(&self, user: UserSnapshot) {
        self.users.write().await.insert(user.id, user);
    }

    /// Current state of a user
    pub async fn get(&self, id: Uuid) -> Option<UserSnapshot> {
        self.users.read().await.get(&id).cloned()
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "Mock user repository error".to_string(),
            });
        }
        Ok(())
    }
}

fn not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        resource: format!("User {}", id),
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserSnapshot>, DomainError> {
        self.check_failure()?;
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn set_email_verified(&self, id: Uuid, verified: bool) -> Result<(), DomainError> {
        self.check_failure()?;
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or_else(|| not_found(id))?;
        user.email_verified = verified;
        Ok(())
    }

    async fn add_required_action(&self, id: Uuid, action: &str) -> Result<(), DomainError> {
        self.check_failure()?;
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or_else(|| not_found(id))?;
        if !user.has_required_action(action) {
            user.required_actions.push(action.to_string());
        }
        Ok(())
    }
}
