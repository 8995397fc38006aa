//! Traits for the collaborators the verification flow talks to

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::domain::value_objects::ChallengeForm;
use crate::errors::EmailDeliveryError;

use super::types::VerificationEmail;

/// Trait for email delivery integration
#[async_trait]
pub trait EmailDispatcherTrait: Send + Sync {
    /// Send the templated verification email; returns the provider's message id
    async fn send_verification_email(
        &self,
        email: &VerificationEmail,
    ) -> Result<String, EmailDeliveryError>;
}

/// Turns a challenge form into whatever the host shows the user
///
/// Closures of the shape `Fn(&ChallengeForm) -> T` are renderers too.
pub trait ChallengeRenderer: Send + Sync {
    type Response: Send;

    fn render(&self, form: &ChallengeForm) -> Self::Response;
}

impl<F, T> ChallengeRenderer for F
where
    F: Fn(&ChallengeForm) -> T + Send + Sync,
    T: Send,
{
    type Response = T;

    fn render(&self, form: &ChallengeForm) -> T {
        self(form)
    }
}

/// Decoded form parameters of a submission
pub trait FormData: Send + Sync {
    /// First value of a field, if present
    fn get_field(&self, name: &str) -> Option<&str>;
}

impl<S: BuildHasher + Send + Sync> FormData for HashMap<String, String, S> {
    fn get_field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FormData for BTreeMap<String, String> {
    fn get_field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}
