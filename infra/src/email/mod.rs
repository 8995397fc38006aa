//! Email Dispatcher Module
//!
//! Implementations of `EmailDispatcherTrait` for delivering verification
//! codes:
//!
//! - **HTTP**: Postmark-compatible transactional email API
//! - **Mock**: logs the email instead of sending it, for development

use std::sync::Arc;

use anyhow::{bail, Context};

use emailcode_core::services::verification::EmailDispatcherTrait;
use emailcode_shared::EmailConfig;

pub mod http_email_dispatcher;
pub mod mock_email_dispatcher;

pub use http_email_dispatcher::HttpEmailDispatcher;
pub use mock_email_dispatcher::MockEmailDispatcher;

#[cfg(test)]
mod tests;

/// Create an email dispatcher based on configuration
///
/// # Arguments
///
/// * `config` - Email configuration; `provider` selects "http" or "mock"
///
/// # Errors
///
/// Fails for an unknown provider or an HTTP configuration without an API
/// URL or token.
pub fn create_email_dispatcher(config: &EmailConfig) -> anyhow::Result<Arc<dyn EmailDispatcherTrait>> {
    match config.provider.as_str() {
        "mock" => {
            tracing::warn!("Using mock email dispatcher, verification codes are only logged");
            Ok(Arc::new(MockEmailDispatcher::new()))
        }
        "http" => {
            if config.api_url.is_empty() {
                bail!("EMAIL_API_URL must be set for the http email provider");
            }
            if config.api_token.is_empty() {
                bail!("EMAIL_API_TOKEN must be set for the http email provider");
            }
            let dispatcher = HttpEmailDispatcher::from_config(config)
                .context("Failed to initialize HTTP email dispatcher")?;
            Ok(Arc::new(dispatcher))
        }
        other => bail!("Unknown email provider: {}", other),
    }
}
