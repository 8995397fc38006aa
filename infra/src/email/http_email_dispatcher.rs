//! HTTP email dispatcher for Postmark-compatible APIs
//!
//! Sends the verification email as a templated message: the template alias
//! is the email template identifier and the template model carries the
//! code. The subject line comes from the provider-side template, so the
//! subject message key is not sent.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use emailcode_core::errors::EmailDeliveryError;
use emailcode_core::services::verification::{EmailDispatcherTrait, VerificationEmail};
use emailcode_shared::email::{is_valid_email, mask_email};
use emailcode_shared::EmailConfig;

use crate::InfrastructureError;

const SEND_WITH_TEMPLATE_PATH: &str = "/email/withTemplate";
const SERVER_TOKEN_HEADER: &str = "X-Postmark-Server-Token";

/// Dispatcher posting verification emails to a transactional email API
pub struct HttpEmailDispatcher {
    http_client: Client,
    base_url: Url,
    sender: String,
    api_token: String,
}

impl HttpEmailDispatcher {
    pub fn new(base_url: Url, sender: String, api_token: String, http_client: Client) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            api_token,
        }
    }

    /// Create from configuration, with the configured request timeout
    pub fn from_config(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let base_url = Url::parse(&config.api_url).map_err(|e| {
            InfrastructureError::Config(format!("Invalid email API URL '{}': {}", config.api_url, e))
        })?;
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        tracing::info!(
            base_url = %base_url,
            sender = %mask_email(&config.sender),
            "HTTP email dispatcher initialized"
        );

        Ok(Self::new(
            base_url,
            config.sender.clone(),
            config.api_token.clone(),
            http_client,
        ))
    }
}

#[async_trait]
impl EmailDispatcherTrait for HttpEmailDispatcher {
    #[tracing::instrument(
        name = "Sending verification email",
        skip_all,
        fields(attempt_id = %email.attempt_id, recipient = %mask_email(&email.recipient))
    )]
    async fn send_verification_email(
        &self,
        email: &VerificationEmail,
    ) -> Result<String, EmailDeliveryError> {
        if !is_valid_email(&email.recipient) {
            return Err(EmailDeliveryError::InvalidRecipient(mask_email(&email.recipient)));
        }

        let url = self
            .base_url
            .join(SEND_WITH_TEMPLATE_PATH)
            .map_err(|e| EmailDeliveryError::Transport(e.to_string()))?;

        let request_body = SendTemplatedEmailRequest {
            from: &self.sender,
            to: &email.recipient,
            template_alias: &email.template,
            template_model: &email.attributes,
        };

        let response = self
            .http_client
            .post(url)
            .header(SERVER_TOKEN_HEADER, &self.api_token)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| EmailDeliveryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmailDeliveryError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        // Any 2xx means the provider accepted the message; the id is informational
        let body = response.text().await.unwrap_or_default();
        let message_id = serde_json::from_str::<SendEmailResponse>(&body)
            .ok()
            .and_then(|response| response.message_id)
            .unwrap_or_default();
        if message_id.is_empty() {
            tracing::warn!(
                status = status.as_u16(),
                "Email accepted without a message id"
            );
        }

        Ok(message_id)
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendTemplatedEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    template_alias: &'a str,
    template_model: &'a BTreeMap<String, String>,
}

#[derive(Deserialize, Debug)]
struct SendEmailResponse {
    #[serde(rename = "MessageID", default)]
    message_id: Option<String>,
}
