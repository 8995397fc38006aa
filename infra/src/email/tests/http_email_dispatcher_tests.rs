//! Unit tests for the HTTP email dispatcher

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use emailcode_core::errors::EmailDeliveryError;
use emailcode_core::services::verification::EmailDispatcherTrait;
use emailcode_shared::EmailConfig;

use super::sample_email;
use crate::email::HttpEmailDispatcher;

fn dispatcher(server: &MockServer, timeout: Duration) -> HttpEmailDispatcher {
    let client = Client::builder().timeout(timeout).build().unwrap();
    HttpEmailDispatcher::new(
        Url::parse(&server.uri()).unwrap(),
        "no-reply@acme.test".to_string(),
        "server-token".to_string(),
        client,
    )
}

#[tokio::test]
async fn test_send_posts_templated_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/email/withTemplate"))
        .and(header("X-Postmark-Server-Token", "server-token"))
        .and(body_partial_json(json!({
            "From": "no-reply@acme.test",
            "To": "jane@example.com",
            "TemplateAlias": "email-verification-with-code.ftl",
            "TemplateModel": { "code": "ABC123" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "To": "jane@example.com",
            "MessageID": "b7bc2f4a-e38e-4336-af7d-e6c392c2f817",
            "ErrorCode": 0,
            "Message": "OK"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let message_id = dispatcher(&server, Duration::from_secs(5))
        .send_verification_email(&sample_email("jane@example.com", "ABC123"))
        .await
        .unwrap();

    assert_eq!(message_id, "b7bc2f4a-e38e-4336-af7d-e6c392c2f817");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("Subject").is_none());
}

#[tokio::test]
async fn test_rejection_maps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(422).set_body_string("Inactive recipient"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = dispatcher(&server, Duration::from_secs(5))
        .send_verification_email(&sample_email("jane@example.com", "ABC123"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EmailDeliveryError::Rejected {
            status: 422,
            message: "Inactive recipient".to_string()
        }
    );
}

#[tokio::test]
async fn test_invalid_recipient_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = dispatcher(&server, Duration::from_secs(5))
        .send_verification_email(&sample_email("not-an-address", "ABC123"))
        .await
        .unwrap_err();

    assert!(matches!(err, EmailDeliveryError::InvalidRecipient(_)));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let err = dispatcher(&server, Duration::from_millis(200))
        .send_verification_email(&sample_email("jane@example.com", "ABC123"))
        .await
        .unwrap_err();

    assert!(matches!(err, EmailDeliveryError::Transport(_)));
}

#[tokio::test]
async fn test_accepted_without_message_id_is_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let message_id = dispatcher(&server, Duration::from_secs(5))
        .send_verification_email(&sample_email("jane@example.com", "ABC123"))
        .await
        .unwrap();

    assert_eq!(message_id, "");
}

#[tokio::test]
async fn test_accepted_with_unexpected_body_is_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = dispatcher(&server, Duration::from_secs(5))
        .send_verification_email(&sample_email("jane@example.com", "ABC123"))
        .await;

    assert_eq!(result, Ok(String::new()));
}

#[test]
fn test_from_config_rejects_invalid_url() {
    let config = EmailConfig {
        provider: "http".to_string(),
        api_url: "not a url".to_string(),
        api_token: "token".to_string(),
        ..EmailConfig::default()
    };

    assert!(HttpEmailDispatcher::from_config(&config).is_err());
}
