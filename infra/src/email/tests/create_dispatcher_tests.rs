//! Unit tests for dispatcher creation

use emailcode_shared::EmailConfig;

use crate::email::create_email_dispatcher;

#[test]
fn test_mock_provider() {
    assert!(create_email_dispatcher(&EmailConfig::default()).is_ok());
}

#[test]
fn test_http_provider_requires_url_and_token() {
    let mut config = EmailConfig {
        provider: "http".to_string(),
        ..EmailConfig::default()
    };
    let err = create_email_dispatcher(&config).err().unwrap();
    assert!(err.to_string().contains("EMAIL_API_URL"));

    config.api_url = "https://api.postmarkapp.com".to_string();
    let err = create_email_dispatcher(&config).err().unwrap();
    assert!(err.to_string().contains("EMAIL_API_TOKEN"));

    config.api_token = "server-token".to_string();
    assert!(create_email_dispatcher(&config).is_ok());
}

#[test]
fn test_unknown_provider() {
    let config = EmailConfig {
        provider: "carrier-pigeon".to_string(),
        ..EmailConfig::default()
    };

    let err = create_email_dispatcher(&config).err().unwrap();
    assert_eq!(err.to_string(), "Unknown email provider: carrier-pigeon");
}
