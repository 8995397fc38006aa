//! Integration tests for the verification code flow through the public API

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use emailcode_core::domain::entities::{
    error_codes, UserSnapshot, VerificationEventType, EMAIL_CODE_FIELD, VERIFY_EMAIL_CODE,
};
use emailcode_core::domain::value_objects::{
    AttemptContext, ChallengeForm, FlowOutcome, RealmSettings, VerificationState,
};
use emailcode_core::errors::EmailDeliveryError;
use emailcode_core::repositories::{
    AuthNoteStore, MockAuthNoteStore, MockEventSink, MockUserRepository, NoOpEventSink,
};
use emailcode_core::services::verification::{
    EmailDispatcherTrait, VerificationCodeFlow, VerificationEmail,
};
use emailcode_shared::VerificationConfig;

/// Dispatcher keeping an outbox the test reads codes from
#[derive(Default)]
struct Outbox {
    sent: Mutex<Vec<VerificationEmail>>,
}

impl Outbox {
    fn last_code(&self) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .last()
            .and_then(|email| email.code().map(str::to_string))
    }

    fn len(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailDispatcherTrait for Outbox {
    async fn send_verification_email(
        &self,
        email: &VerificationEmail,
    ) -> Result<String, EmailDeliveryError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok("outbox-1".to_string())
    }
}

fn render(form: &ChallengeForm) -> ChallengeForm {
    form.clone()
}

fn submission(code: &str) -> HashMap<String, String> {
    HashMap::from([(EMAIL_CODE_FIELD.to_string(), code.to_string())])
}

#[tokio::test]
async fn test_full_verification_lifecycle() {
    let user = UserSnapshot::new("jane.doe@example.com");
    let context = AttemptContext::new(user.id, RealmSettings::new("acme", true));
    let users = Arc::new(MockUserRepository::with_user(user).await);
    let notes = Arc::new(MockAuthNoteStore::new());
    let outbox = Arc::new(Outbox::default());
    let events = Arc::new(MockEventSink::new());
    let config = VerificationConfig::default()
        .with_code_length(6)
        .with_code_symbols("0123456789");

    let flow = VerificationCodeFlow::from_config(
        users.clone(),
        notes.clone(),
        outbox.clone(),
        events.clone(),
        &config,
    )
    .expect("valid configuration");

    // Login starts: the realm requires verification
    let state = flow.evaluate_trigger(&context).await.unwrap();
    assert_eq!(state, VerificationState::PendingIssuance);

    // The host asks for the challenge
    let outcome = flow.challenge(&context, &render).await.unwrap();
    assert_eq!(outcome.state(), VerificationState::CodeIssued);
    let code = outbox.last_code().expect("code emailed");
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));

    // A typo first
    let wrong = if code == "000000" { "111111" } else { "000000" };
    let outcome = flow
        .process_submission(&context, &submission(wrong), &render)
        .await
        .unwrap();
    let form = outcome.into_challenge().expect("form shown again");
    assert_eq!(
        form.field_error(EMAIL_CODE_FIELD),
        Some(error_codes::INVALID_CODE)
    );

    // Then the right code
    let outcome = flow
        .process_submission(&context, &submission(&code), &render)
        .await
        .unwrap();
    assert_eq!(outcome, FlowOutcome::Success);

    let user = users.get(context.user_id).await.unwrap();
    assert!(user.email_verified);
    assert!(user.has_required_action(VERIFY_EMAIL_CODE));
    assert!(notes
        .get_note(context.attempt_id, VERIFY_EMAIL_CODE)
        .await
        .unwrap()
        .is_none());

    let kinds: Vec<(VerificationEventType, bool)> = events
        .events()
        .await
        .iter()
        .map(|e| (e.event_type, e.outcome.is_success()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (VerificationEventType::SendVerifyEmail, true),
            (VerificationEventType::VerifyEmail, false),
            (VerificationEventType::VerifyEmail, true),
        ]
    );

    // A later login for the same user is not challenged again
    let next = AttemptContext::new(context.user_id, context.realm.clone());
    assert_eq!(
        flow.evaluate_trigger(&next).await.unwrap(),
        VerificationState::NotRequired
    );
    assert_eq!(
        flow.challenge(&next, &render).await.unwrap(),
        FlowOutcome::Success
    );
    assert_eq!(outbox.len(), 1);
}

#[tokio::test]
async fn test_concurrent_matching_submissions_consume_once() {
    let user = UserSnapshot::new("race@example.com");
    let context = AttemptContext::new(user.id, RealmSettings::new("acme", true));
    let users = Arc::new(MockUserRepository::with_user(user).await);
    let notes = Arc::new(MockAuthNoteStore::new());
    let outbox = Arc::new(Outbox::default());
    let events = Arc::new(MockEventSink::new());
    let flow = VerificationCodeFlow::from_config(
        users.clone(),
        notes,
        outbox.clone(),
        events.clone(),
        &VerificationConfig::default(),
    )
    .unwrap();

    flow.challenge(&context, &render).await.unwrap();
    let form = submission(&outbox.last_code().unwrap());

    let (first, second) = tokio::join!(
        flow.process_submission(&context, &form, &render),
        flow.process_submission(&context, &form, &render),
    );
    let outcomes = [first.unwrap(), second.unwrap()];

    assert!(outcomes.iter().any(FlowOutcome::is_success));
    assert!(users.get(context.user_id).await.unwrap().email_verified);

    let confirmations = events
        .events_of(VerificationEventType::VerifyEmail)
        .await
        .into_iter()
        .filter(|e| e.outcome.is_success())
        .count();
    assert_eq!(confirmations, 1);
}

#[tokio::test]
async fn test_invalid_configuration_is_rejected_at_construction() {
    let empty_alphabet = VerificationConfig::default().with_code_symbols("");

    let result = VerificationCodeFlow::from_config(
        Arc::new(MockUserRepository::new()),
        Arc::new(MockAuthNoteStore::new()),
        Arc::new(Outbox::default()),
        Arc::new(NoOpEventSink),
        &empty_alphabet,
    );

    let err = result.err().expect("configuration rejected");
    assert_eq!(err.to_string(), "Code alphabet must contain at least one symbol");
}
