//! Main verification flow implementation

use std::sync::Arc;

use uuid::Uuid;

use emailcode_shared::config::verification::{CONFIG_CODE_LENGTH, CONFIG_CODE_SYMBOLS};
use emailcode_shared::email::mask_email;
use emailcode_shared::VerificationConfig;

use crate::domain::entities::{
    error_codes, UserSnapshot, VerificationCode, VerificationEvent, VerificationEventType,
    DETAIL_EMAIL, EMAIL_CODE_FIELD, VERIFY_EMAIL_CODE,
};
use crate::domain::value_objects::{AttemptContext, ChallengeForm, FlowOutcome, VerificationState};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AuthNoteStore, EventSink, NoOpEventSink, UserRepository};

use super::config::VerificationCodeConfig;
use super::traits::{ChallengeRenderer, EmailDispatcherTrait, FormData};
use super::transitions::{self, ChallengePlan, SubmissionVerdict};
use super::types::{OperationalInfo, VerificationEmail};

/// Human-readable name of the required action
pub const DISPLAY_TEXT: &str = "Verify Email by code";

/// Required action that verifies a user's email with an emailed code
///
/// One instance serves every attempt; per-attempt state lives in the note
/// store under `VERIFY_EMAIL_CODE`.
pub struct VerificationCodeFlow<U, N, D, E = NoOpEventSink>
where
    U: UserRepository + ?Sized,
    N: AuthNoteStore + ?Sized,
    D: EmailDispatcherTrait + ?Sized,
    E: EventSink + ?Sized,
{
    /// User lookups and status updates
    users: Arc<U>,
    /// Attempt notes holding the outstanding code
    notes: Arc<N>,
    /// Email delivery
    dispatcher: Arc<D>,
    /// Write-only event side channel
    events: Arc<E>,
    /// Code length and alphabet
    config: VerificationCodeConfig,
}

impl<U, N, D, E> VerificationCodeFlow<U, N, D, E>
where
    U: UserRepository + ?Sized,
    N: AuthNoteStore + ?Sized,
    D: EmailDispatcherTrait + ?Sized,
    E: EventSink + ?Sized,
{
    /// Create a new verification flow
    ///
    /// # Arguments
    ///
    /// * `users` - User repository implementation
    /// * `notes` - Attempt-note store implementation
    /// * `dispatcher` - Email dispatcher implementation
    /// * `events` - Event sink implementation
    /// * `config` - Validated code configuration
    pub fn new(
        users: Arc<U>,
        notes: Arc<N>,
        dispatcher: Arc<D>,
        events: Arc<E>,
        config: VerificationCodeConfig,
    ) -> Self {
        tracing::debug!(
            code_length = config.code_length(),
            alphabet_size = config.alphabet().len(),
            "Verification code flow initialised"
        );

        Self {
            users,
            notes,
            dispatcher,
            events,
            config,
        }
    }

    /// Create a flow from raw configuration, rejecting invalid values
    ///
    /// # Returns
    ///
    /// * `Err(DomainError::Config)` - If the length is zero or the alphabet empty
    pub fn from_config(
        users: Arc<U>,
        notes: Arc<N>,
        dispatcher: Arc<D>,
        events: Arc<E>,
        config: &VerificationConfig,
    ) -> DomainResult<Self> {
        let config = VerificationCodeConfig::try_from(config)?;
        Ok(Self::new(users, notes, dispatcher, events, config))
    }

    /// Identifier of the required action
    pub fn id(&self) -> &'static str {
        VERIFY_EMAIL_CODE
    }

    pub fn display_text(&self) -> &'static str {
        DISPLAY_TEXT
    }

    pub fn config(&self) -> &VerificationCodeConfig {
        &self.config
    }

    /// Decide whether the user must verify their email in this attempt
    ///
    /// When the realm enforces verification and the user is unverified, the
    /// `VERIFY_EMAIL_CODE` required action is added to the user. No code is
    /// issued here.
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationState::PendingIssuance)` - The required action was added
    /// * `Ok(VerificationState::NotRequired)` - Nothing to do
    /// * `Err(DomainError)` - If the user cannot be loaded or updated
    pub async fn evaluate_trigger(&self, context: &AttemptContext) -> DomainResult<VerificationState> {
        if !context.realm.verify_email {
            return Ok(VerificationState::NotRequired);
        }

        let user = self.load_user(context.user_id).await?;
        let state = transitions::evaluate_trigger(context.realm.verify_email, user.email_verified);

        if state == VerificationState::PendingIssuance {
            self.users
                .add_required_action(user.id, VERIFY_EMAIL_CODE)
                .await?;
            tracing::debug!(
                user_id = %user.id,
                realm = %context.realm.name,
                event = "verification_required",
                "User is required to verify email"
            );
        }

        Ok(state)
    }

    /// Present the code challenge to the user
    ///
    /// This method:
    /// 1. Succeeds immediately for verified users, clearing any stored code
    /// 2. Skips the step for users without an email address
    /// 3. Otherwise issues a new code, stores it, emails it and renders the form
    ///
    /// A failed send does not fail the challenge: the form carries the
    /// `email_send_failed` error instead.
    ///
    /// # Returns
    ///
    /// * `Ok(FlowOutcome)` - Success, Ignored, or the rendered challenge
    /// * `Err(DomainError)` - If the user or the note store is unavailable
    pub async fn challenge<R>(
        &self,
        context: &AttemptContext,
        renderer: &R,
    ) -> DomainResult<FlowOutcome<R::Response>>
    where
        R: ChallengeRenderer,
    {
        let user = self.load_user(context.user_id).await?;
        self.challenge_user(context, user, renderer).await
    }

    /// Check a submitted code
    ///
    /// The submitted value is read from the `email_code` field. On a match the
    /// stored code is consumed before the user is marked verified, so a code
    /// can confirm at most one submission. A mismatch keeps the stored code and
    /// re-renders the form with a field error. Without a stored code the
    /// challenge starts over.
    ///
    /// # Returns
    ///
    /// * `Ok(FlowOutcome)` - Success, or a challenge to show again
    /// * `Err(DomainError)` - If a collaborator fails
    pub async fn process_submission<R, F>(
        &self,
        context: &AttemptContext,
        form_data: &F,
        renderer: &R,
    ) -> DomainResult<FlowOutcome<R::Response>>
    where
        R: ChallengeRenderer,
        F: FormData + ?Sized,
    {
        let user = self.load_user(context.user_id).await?;
        let stored = self
            .notes
            .get_note(context.attempt_id, VERIFY_EMAIL_CODE)
            .await?;
        let submitted = form_data.get_field(EMAIL_CODE_FIELD);

        match transitions::judge_submission(stored.as_deref(), submitted) {
            SubmissionVerdict::NoCodeIssued => {
                tracing::debug!(
                    attempt_id = %context.attempt_id,
                    event = "code_missing",
                    "No code stored for attempt, issuing a new challenge"
                );
                self.challenge_user(context, user, renderer).await
            }
            SubmissionVerdict::Mismatch => {
                tracing::warn!(
                    user_id = %user.id,
                    attempt_id = %context.attempt_id,
                    email = %mask_email(user.email_or_empty()),
                    code_submitted = submitted.is_some(),
                    event = "code_mismatch",
                    "Invalid verification code submitted"
                );
                let event = self
                    .event(VerificationEventType::VerifyEmail, context, &user)
                    .error(error_codes::INVALID_CODE);
                self.record(event).await;

                let form = ChallengeForm::new(user)
                    .with_field_error(EMAIL_CODE_FIELD, error_codes::INVALID_CODE);
                Ok(FlowOutcome::Challenge(renderer.render(&form)))
            }
            SubmissionVerdict::Match => {
                let consumed = match stored.as_deref() {
                    Some(code) => {
                        self.notes
                            .remove_note_if_eq(context.attempt_id, VERIFY_EMAIL_CODE, code)
                            .await?
                    }
                    None => false,
                };

                if !consumed {
                    // Another submission consumed the code first
                    tracing::debug!(
                        attempt_id = %context.attempt_id,
                        event = "code_already_consumed",
                        "Verification code consumed concurrently"
                    );
                    let user = self.load_user(context.user_id).await?;
                    return self.challenge_user(context, user, renderer).await;
                }

                self.users.set_email_verified(user.id, true).await?;
                tracing::info!(
                    user_id = %user.id,
                    attempt_id = %context.attempt_id,
                    email = %mask_email(user.email_or_empty()),
                    event = "email_verified",
                    "Email verified by code"
                );
                let event = self
                    .event(VerificationEventType::VerifyEmail, context, &user)
                    .success();
                self.record(event).await;

                Ok(FlowOutcome::Success)
            }
        }
    }

    /// Configuration as reported to the host's server-info page
    pub fn operational_info(&self) -> OperationalInfo {
        let mut info = OperationalInfo::new();
        info.insert(
            format!("{}.{}", VERIFY_EMAIL_CODE, CONFIG_CODE_LENGTH),
            self.config.code_length().to_string(),
        );
        info.insert(
            format!("{}.{}", VERIFY_EMAIL_CODE, CONFIG_CODE_SYMBOLS),
            self.config.code_symbols().to_string(),
        );
        info
    }

    async fn challenge_user<R>(
        &self,
        context: &AttemptContext,
        user: UserSnapshot,
        renderer: &R,
    ) -> DomainResult<FlowOutcome<R::Response>>
    where
        R: ChallengeRenderer,
    {
        match transitions::plan_challenge(&user) {
            ChallengePlan::AlreadyVerified => {
                self.notes
                    .remove_note(context.attempt_id, VERIFY_EMAIL_CODE)
                    .await?;
                tracing::debug!(
                    user_id = %user.id,
                    event = "already_verified",
                    "Email already verified, clearing stored code"
                );
                Ok(FlowOutcome::Success)
            }
            ChallengePlan::MissingEmail => {
                tracing::debug!(
                    user_id = %user.id,
                    event = "verification_ignored",
                    "User has no email address, skipping verification"
                );
                Ok(FlowOutcome::Ignored)
            }
            ChallengePlan::IssueCode { recipient } => {
                self.issue_code(context, user, recipient, renderer).await
            }
        }
    }

    async fn issue_code<R>(
        &self,
        context: &AttemptContext,
        user: UserSnapshot,
        recipient: String,
        renderer: &R,
    ) -> DomainResult<FlowOutcome<R::Response>>
    where
        R: ChallengeRenderer,
    {
        let code = VerificationCode::generate(self.config.code_length(), self.config.alphabet());

        // Overwrites any code issued earlier in this attempt
        self.notes
            .set_note(context.attempt_id, VERIFY_EMAIL_CODE, code.as_str())
            .await
            .map_err(|e| {
                tracing::error!(
                    attempt_id = %context.attempt_id,
                    error = %e,
                    event = "code_storage_failed",
                    "Failed to store verification code"
                );
                e
            })?;

        tracing::info!(
            user_id = %user.id,
            attempt_id = %context.attempt_id,
            email = %mask_email(&recipient),
            event = "code_issued",
            "Issued new verification code"
        );

        let email = VerificationEmail::with_code(context, recipient.as_str(), &code);
        let event = self.event(VerificationEventType::SendVerifyEmail, context, &user);
        let mut form = ChallengeForm::new(user);

        match self.dispatcher.send_verification_email(&email).await {
            Ok(message_id) => {
                tracing::info!(
                    attempt_id = %context.attempt_id,
                    email = %mask_email(&recipient),
                    message_id = %message_id,
                    event = "verification_email_sent",
                    "Verification email sent"
                );
                self.record(event.success()).await;
            }
            Err(e) => {
                tracing::error!(
                    attempt_id = %context.attempt_id,
                    email = %mask_email(&recipient),
                    error = %e,
                    event = "verification_email_failed",
                    "Failed to send verification email"
                );
                self.record(event.error(error_codes::EMAIL_SEND_FAILED)).await;
                form = form.with_error(error_codes::EMAIL_SEND_FAILED);
            }
        }

        Ok(FlowOutcome::Challenge(renderer.render(&form)))
    }

    async fn load_user(&self, user_id: Uuid) -> DomainResult<UserSnapshot> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("User {}", user_id),
            })
    }

    fn event(
        &self,
        event_type: VerificationEventType,
        context: &AttemptContext,
        user: &UserSnapshot,
    ) -> VerificationEvent {
        VerificationEvent::new(event_type, user.id, context.attempt_id)
            .with_realm(context.realm.name.as_str())
            .with_detail(DETAIL_EMAIL, user.email_or_empty())
    }

    async fn record(&self, event: VerificationEvent) {
        if let Err(e) = self.events.record(&event).await {
            tracing::warn!(
                event_type = %event.event_type,
                attempt_id = %event.attempt_id,
                error = %e,
                event = "event_record_failed",
                "Failed to record verification event"
            );
        }
    }
}
