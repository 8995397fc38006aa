//! # Infrastructure Layer
//!
//! Concrete adapters for the ports of the verification flow:
//!
//! - **Cache**: Redis client and the Redis-backed attempt-note store, plus an
//!   expiring in-memory store for single-process deployments
//! - **Email**: HTTP (Postmark-compatible) and mock email dispatchers
//! - **Events**: tracing-backed event sink
//!
//! [`initialize`] wires everything from environment configuration.

use std::sync::Arc;

use emailcode_core::errors::{DomainError, DomainResult};
use emailcode_core::repositories::UserRepository;
use emailcode_core::services::verification::{EmailDispatcherTrait, VerificationCodeFlow};
use emailcode_shared::telemetry::{init_tracing, TelemetryError};
use emailcode_shared::AppConfig;

/// Cache module - Redis client and attempt-note stores
pub mod cache;

/// Email module - verification email dispatchers
pub mod email;

/// Events module - event sinks
pub mod events;

use cache::{RedisAuthNoteStore, RedisClient};
use events::TracingEventSink;

/// Verification flow assembled from the production adapters
pub type AppVerificationFlow<U> =
    VerificationCodeFlow<U, RedisAuthNoteStore, dyn EmailDispatcherTrait, TracingEventSink>;

/// Initialised infrastructure adapters
#[derive(Clone)]
pub struct Infrastructure {
    pub config: AppConfig,
    pub notes: Arc<RedisAuthNoteStore>,
    pub dispatcher: Arc<dyn EmailDispatcherTrait>,
    pub events: Arc<TracingEventSink>,
}

impl Infrastructure {
    /// Build the verification flow on top of these adapters
    ///
    /// Fails if the configured code length or alphabet is invalid.
    pub fn verification_flow<U>(&self, users: Arc<U>) -> DomainResult<AppVerificationFlow<U>>
    where
        U: UserRepository,
    {
        VerificationCodeFlow::from_config(
            users,
            self.notes.clone(),
            self.dispatcher.clone(),
            self.events.clone(),
            &self.config.verification,
        )
    }
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - Tracing, unless a subscriber is already installed
/// - The Redis connection for attempt notes
/// - The email dispatcher selected by `EMAIL_PROVIDER`
pub async fn initialize() -> anyhow::Result<Infrastructure> {
    let config = load_config();

    match init_tracing(&config.logging) {
        Ok(()) | Err(TelemetryError::AlreadyInitialized(_)) => {}
        Err(e) => return Err(e.into()),
    }

    tracing::info!(
        environment = ?config.environment,
        "Initializing infrastructure services..."
    );

    let redis = RedisClient::new(config.cache.clone()).await?;
    let notes = Arc::new(RedisAuthNoteStore::new(redis, config.cache.note_ttl));
    let dispatcher = email::create_email_dispatcher(&config.email)?;
    let events = Arc::new(TracingEventSink::new());

    tracing::info!("Infrastructure services initialized successfully");

    Ok(Infrastructure {
        config,
        notes,
        dispatcher,
        events,
    })
}

/// Load configuration from the environment, reading `.env` if present
pub fn load_config() -> AppConfig {
    dotenvy::dotenv().ok();
    AppConfig::from_env()
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}
