//! # Email Code Core
//!
//! Core domain layer for the verify-email-by-code required action.
//! This crate contains the verification code entity, the collaborator
//! ports (repository and service traits), the pure transition functions
//! and the `VerificationCodeFlow` service that drives the code lifecycle.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
