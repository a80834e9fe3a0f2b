//! # TaskForge Core
//!
//! Core business logic and domain layer for the TaskForge backend.
//! This crate contains the credential-verification domain: account and
//! verification-record entities, repository interfaces, the one-time-code
//! lifecycle services, and the error types shared across the backend.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
