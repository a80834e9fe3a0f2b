//! # Infrastructure Layer
//!
//! Concrete implementations of the TaskForge core's external-service
//! interfaces: SMTP mail delivery and environment-based configuration for
//! the security-sensitive settings (the code-hashing secret, bcrypt cost).

use thiserror::Error;

/// Email delivery module - SMTP transport and mock mailer
pub mod email;

/// Configuration module for infrastructure services
pub mod config;

/// Infrastructure-level errors
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Email delivery error: {0}")]
    Email(String),
}
