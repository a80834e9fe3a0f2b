//! Domain-specific error types for credential verification operations.
//!
//! Each variant is an expected, user-facing outcome; only notification
//! dispatch failures are caught and suppressed elsewhere. Variants carry
//! enough detail to act on without leaking whether an email is registered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Credential and one-time-code errors
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Invalid verification code. {remaining_attempts} attempt(s) remaining")]
    InvalidVerificationCode { remaining_attempts: i32 },

    #[error("Verification code expired. Request a new code")]
    VerificationCodeExpired,

    #[error("Verification code already used. Request a new code")]
    VerificationCodeAlreadyUsed,

    #[error("Too many failed attempts. Request a new code")]
    MaxAttemptsExceeded,

    #[error("Please wait {seconds_remaining} second(s) before requesting a new code")]
    ResendCooldown { seconds_remaining: i64 },

    #[error("Too many codes requested. Try again in {minutes} minute(s)")]
    ResendLimitExceeded { minutes: i64 },

    #[error("No pending verification. Request a new code")]
    NoPendingVerification,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Email address already registered")]
    EmailAlreadyRegistered,

    #[error("New email address matches the current one")]
    EmailUnchanged,

    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// Validation errors for request-shaped input
///
/// These are checked before any stored state is touched: a malformed code
/// never counts against the attempt budget.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid email address format")]
    InvalidEmail,

    #[error("Verification code must be exactly {expected_length} digits")]
    InvalidCodeFormat { expected_length: usize },

    #[error("Password must be at least {min_length} characters")]
    PasswordTooShort { min_length: usize },
}

/// Unified error response structure for API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl ToString, message: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a single detail to the error response
    pub fn with_detail(mut self, key: impl ToString, value: serde_json::Value) -> Self {
        let mut details = self.details.unwrap_or_default();
        details.insert(key.to_string(), value);
        self.details = Some(details);
        self
    }
}

/// Convert CredentialError to ErrorResponse
impl From<CredentialError> for ErrorResponse {
    fn from(err: CredentialError) -> Self {
        let error_code = match &err {
            CredentialError::InvalidVerificationCode { .. } => "INVALID_VERIFICATION_CODE",
            CredentialError::VerificationCodeExpired => "VERIFICATION_CODE_EXPIRED",
            CredentialError::VerificationCodeAlreadyUsed => "VERIFICATION_CODE_ALREADY_USED",
            CredentialError::MaxAttemptsExceeded => "MAX_ATTEMPTS_EXCEEDED",
            CredentialError::ResendCooldown { .. } => "RESEND_COOLDOWN",
            CredentialError::ResendLimitExceeded { .. } => "RESEND_LIMIT_EXCEEDED",
            CredentialError::NoPendingVerification => "NO_PENDING_VERIFICATION",
            CredentialError::AccountNotFound => "ACCOUNT_NOT_FOUND",
            CredentialError::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            CredentialError::EmailUnchanged => "EMAIL_UNCHANGED",
            CredentialError::InvalidCredentials => "INVALID_CREDENTIALS",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

/// Convert ValidationError to ErrorResponse
impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        let error_code = match &err {
            ValidationError::InvalidEmail => "INVALID_EMAIL",
            ValidationError::InvalidCodeFormat { .. } => "INVALID_CODE_FORMAT",
            ValidationError::PasswordTooShort { .. } => "PASSWORD_TOO_SHORT",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}
