//! Verification record entity backing the one-time-code flows.
//!
//! One record exists per (account, purpose) pair at most; a new issuance
//! always supersedes the previous record. Only the HMAC of the code is
//! stored, never the raw code.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of failed verification attempts allowed
pub const MAX_ATTEMPTS: i32 = 5;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (15 minutes)
pub const DEFAULT_CODE_TTL_MINUTES: i64 = 15;

/// The purpose a verification code was issued for
///
/// The purpose scopes the rate-limit and uniqueness rules: an account can
/// hold one live code per purpose, and a code issued for one purpose never
/// validates for another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationPurpose {
    /// Email verification at registration
    EmailVerification,
    /// Confirmation of a new email address
    EmailChange,
    /// Password reset
    PasswordReset,
}

impl VerificationPurpose {
    /// Stable string form, used as the discriminator in storage and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationPurpose::EmailVerification => "email_verification",
            VerificationPurpose::EmailChange => "email_change",
            VerificationPurpose::PasswordReset => "password_reset",
        }
    }
}

/// Verification record for a single issued code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Account the code was issued for
    pub account_id: Uuid,

    /// Flow this code belongs to
    pub purpose: VerificationPurpose,

    /// Purpose-specific payload bound into the code hash
    /// (the target new email for an email change, absent otherwise)
    pub payload: Option<String>,

    /// Keyed hash of the code; the raw code is never persisted
    pub code_hash: String,

    /// Absolute expiry of the code
    pub expires_at: DateTime<Utc>,

    /// Number of failed verification attempts against this record
    pub attempts: i32,

    /// Number of codes issued within the current rate-limit window
    pub send_count: i32,

    /// Timestamp of the most recent issuance
    pub last_sent_at: DateTime<Utc>,

    /// Whether the code has been successfully consumed
    pub is_used: bool,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// Creates a new verification record for a freshly issued code
    ///
    /// # Arguments
    ///
    /// * `account_id` - Account the code is issued for
    /// * `purpose` - Flow the code belongs to
    /// * `payload` - Purpose-specific payload, if any
    /// * `code_hash` - Keyed hash of the raw code
    /// * `ttl_minutes` - Minutes until the code expires
    /// * `send_count` - Issuance count within the current window, including
    ///   this issuance
    pub fn new(
        account_id: Uuid,
        purpose: VerificationPurpose,
        payload: Option<String>,
        code_hash: String,
        ttl_minutes: i64,
        send_count: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            account_id,
            purpose,
            payload,
            code_hash,
            expires_at: now + Duration::minutes(ttl_minutes),
            attempts: 0,
            send_count,
            last_sent_at: now,
            is_used: false,
            created_at: now,
        }
    }

    /// Checks if the code has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the record is live: not expired and not yet consumed
    ///
    /// Only live records participate in the resend cooldown; expired or
    /// used records still carry their `send_count` into the rolling window.
    pub fn is_live(&self) -> bool {
        !self.is_expired() && !self.is_used
    }

    /// Checks if the failed-attempt budget has been exhausted
    pub fn attempts_exhausted(&self, max_attempts: i32) -> bool {
        self.attempts >= max_attempts
    }

    /// Gets the number of remaining verification attempts
    pub fn remaining_attempts(&self, max_attempts: i32) -> i32 {
        (max_attempts - self.attempts).max(0)
    }
}
