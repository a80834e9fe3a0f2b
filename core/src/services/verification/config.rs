//! Configuration for the verification flow.

use crate::domain::entities::verification_record::{DEFAULT_CODE_TTL_MINUTES, MAX_ATTEMPTS};

/// Configuration for the verification flow
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Number of minutes before a verification code expires
    pub code_ttl_minutes: i64,
    /// Maximum number of failed verification attempts allowed
    pub max_attempts: i32,
    /// Minimum seconds between code issuances for the same account+purpose
    pub resend_cooldown_seconds: i64,
    /// Length of the rolling window capping issuances, in minutes
    pub resend_window_minutes: i64,
    /// Maximum issuances within one rolling window
    pub max_sends_per_window: i32,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: DEFAULT_CODE_TTL_MINUTES,
            max_attempts: MAX_ATTEMPTS,
            resend_cooldown_seconds: 60,
            resend_window_minutes: 60,
            max_sends_per_window: 5,
        }
    }
}
