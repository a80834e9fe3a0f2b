//! Types for verification flow results.

use chrono::{DateTime, Utc};

/// Result of issuing a verification code
///
/// Carries the raw code so the caller can compose the notification; the
/// code must never be persisted or logged beyond that.
#[derive(Debug, Clone)]
pub struct IssuedCode {
    /// The raw 6-digit code, for notification composition only
    pub code: String,
    /// When the code expires
    pub expires_at: DateTime<Utc>,
    /// When the user may request another code
    pub next_resend_at: DateTime<Utc>,
}
