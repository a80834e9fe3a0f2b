//! Resend policy: cooldown between issuances and the rolling-window cap.
//!
//! The rolling window is evaluated lazily from `now` against the prior
//! record's `last_sent_at`; no scheduler is involved. Expired and used
//! records still carry their `send_count` into the window so expiry cannot
//! be used to sidestep the cap.

use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::VerificationRecord;
use crate::errors::CredentialError;

use super::config::VerificationConfig;

/// Gates an issuance against the prior record for the (account, purpose)
/// pair and computes the send count carried into the new record
///
/// # Returns
///
/// * `Ok(i32)` - The effective send count before this issuance; the new
///   record stores this value plus one
/// * `Err(CredentialError)` - Cooldown active or rolling-window cap reached
pub fn gate_issuance(
    prior: Option<&VerificationRecord>,
    config: &VerificationConfig,
    now: DateTime<Utc>,
) -> Result<i32, CredentialError> {
    let Some(prior) = prior else {
        return Ok(0);
    };

    let since_last_send = now - prior.last_sent_at;

    // Cooldown applies only while the prior code is still live
    if prior.is_live() {
        let cooldown = Duration::seconds(config.resend_cooldown_seconds);
        if since_last_send < cooldown {
            return Err(CredentialError::ResendCooldown {
                seconds_remaining: (cooldown - since_last_send).num_seconds().max(1),
            });
        }
    }

    let window = Duration::minutes(config.resend_window_minutes);
    let effective_send_count = if since_last_send >= window {
        // Rolling window elapsed, the count starts over
        0
    } else {
        prior.send_count
    };

    if effective_send_count >= config.max_sends_per_window {
        return Err(CredentialError::ResendLimitExceeded {
            minutes: (window - since_last_send).num_minutes().max(1),
        });
    }

    Ok(effective_send_count)
}
