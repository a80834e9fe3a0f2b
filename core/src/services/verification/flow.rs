//! Purpose-generic verification flow.
//!
//! One state machine serves all three purposes (registration verification,
//! email change, password reset): issue gates on the resend policy and
//! supersedes the prior record, check walks the failure ladder in a fixed
//! order, and consume marks the record used so a replayed code is rejected
//! as already used.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::{VerificationPurpose, VerificationRecord};
use crate::errors::{CredentialError, DomainResult, ValidationError};
use crate::repositories::VerificationRepository;

use super::code::{generate_code, is_well_formed};
use super::config::VerificationConfig;
use super::hasher::CodeHasher;
use super::policy::gate_issuance;
use super::types::IssuedCode;

/// Generic issue/check/consume machine over a verification store
pub struct VerificationFlow<V: VerificationRepository> {
    store: Arc<V>,
    hasher: CodeHasher,
    config: VerificationConfig,
}

impl<V: VerificationRepository> VerificationFlow<V> {
    /// Create a new verification flow
    ///
    /// # Arguments
    ///
    /// * `store` - Verification record repository
    /// * `hasher` - Keyed code hasher, constructed with the server secret
    /// * `config` - Flow configuration (TTL, attempt budget, resend policy)
    pub fn new(store: Arc<V>, hasher: CodeHasher, config: VerificationConfig) -> Self {
        Self {
            store,
            hasher,
            config,
        }
    }

    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// Look up the pending record for an (account, purpose) pair
    ///
    /// Used by callers that need record state (e.g. the email-change
    /// payload) before running `check`.
    pub async fn pending(
        &self,
        account_id: Uuid,
        purpose: VerificationPurpose,
    ) -> DomainResult<Option<VerificationRecord>> {
        self.store.find(account_id, purpose).await
    }

    /// Issue a fresh code for an (account, purpose) pair
    ///
    /// Gates on the resend cooldown and the rolling-window cap, then
    /// supersedes any prior record for the pair. The raw code is returned
    /// for notification composition and exists nowhere else.
    ///
    /// # Arguments
    ///
    /// * `account_id` - Account the code is issued for
    /// * `purpose` - Flow the code belongs to
    /// * `binding_key` - Identity bound into the code hash (e.g. the target
    ///   email address)
    /// * `payload` - Purpose-specific payload stored on the record
    pub async fn issue(
        &self,
        account_id: Uuid,
        purpose: VerificationPurpose,
        binding_key: &str,
        payload: Option<String>,
    ) -> DomainResult<IssuedCode> {
        let now = Utc::now();
        let prior = self.store.find(account_id, purpose).await?;

        let effective_send_count =
            gate_issuance(prior.as_ref(), &self.config, now).map_err(|e| {
                tracing::warn!(
                    account_id = %account_id,
                    purpose = purpose.as_str(),
                    event = "otp_issue_rate_limited",
                    "Verification code issuance rejected by resend policy"
                );
                e
            })?;

        let code = generate_code();
        let code_hash = self.hasher.hash(binding_key, &code);
        let record = VerificationRecord::new(
            account_id,
            purpose,
            payload,
            code_hash,
            self.config.code_ttl_minutes,
            effective_send_count + 1,
        );
        let expires_at = record.expires_at;

        self.store.replace(record).await?;

        tracing::info!(
            account_id = %account_id,
            purpose = purpose.as_str(),
            send_count = effective_send_count + 1,
            event = "otp_issued",
            "Issued new verification code"
        );

        Ok(IssuedCode {
            code,
            expires_at,
            next_resend_at: now + Duration::seconds(self.config.resend_cooldown_seconds),
        })
    }

    /// Check a submitted code for an (account, purpose) pair
    ///
    /// The failure ladder runs in a fixed order: code shape (no attempt
    /// charged), record presence, used flag, expiry (the expired record is
    /// deleted on observation), attempt budget (checked before the hash
    /// compare), then the constant-time hash comparison. A mismatch
    /// increments the attempt counter atomically in the store.
    ///
    /// On success the validated record is returned without being consumed;
    /// the caller applies the purpose-specific side effect and then calls
    /// [`consume`](Self::consume).
    pub async fn check(
        &self,
        account_id: Uuid,
        purpose: VerificationPurpose,
        binding_key: &str,
        submitted_code: &str,
    ) -> DomainResult<VerificationRecord> {
        if !is_well_formed(submitted_code) {
            return Err(ValidationError::InvalidCodeFormat {
                expected_length: crate::domain::entities::verification_record::CODE_LENGTH,
            }
            .into());
        }

        let record = self
            .store
            .find(account_id, purpose)
            .await?
            .ok_or(CredentialError::NoPendingVerification)?;

        if record.is_used {
            return Err(CredentialError::VerificationCodeAlreadyUsed.into());
        }

        if record.is_expired() {
            // Self-cleaning: an expired record can never validate again
            self.store.delete(account_id, purpose).await?;
            tracing::info!(
                account_id = %account_id,
                purpose = purpose.as_str(),
                event = "otp_expired",
                "Rejected and deleted expired verification code"
            );
            return Err(CredentialError::VerificationCodeExpired.into());
        }

        if record.attempts_exhausted(self.config.max_attempts) {
            return Err(CredentialError::MaxAttemptsExceeded.into());
        }

        if !self
            .hasher
            .verify(binding_key, submitted_code, &record.code_hash)
        {
            let attempts = self.store.record_failed_attempt(record.id).await?;
            let remaining = (self.config.max_attempts - attempts).max(0);
            tracing::warn!(
                account_id = %account_id,
                purpose = purpose.as_str(),
                remaining_attempts = remaining,
                event = "otp_check_failed",
                "Verification code mismatch"
            );
            return Err(CredentialError::InvalidVerificationCode {
                remaining_attempts: remaining,
            }
            .into());
        }

        tracing::info!(
            account_id = %account_id,
            purpose = purpose.as_str(),
            event = "otp_check_succeeded",
            "Verification code accepted"
        );

        Ok(record)
    }

    /// Consume a validated record, making success terminal
    ///
    /// A consumed record stays in the store flagged used until the next
    /// issuance supersedes it, so replaying the same code yields an
    /// already-used rejection rather than a silent not-found.
    pub async fn consume(&self, record: &VerificationRecord) -> DomainResult<()> {
        self.store.mark_used(record.id).await?;
        tracing::info!(
            account_id = %record.account_id,
            purpose = record.purpose.as_str(),
            event = "otp_consumed",
            "Verification code consumed"
        );
        Ok(())
    }
}
