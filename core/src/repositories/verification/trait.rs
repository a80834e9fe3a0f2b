//! Verification record repository trait.
//!
//! Implementations must enforce a uniqueness constraint on
//! (account_id, purpose): `replace` supersedes any prior row for the pair
//! (delete-then-insert or upsert under that constraint), and
//! `record_failed_attempt` must increment atomically relative to the read
//! so concurrent wrong-guess submissions cannot under-count attempts.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{VerificationPurpose, VerificationRecord};
use crate::errors::DomainError;

/// Repository trait for verification record persistence
#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Find the record for an (account, purpose) pair, if any
    async fn find(
        &self,
        account_id: Uuid,
        purpose: VerificationPurpose,
    ) -> Result<Option<VerificationRecord>, DomainError>;

    /// Persist a new record, superseding any prior record for the same
    /// (account, purpose) pair
    async fn replace(&self, record: VerificationRecord) -> Result<(), DomainError>;

    /// Atomically increment the failed-attempt counter for a record
    ///
    /// # Returns
    /// * `Ok(i32)` - The attempt count after the increment
    /// * `Err(DomainError)` - Record missing or storage error
    async fn record_failed_attempt(&self, id: Uuid) -> Result<i32, DomainError>;

    /// Mark a record as used (terminal state)
    async fn mark_used(&self, id: Uuid) -> Result<(), DomainError>;

    /// Delete the record for an (account, purpose) pair
    ///
    /// # Returns
    /// * `Ok(true)` - A record existed and was deleted
    /// * `Ok(false)` - No record existed
    async fn delete(
        &self,
        account_id: Uuid,
        purpose: VerificationPurpose,
    ) -> Result<bool, DomainError>;
}
