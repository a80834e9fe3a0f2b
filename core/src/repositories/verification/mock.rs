//! In-memory verification record repository for tests and local development.
//!
//! The backing map is exposed so tests can rewind `last_sent_at` or
//! `expires_at` instead of sleeping through cooldown windows.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::{VerificationPurpose, VerificationRecord};
use crate::errors::{CredentialError, DomainError};

use super::r#trait::VerificationRepository;

/// In-memory implementation of [`VerificationRepository`]
#[derive(Default)]
pub struct MockVerificationRepository {
    pub records: Arc<Mutex<HashMap<(Uuid, VerificationPurpose), VerificationRecord>>>,
}

impl MockVerificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutate the stored record for a pair, for timestamp rewinding in tests
    pub fn with_record_mut<F>(&self, account_id: Uuid, purpose: VerificationPurpose, f: F)
    where
        F: FnOnce(&mut VerificationRecord),
    {
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.get_mut(&(account_id, purpose)) {
            f(record);
        }
    }
}

#[async_trait]
impl VerificationRepository for MockVerificationRepository {
    async fn find(
        &self,
        account_id: Uuid,
        purpose: VerificationPurpose,
    ) -> Result<Option<VerificationRecord>, DomainError> {
        let records = self.records.lock().unwrap();
        Ok(records.get(&(account_id, purpose)).cloned())
    }

    async fn replace(&self, record: VerificationRecord) -> Result<(), DomainError> {
        let mut records = self.records.lock().unwrap();
        records.insert((record.account_id, record.purpose), record);
        Ok(())
    }

    async fn record_failed_attempt(&self, id: Uuid) -> Result<i32, DomainError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .values_mut()
            .find(|r| r.id == id)
            .ok_or(DomainError::Credential(
                CredentialError::NoPendingVerification,
            ))?;
        record.attempts += 1;
        Ok(record.attempts)
    }

    async fn mark_used(&self, id: Uuid) -> Result<(), DomainError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .values_mut()
            .find(|r| r.id == id)
            .ok_or(DomainError::Credential(
                CredentialError::NoPendingVerification,
            ))?;
        record.is_used = true;
        Ok(())
    }

    async fn delete(
        &self,
        account_id: Uuid,
        purpose: VerificationPurpose,
    ) -> Result<bool, DomainError> {
        let mut records = self.records.lock().unwrap();
        Ok(records.remove(&(account_id, purpose)).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::verification_record::DEFAULT_CODE_TTL_MINUTES;

    fn record(account_id: Uuid) -> VerificationRecord {
        VerificationRecord::new(
            account_id,
            VerificationPurpose::PasswordReset,
            None,
            "aGFzaA==".to_string(),
            DEFAULT_CODE_TTL_MINUTES,
            1,
        )
    }

    #[tokio::test]
    async fn test_replace_supersedes_prior_record() {
        let repo = MockVerificationRepository::new();
        let account_id = Uuid::new_v4();

        let first = record(account_id);
        repo.replace(first.clone()).await.unwrap();

        let second = record(account_id);
        repo.replace(second.clone()).await.unwrap();

        let stored = repo
            .find(account_id, VerificationPurpose::PasswordReset)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, second.id);
        assert_ne!(stored.id, first.id);
    }

    #[tokio::test]
    async fn test_record_failed_attempt_increments() {
        let repo = MockVerificationRepository::new();
        let record = record(Uuid::new_v4());
        let id = record.id;
        repo.replace(record).await.unwrap();

        assert_eq!(repo.record_failed_attempt(id).await.unwrap(), 1);
        assert_eq!(repo.record_failed_attempt(id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_mark_used_and_delete() {
        let repo = MockVerificationRepository::new();
        let account_id = Uuid::new_v4();
        let record = record(account_id);
        let id = record.id;
        repo.replace(record).await.unwrap();

        repo.mark_used(id).await.unwrap();
        let stored = repo
            .find(account_id, VerificationPurpose::PasswordReset)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.is_used);

        assert!(repo
            .delete(account_id, VerificationPurpose::PasswordReset)
            .await
            .unwrap());
        assert!(!repo
            .delete(account_id, VerificationPurpose::PasswordReset)
            .await
            .unwrap());
    }
}
