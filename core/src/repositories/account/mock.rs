//! In-memory account repository for tests and local development.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::Account;
use crate::errors::{CredentialError, DomainError};

use super::r#trait::AccountRepository;

/// In-memory implementation of [`AccountRepository`]
#[derive(Default)]
pub struct MockAccountRepository {
    pub accounts: Arc<Mutex<Vec<Account>>>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing_account(account: Account) -> Self {
        let repo = Self::new();
        repo.accounts.lock().unwrap().push(account);
        repo
    }

    /// Snapshot of an account by id, for test assertions
    pub fn get(&self, id: Uuid) -> Option<Account> {
        self.accounts.lock().unwrap().iter().find(|a| a.id == id).cloned()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().any(|a| a.email == email))
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(DomainError::Credential(
                CredentialError::EmailAlreadyRegistered,
            ));
        }
        accounts.push(account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(existing) = accounts.iter_mut().find(|a| a.id == account.id) {
            *existing = account.clone();
            Ok(account)
        } else {
            Err(DomainError::Credential(CredentialError::AccountNotFound))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(email: &str) -> Account {
        Account::new(email.to_string(), "$2b$12$hash".to_string())
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = MockAccountRepository::new();
        let created = repo.create(account("user@example.com")).await.unwrap();

        let by_id = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(by_id, Some(created.clone()));

        let by_email = repo.find_by_email("user@example.com").await.unwrap();
        assert_eq!(by_email, Some(created));

        assert!(repo.exists_by_email("user@example.com").await.unwrap());
        assert!(!repo.exists_by_email("other@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_duplicate_email_rejected() {
        let repo = MockAccountRepository::new();
        repo.create(account("user@example.com")).await.unwrap();

        let result = repo.create(account("user@example.com")).await;
        assert!(matches!(
            result,
            Err(DomainError::Credential(
                CredentialError::EmailAlreadyRegistered
            ))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_account() {
        let repo = MockAccountRepository::new();
        let result = repo.update(account("user@example.com")).await;
        assert!(matches!(
            result,
            Err(DomainError::Credential(CredentialError::AccountNotFound))
        ));
    }
}
