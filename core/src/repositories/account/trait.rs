//! Account repository trait defining the interface for account persistence.
//!
//! The trait is async-first and keeps the abstraction boundary between the
//! domain and the storage layer. Implementations must enforce a uniqueness
//! constraint on the (lowercased) email column.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Account;
use crate::errors::DomainError;

/// Repository trait for Account entity persistence operations
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with the given id
    /// * `Err(DomainError)` - Storage error
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find an account by its lowercased email address
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Check whether an account exists for the given lowercased email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Create a new account
    ///
    /// # Returns
    /// * `Ok(Account)` - The created account
    /// * `Err(DomainError)` - Creation failed, including duplicate email
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Update an existing account
    async fn update(&self, account: Account) -> Result<Account, DomainError>;
}
