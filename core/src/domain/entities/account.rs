//! Account entity representing a registered user of the TaskForge platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account entity representing a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Email address, stored lowercased
    pub email: String,

    /// Bcrypt hash of the account password
    pub password_hash: String,

    /// Whether the email address has been verified
    pub is_email_verified: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new unverified account
    pub fn new(email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            is_email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the account email as verified
    pub fn verify_email(&mut self) {
        self.is_email_verified = true;
        self.updated_at = Utc::now();
    }

    /// Replaces the account email and marks it verified
    ///
    /// Used when an email-change code has been confirmed: the new address
    /// was the one the code was delivered to, so it is verified by
    /// construction.
    pub fn change_email(&mut self, new_email: String) {
        self.email = new_email;
        self.is_email_verified = true;
        self.updated_at = Utc::now();
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}
