//! Mock mailer and test harness for account service tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::repositories::{MockAccountRepository, MockVerificationRepository};
use crate::services::account::{AccountService, AccountServiceConfig};
use crate::services::verification::{CodeHasher, Mailer, VerificationConfig, VerificationFlow};

pub const SECRET: &[u8] = b"test-hmac-secret-at-least-32-bytes";

/// A captured outbound email
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mock mailer recording every sent message
pub struct MockMailer {
    pub sent: Arc<Mutex<Vec<SentEmail>>>,
    pub should_fail: bool,
}

impl MockMailer {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }

    pub fn sent_to(&self, to: &str) -> Vec<SentEmail> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.to == to)
            .cloned()
            .collect()
    }

    /// Extracts the 6-digit code from the most recent email to `to`
    pub fn last_code_for(&self, to: &str) -> Option<String> {
        self.sent_to(to)
            .iter()
            .rev()
            .find_map(|m| extract_code(&m.body))
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
        if self.should_fail {
            return Err("mail relay unavailable".to_string());
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

fn extract_code(body: &str) -> Option<String> {
    let mut run = String::new();
    for c in body.chars() {
        if c.is_ascii_digit() {
            run.push(c);
        } else {
            if run.len() == 6 {
                return Some(run);
            }
            run.clear();
        }
    }
    (run.len() == 6).then_some(run)
}

/// Test harness wiring the account service to in-memory collaborators
pub struct Harness {
    pub accounts: Arc<MockAccountRepository>,
    pub store: Arc<MockVerificationRepository>,
    pub mailer: Arc<MockMailer>,
    pub service: AccountService<MockAccountRepository, MockVerificationRepository, MockMailer>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_mailer(MockMailer::new(false))
    }

    pub fn with_mailer(mailer: MockMailer) -> Self {
        let accounts = Arc::new(MockAccountRepository::new());
        let store = Arc::new(MockVerificationRepository::new());
        let mailer = Arc::new(mailer);
        let flow = Arc::new(VerificationFlow::new(
            store.clone(),
            CodeHasher::new(SECRET),
            VerificationConfig::default(),
        ));
        let config = AccountServiceConfig {
            // Low cost keeps the tests fast
            bcrypt_cost: 4,
            ..AccountServiceConfig::default()
        };
        let service = AccountService::new(accounts.clone(), flow, mailer.clone(), config);
        Self {
            accounts,
            store,
            mailer,
            service,
        }
    }

    /// Let fire-and-forget dispatch tasks run on the current-thread runtime
    pub async fn settle(&self) {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_code() {
        assert_eq!(
            extract_code("Your code is 123456. It expires in 15 minutes."),
            Some("123456".to_string())
        );
        assert_eq!(extract_code("expires in 15 minutes"), None);
        assert_eq!(extract_code("ends with 654321"), Some("654321".to_string()));
    }
}
