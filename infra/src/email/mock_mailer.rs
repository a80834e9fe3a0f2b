//! Mock mailer for development and testing.
//!
//! Logs messages instead of delivering them and keeps a copy for
//! inspection. The recorded bodies contain raw codes, so this
//! implementation must never be wired into a production build.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::info;

use tf_core::services::verification::Mailer;

/// A recorded outbound message
#[derive(Debug, Clone)]
pub struct RecordedEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mock mailer that records messages instead of sending them
#[derive(Clone, Default)]
pub struct MockMailer {
    messages: Arc<Mutex<Vec<RecordedEmail>>>,
    simulate_failure: bool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails every send, for exercising the
    /// catch-log-discard boundary
    pub fn failing() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            simulate_failure: true,
        }
    }

    /// All messages recorded so far
    pub fn messages(&self) -> Vec<RecordedEmail> {
        self.messages.lock().unwrap().clone()
    }

    /// Number of messages recorded
    pub fn message_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
        if self.simulate_failure {
            return Err("simulated delivery failure".to_string());
        }

        info!(to = %to, subject = %subject, "Mock mailer recorded message");
        self.messages.lock().unwrap().push(RecordedEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
