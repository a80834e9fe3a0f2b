//! SMTP mailer implementation.
//!
//! Delivery failures here are reported to the caller (the core flow),
//! which logs and discards them; a slow or down relay never fails a
//! verification request. The transport carries a bounded timeout purely so
//! background dispatch tasks cannot leak indefinitely.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{debug, info};

use tf_core::services::verification::Mailer;

use crate::InfrastructureError;

/// SMTP mailer configuration
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP relay host
    pub host: String,
    /// SMTP relay port
    pub port: u16,
    /// Relay username
    pub username: String,
    /// Relay password
    pub password: String,
    /// Sender display name
    pub from_name: String,
    /// Sender address
    pub from_address: String,
    /// Whether to use STARTTLS (plain relay otherwise)
    pub use_starttls: bool,
    /// Timeout for relay connections in seconds
    pub timeout_secs: u64,
}

impl SmtpConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let host = std::env::var("TASKFORGE_SMTP_HOST")
            .map_err(|_| InfrastructureError::Config("TASKFORGE_SMTP_HOST not set".to_string()))?;
        let username = std::env::var("TASKFORGE_SMTP_USER")
            .map_err(|_| InfrastructureError::Config("TASKFORGE_SMTP_USER not set".to_string()))?;
        let password = std::env::var("TASKFORGE_SMTP_PASS")
            .map_err(|_| InfrastructureError::Config("TASKFORGE_SMTP_PASS not set".to_string()))?;
        let from_address = std::env::var("TASKFORGE_SMTP_FROM")
            .map_err(|_| InfrastructureError::Config("TASKFORGE_SMTP_FROM not set".to_string()))?;

        Ok(Self {
            host,
            port: std::env::var("TASKFORGE_SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
            username,
            password,
            from_name: std::env::var("TASKFORGE_SMTP_FROM_NAME")
                .unwrap_or_else(|_| "TaskForge".to_string()),
            from_address,
            use_starttls: std::env::var("TASKFORGE_SMTP_STARTTLS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            timeout_secs: std::env::var("TASKFORGE_SMTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
        })
    }
}

/// SMTP implementation of the core [`Mailer`] trait
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    /// Create a new SMTP mailer
    pub fn new(config: SmtpConfig) -> Result<Self, InfrastructureError> {
        let from: Mailbox = format!("{} <{}>", config.from_name, config.from_address)
            .parse()
            .map_err(|e| {
                InfrastructureError::Config(format!("Invalid sender address: {}", e))
            })?;

        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        let transport = if config.use_starttls {
            SmtpTransport::starttls_relay(&config.host)
        } else {
            SmtpTransport::relay(&config.host)
        }
        .map_err(|e| InfrastructureError::Email(format!("Failed to create SMTP transport: {}", e)))?
        .port(config.port)
        .credentials(credentials)
        .timeout(Some(Duration::from_secs(config.timeout_secs)))
        .build();

        info!(
            host = %config.host,
            port = config.port,
            "SMTP mailer initialized"
        );

        Ok(Self { transport, from })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(SmtpConfig::from_env()?)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
        let to: Mailbox = to
            .parse()
            .map_err(|e| format!("Invalid recipient address: {}", e))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| format!("Failed to build message: {}", e))?;

        // The sync transport blocks on the relay round-trip
        let transport = self.transport.clone();
        let outcome = tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| format!("Mail dispatch task failed: {}", e))?;

        match outcome {
            Ok(response) => {
                debug!(code = %response.code(), "SMTP relay accepted message");
                Ok(())
            }
            Err(e) => Err(format!("SMTP delivery failed: {}", e)),
        }
    }
}
