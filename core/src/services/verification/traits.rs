//! Trait for outbound mail delivery.

use async_trait::async_trait;

/// Trait for mail delivery integration
///
/// Implementations live in the infrastructure layer. The flow dispatches
/// mail fire-and-forget: errors from `send` are logged and discarded, never
/// surfaced to the request path.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a plain-text email
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), String>;
}
