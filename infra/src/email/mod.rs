//! Email delivery implementations of the core [`Mailer`] trait.
//!
//! [`Mailer`]: tf_core::services::verification::Mailer

pub mod mock_mailer;
pub mod smtp;

pub use mock_mailer::MockMailer;
pub use smtp::{SmtpConfig, SmtpMailer};
