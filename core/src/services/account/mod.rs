//! Account service: registration, email verification, email change, and
//! password reset, built on the purpose-generic verification flow.

pub mod config;
pub mod email_utils;
pub mod password;
pub mod service;

#[cfg(test)]
mod tests;

pub use config::AccountServiceConfig;
pub use password::PasswordHasher;
pub use service::AccountService;
