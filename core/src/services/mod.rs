//! Business services for the TaskForge core.

pub mod account;
pub mod verification;

pub use account::{AccountService, AccountServiceConfig};
pub use verification::{
    CodeHasher, IssuedCode, Mailer, VerificationConfig, VerificationFlow,
};
