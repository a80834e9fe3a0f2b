//! Domain entities for the TaskForge credential subsystem.

pub mod account;
pub mod verification_record;

pub use account::Account;
pub use verification_record::{VerificationPurpose, VerificationRecord};
