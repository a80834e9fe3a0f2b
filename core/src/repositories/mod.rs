//! Repository interfaces for domain persistence.
//!
//! Concrete database-backed implementations live in the infrastructure
//! layer; the in-memory mocks here back the service tests and local
//! development.

pub mod account;
pub mod verification;

pub use account::{AccountRepository, MockAccountRepository};
pub use verification::{MockVerificationRepository, VerificationRepository};
