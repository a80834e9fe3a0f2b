//! One-time-code lifecycle: generation, keyed hashing, resend policy, and
//! the purpose-generic issue/check/consume state machine.

pub mod code;
pub mod config;
pub mod flow;
pub mod hasher;
pub mod policy;
pub mod traits;
pub mod types;

#[cfg(test)]
mod tests;

pub use code::generate_code;
pub use config::VerificationConfig;
pub use flow::VerificationFlow;
pub use hasher::CodeHasher;
pub use traits::Mailer;
pub use types::IssuedCode;
