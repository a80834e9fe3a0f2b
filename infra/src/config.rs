//! Configuration management for infrastructure services.
//!
//! Settings are read from the environment at startup. The code-hashing
//! secret is mandatory: starting without it is a configuration error, not
//! a per-request failure.

use crate::InfrastructureError;

/// Security-sensitive configuration loaded at startup
#[derive(Clone)]
pub struct SecurityConfig {
    /// Server-side secret keying the verification-code hasher
    pub code_secret: Vec<u8>,
    /// Bcrypt cost factor for password hashing
    pub bcrypt_cost: u32,
}

impl SecurityConfig {
    /// Minimum accepted secret length, in bytes
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Load from environment variables
    ///
    /// * `TASKFORGE_CODE_SECRET` - required, at least 32 bytes
    /// * `TASKFORGE_BCRYPT_COST` - optional, defaults to the bcrypt default
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let code_secret = std::env::var("TASKFORGE_CODE_SECRET")
            .map_err(|_| InfrastructureError::Config("TASKFORGE_CODE_SECRET not set".to_string()))?;
        if code_secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(InfrastructureError::Config(format!(
                "TASKFORGE_CODE_SECRET must be at least {} bytes",
                Self::MIN_SECRET_LENGTH
            )));
        }

        Ok(Self {
            code_secret: code_secret.into_bytes(),
            bcrypt_cost: std::env::var("TASKFORGE_BCRYPT_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(bcrypt::DEFAULT_COST),
        })
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the secret through Debug output
        f.debug_struct("SecurityConfig")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish_non_exhaustive()
    }
}
