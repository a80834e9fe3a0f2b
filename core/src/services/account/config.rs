//! Configuration for the account service.

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Product name used in notification subjects and bodies
    pub product_name: String,
    /// Bcrypt cost factor for password hashing
    pub bcrypt_cost: u32,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            product_name: "TaskForge".to_string(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}
